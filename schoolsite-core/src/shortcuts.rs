//! Alt+digit keyboard shortcuts for the accessibility panel.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    TogglePanel,
    HighContrast,
    LargeText,
    Reset,
}

impl Shortcut {
    pub const ALL: [Self; 4] = [
        Self::TogglePanel,
        Self::HighContrast,
        Self::LargeText,
        Self::Reset,
    ];

    /// The `KeyboardEvent.key` value that triggers this shortcut with Alt held.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::TogglePanel => "1",
            Self::HighContrast => "2",
            Self::LargeText => "3",
            Self::Reset => "0",
        }
    }
}

/// The parts of a key press that matter for shortcut matching.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyChord {
    pub key: String,
    pub alt: bool,
    /// The event target accepts text input.
    pub target_editable: bool,
}

impl KeyChord {
    pub fn alt(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            alt: true,
            target_editable: false,
        }
    }

    #[must_use]
    pub const fn in_editable(mut self) -> Self {
        self.target_editable = true;
        self
    }
}

/// Map a key press to a shortcut.
///
/// With `guard_editable` set, presses that originate in text fields never match.
#[must_use]
pub fn resolve(chord: &KeyChord, guard_editable: bool) -> Option<Shortcut> {
    if !chord.alt || (guard_editable && chord.target_editable) {
        return None;
    }
    Shortcut::ALL.into_iter().find(|s| s.key() == chord.key)
}

/// Whether an element with this tag name takes typed input.
#[must_use]
pub fn is_editable_tag(tag_name: &str, content_editable: bool) -> bool {
    content_editable
        || matches!(
            tag_name.to_ascii_lowercase().as_str(),
            "input" | "textarea" | "select"
        )
}
