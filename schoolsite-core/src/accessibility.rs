//! Accessibility presentation modes.
//!
//! The controller owns the single source of truth (`current_mode`). The
//! document root only ever receives a projection of it through
//! [`apply_mode`], and the persisted record is written after every change.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::shortcuts::Shortcut;

/// Root marker present whenever any mode is applied.
pub const ACTIVE_MARKER: &str = "accessibility-version";

/// Storage key used when configuration does not provide one.
pub const DEFAULT_STORAGE_KEY: &str = "accessibilitySettings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    HighContrast,
    LargeText,
    Grayscale,
    DyslexiaFriendly,
}

impl Mode {
    pub const ALL: [Self; 4] = [
        Self::HighContrast,
        Self::LargeText,
        Self::Grayscale,
        Self::DyslexiaFriendly,
    ];

    /// CSS class placed on the document root, also the persisted name.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::HighContrast => "high-contrast",
            Self::LargeText => "large-text",
            Self::Grayscale => "grayscale",
            Self::DyslexiaFriendly => "dyslexia-friendly",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighContrast => "Высокая контрастность",
            Self::LargeText => "Крупный текст",
            Self::Grayscale => "Черно-белый режим",
            Self::DyslexiaFriendly => "Шрифт для дислексии",
        }
    }

    /// Icon class for the option button.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::HighContrast => "fas fa-adjust",
            Self::LargeText => "fas fa-text-height",
            Self::Grayscale => "fas fa-palette",
            Self::DyslexiaFriendly => "fas fa-font",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown accessibility mode: {0:?}")]
pub struct ModeParseError(pub String);

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.class_name() == s)
            .ok_or_else(|| ModeParseError(s.to_string()))
    }
}

/// Minimal class-list surface of the document root.
pub trait ClassList {
    fn add(&mut self, class: &str);
    fn remove(&mut self, class: &str);
    fn contains(&self, class: &str) -> bool;
}

/// Project `mode` onto the root element's classes.
///
/// All mode markers are cleared first, so at most one mode marker is ever
/// present afterwards.
pub fn apply_mode<C: ClassList + ?Sized>(root: &mut C, mode: Option<Mode>) {
    root.remove(ACTIVE_MARKER);
    for m in Mode::ALL {
        root.remove(m.class_name());
    }
    if let Some(mode) = mode {
        root.add(ACTIVE_MARKER);
        root.add(mode.class_name());
    }
}

/// Mode markers currently present on `root`.
#[must_use]
pub fn applied_modes<C: ClassList + ?Sized>(root: &C) -> Vec<Mode> {
    Mode::ALL
        .into_iter()
        .filter(|m| root.contains(m.class_name()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelVisibility {
    #[default]
    Hidden,
    Visible,
}

impl PanelVisibility {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Hidden => Self::Visible,
            Self::Visible => Self::Hidden,
        }
    }

    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Persisted record: `{"isActive": bool, "mode": string|null}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityPreference {
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub mode: Option<String>,
}

impl AccessibilityPreference {
    #[must_use]
    pub fn from_mode(mode: Option<Mode>) -> Self {
        Self {
            is_active: mode.is_some(),
            mode: mode.map(|m| m.class_name().to_string()),
        }
    }

    /// The mode to restore, if the record is active and names a known mode.
    #[must_use]
    pub fn restorable_mode(&self) -> Option<Mode> {
        if !self.is_active {
            return None;
        }
        self.mode.as_deref().and_then(|name| name.parse().ok())
    }

    /// Parse a stored record. Malformed JSON yields `None`.
    #[must_use]
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        // A struct of a bool and an optional string always serializes.
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

/// String-keyed persistence capability (browser `localStorage` in production).
pub trait PreferenceStore {
    type Error: std::error::Error + 'static;

    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be accessed.
    fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// Where a document-level click landed relative to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickTarget {
    pub inside_panel: bool,
    pub on_toggle: bool,
}

/// Everything a view needs to render the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessibilitySnapshot {
    pub mode: Option<Mode>,
    pub is_active: bool,
    pub panel: PanelVisibility,
}

impl AccessibilitySnapshot {
    #[must_use]
    pub fn is_selected(&self, mode: Mode) -> bool {
        self.mode == Some(mode)
    }
}

pub struct AccessibilityController<S: PreferenceStore> {
    store: S,
    key: String,
    current_mode: Option<Mode>,
    is_active: bool,
    panel: PanelVisibility,
}

impl<S: PreferenceStore> AccessibilityController<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            current_mode: None,
            is_active: false,
            panel: PanelVisibility::Hidden,
        }
    }

    #[must_use]
    pub const fn current_mode(&self) -> Option<Mode> {
        self.current_mode
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    #[must_use]
    pub const fn panel(&self) -> PanelVisibility {
        self.panel
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn snapshot(&self) -> AccessibilitySnapshot {
        AccessibilitySnapshot {
            mode: self.current_mode,
            is_active: self.is_active,
            panel: self.panel,
        }
    }

    #[must_use]
    pub fn is_selected(&self, mode: Mode) -> bool {
        self.current_mode == Some(mode)
    }

    pub fn set_mode(&mut self, mode: Mode) -> AccessibilitySnapshot {
        log::debug!("accessibility: applying {mode}");
        self.current_mode = Some(mode);
        self.is_active = true;
        self.persist();
        self.panel = PanelVisibility::Hidden;
        self.snapshot()
    }

    /// Apply a mode given by name, as found on option `data-mode` attributes.
    ///
    /// Unknown names leave every piece of state untouched and return `false`.
    pub fn set_mode_named(&mut self, name: &str) -> bool {
        match name.parse::<Mode>() {
            Ok(mode) => {
                self.set_mode(mode);
                true
            }
            Err(err) => {
                log::warn!("accessibility: {err}");
                false
            }
        }
    }

    pub fn reset(&mut self) -> AccessibilitySnapshot {
        log::debug!("accessibility: reset");
        self.current_mode = None;
        self.is_active = false;
        self.persist();
        self.panel = PanelVisibility::Hidden;
        self.snapshot()
    }

    pub fn toggle_panel(&mut self) -> PanelVisibility {
        self.panel = self.panel.toggled();
        self.panel
    }

    pub fn show_panel(&mut self) {
        self.panel = PanelVisibility::Visible;
    }

    pub fn hide_panel(&mut self) {
        self.panel = PanelVisibility::Hidden;
    }

    /// Outside-click rule: hide unless the click was in the panel or on its toggle.
    ///
    /// Returns `true` when the click dismissed the panel.
    pub fn dismiss(&mut self, target: ClickTarget) -> bool {
        if target.inside_panel || target.on_toggle {
            return false;
        }
        let was_visible = self.panel.is_visible();
        self.hide_panel();
        was_visible
    }

    pub fn apply_shortcut(&mut self, shortcut: Shortcut) -> AccessibilitySnapshot {
        match shortcut {
            Shortcut::TogglePanel => {
                self.toggle_panel();
                self.snapshot()
            }
            Shortcut::HighContrast => self.set_mode(Mode::HighContrast),
            Shortcut::LargeText => self.set_mode(Mode::LargeText),
            Shortcut::Reset => self.reset(),
        }
    }

    /// Reapply the persisted mode, if any.
    ///
    /// Absent, unreadable, malformed or unknown records leave the controller
    /// in its default state.
    pub fn restore(&mut self) -> AccessibilitySnapshot {
        let raw = match self.store.read(&self.key) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("accessibility: could not read {}: {err}", self.key);
                None
            }
        };
        let restorable = raw
            .as_deref()
            .and_then(AccessibilityPreference::from_json)
            .and_then(|pref| pref.restorable_mode());
        if let Some(mode) = restorable {
            self.set_mode(mode);
        }
        self.snapshot()
    }

    fn persist(&self) {
        let record = AccessibilityPreference::from_mode(self.current_mode);
        if let Err(err) = self.store.write(&self.key, &record.to_json()) {
            log::warn!("accessibility: could not persist {}: {err}", self.key);
        }
    }
}
