//! Navigation helpers: mobile menu state, in-page anchors, scroll highlighting.

/// Vertical position of a page section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBounds {
    pub id: String,
    pub top: i32,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: i32) -> Self {
        Self { id: id.into(), top }
    }
}

/// The section the reader is currently in.
///
/// Sections are scanned in document order and the last one whose top, less
/// `offset`, has been scrolled past wins.
#[must_use]
pub fn active_section(scroll_y: i32, sections: &[SectionBounds], offset: i32) -> Option<&str> {
    sections
        .iter()
        .filter(|s| scroll_y >= s.top - offset)
        .last()
        .map(|s| s.id.as_str())
        .filter(|id| !id.is_empty())
}

/// Link `href` that marks the nav link for `section_id` as current.
#[must_use]
pub fn section_href(section_id: &str) -> String {
    format!("#{section_id}")
}

/// Target id of an in-page anchor, or `None` for bare `#` and external links.
#[must_use]
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    #[must_use]
    pub const fn is_open(self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }
}
