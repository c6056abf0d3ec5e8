//! School homepage widgets
//!
//! Platform-agnostic logic behind the interactive parts of the school
//! homepage: the hero slider and the accessibility mode panel, plus the
//! small helpers used by navigation, counters and ARIA fix-ups. Nothing in
//! this crate touches the DOM; the web crate projects state onto the page.

pub mod accessibility;
pub mod aria;
pub mod config;
pub mod counter;
pub mod nav;
pub mod shortcuts;
pub mod slider;
pub mod testing;

pub use accessibility::{
    ACTIVE_MARKER, AccessibilityController, AccessibilityPreference, AccessibilitySnapshot,
    ClassList, ClickTarget, DEFAULT_STORAGE_KEY, Mode, ModeParseError, PanelVisibility,
    PreferenceStore, applied_modes, apply_mode,
};
pub use config::{
    AccessibilityConfig, CounterConfig, NavConfig, RevealConfig, SliderConfig, WidgetConfig,
    WidgetConfigError,
};
pub use counter::{CounterAnimation, CounterFrame};
pub use nav::{MenuState, SectionBounds, active_section, anchor_target};
pub use shortcuts::{KeyChord, Shortcut};
pub use slider::{DEFAULT_INTERVAL_MS, SlideChange, SliderController, SliderState};
