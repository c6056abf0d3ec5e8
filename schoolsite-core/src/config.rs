//! Widget configuration
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::accessibility::DEFAULT_STORAGE_KEY;
use crate::slider::DEFAULT_INTERVAL_MS;

const DEFAULT_WIDGET_DATA: &str =
    include_str!("../../schoolsite-web/static/assets/data/widgets.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WidgetConfig {
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub accessibility: AccessibilityConfig,
    #[serde(default)]
    pub nav: NavConfig,
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderConfig {
    #[serde(default = "SliderConfig::default_interval_ms")]
    pub interval_ms: u32,
    #[serde(default)]
    pub placeholder_image: Option<String>,
    #[serde(default = "SliderConfig::default_placeholder_alt")]
    pub placeholder_alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityConfig {
    #[serde(default = "AccessibilityConfig::default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_true")]
    pub guard_editable_targets: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavConfig {
    #[serde(default = "NavConfig::default_scroll_offset_px")]
    pub scroll_offset_px: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterConfig {
    #[serde(default = "CounterConfig::default_duration_ms")]
    pub duration_ms: u32,
    #[serde(default = "CounterConfig::default_frame_ms")]
    pub frame_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    #[serde(default = "RevealConfig::default_threshold")]
    pub threshold: f64,
    #[serde(default = "RevealConfig::default_root_margin")]
    pub root_margin: String,
}

/// Errors raised when widget configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum WidgetConfigError {
    #[error("slider interval must be positive")]
    ZeroSliderInterval,
    #[error("accessibility storage key must not be empty")]
    EmptyStorageKey,
    #[error("counter frame must be positive")]
    ZeroCounterFrame,
    #[error("reveal threshold must be between 0 and 1 (got {0:.2})")]
    ThresholdRange(f64),
}

impl WidgetConfig {
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json_or_default(DEFAULT_WIDGET_DATA)
    }

    /// Parse configuration JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse and validate, falling back to defaults on any problem.
    #[must_use]
    pub fn from_json_or_default(json: &str) -> Self {
        let parsed = match Self::from_json(json) {
            Ok(cfg) => cfg,
            Err(err) => {
                log::warn!("widget config: malformed JSON ({err}); using defaults");
                return Self::default();
            }
        };
        match parsed.validate() {
            Ok(()) => parsed,
            Err(err) => {
                log::warn!("widget config: {err}; using defaults");
                Self::default()
            }
        }
    }

    /// Check configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), WidgetConfigError> {
        if self.slider.interval_ms == 0 {
            return Err(WidgetConfigError::ZeroSliderInterval);
        }
        if self.accessibility.storage_key.trim().is_empty() {
            return Err(WidgetConfigError::EmptyStorageKey);
        }
        if self.counter.frame_ms == 0 {
            return Err(WidgetConfigError::ZeroCounterFrame);
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(WidgetConfigError::ThresholdRange(self.reveal.threshold));
        }
        Ok(())
    }
}

impl SliderConfig {
    const fn default_interval_ms() -> u32 {
        DEFAULT_INTERVAL_MS
    }

    fn default_placeholder_alt() -> String {
        String::from("Изображение временно недоступно")
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            interval_ms: Self::default_interval_ms(),
            placeholder_image: None,
            placeholder_alt: Self::default_placeholder_alt(),
        }
    }
}

impl AccessibilityConfig {
    fn default_storage_key() -> String {
        String::from(DEFAULT_STORAGE_KEY)
    }
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            storage_key: Self::default_storage_key(),
            guard_editable_targets: true,
        }
    }
}

impl NavConfig {
    const fn default_scroll_offset_px() -> i32 {
        100
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            scroll_offset_px: Self::default_scroll_offset_px(),
        }
    }
}

impl CounterConfig {
    const fn default_duration_ms() -> u32 {
        2000
    }

    const fn default_frame_ms() -> u32 {
        16
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: Self::default_duration_ms(),
            frame_ms: Self::default_frame_ms(),
        }
    }
}

impl RevealConfig {
    const fn default_threshold() -> f64 {
        0.1
    }

    fn default_root_margin() -> String {
        String::from("0px 0px -50px 0px")
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
            root_margin: Self::default_root_margin(),
        }
    }
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = WidgetConfig::from_json("{}").unwrap();
        assert_eq!(cfg, WidgetConfig::default());
        assert_eq!(cfg.slider.interval_ms, 5000);
        assert_eq!(cfg.accessibility.storage_key, "accessibilitySettings");
        assert!(cfg.accessibility.guard_editable_targets);
        assert_eq!(cfg.nav.scroll_offset_px, 100);
        assert_eq!(cfg.counter.duration_ms, 2000);
        assert_eq!(cfg.counter.frame_ms, 16);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn bundled_config_is_valid() {
        let cfg = WidgetConfig::from_json(DEFAULT_WIDGET_DATA).unwrap();
        assert!(cfg.validate().is_ok());
        assert_eq!(WidgetConfig::load_from_static(), cfg);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let cfg = WidgetConfig::from_json(r#"{"slider":{"interval_ms":3000}}"#).unwrap();
        assert_eq!(cfg.slider.interval_ms, 3000);
        assert_eq!(cfg.slider.placeholder_image, None);
        assert_eq!(cfg.reveal.root_margin, "0px 0px -50px 0px");
    }

    #[test]
    fn validate_flags_each_invariant() {
        let mut cfg = WidgetConfig::default();
        cfg.slider.interval_ms = 0;
        assert_eq!(cfg.validate(), Err(WidgetConfigError::ZeroSliderInterval));

        let mut cfg = WidgetConfig::default();
        cfg.accessibility.storage_key = "  ".into();
        assert_eq!(cfg.validate(), Err(WidgetConfigError::EmptyStorageKey));

        let mut cfg = WidgetConfig::default();
        cfg.counter.frame_ms = 0;
        assert_eq!(cfg.validate(), Err(WidgetConfigError::ZeroCounterFrame));

        let mut cfg = WidgetConfig::default();
        cfg.reveal.threshold = 1.5;
        assert_eq!(cfg.validate(), Err(WidgetConfigError::ThresholdRange(1.5)));
    }

    #[test]
    fn fallback_replaces_malformed_or_invalid_config() {
        assert_eq!(
            WidgetConfig::from_json_or_default("{not json"),
            WidgetConfig::default()
        );
        assert_eq!(
            WidgetConfig::from_json_or_default(r#"{"counter":{"frame_ms":0}}"#),
            WidgetConfig::default()
        );
        let tuned = WidgetConfig::from_json_or_default(r#"{"nav":{"scroll_offset_px":64}}"#);
        assert_eq!(tuned.nav.scroll_offset_px, 64);
    }
}
