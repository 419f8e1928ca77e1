//! Configuration for the studio core.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::StudioError;

/// Editor defaults and playback tuning.
///
/// Every field has a default, so a partial JSON document is enough to override
/// a single value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudioConfig {
    /// Interval between playback ticks in milliseconds (~60Hz).
    pub tick_interval_ms: u64,
    /// Duration given to fresh animations, in seconds.
    pub default_duration_seconds: f64,
    /// Top-level easing of fresh animations (used by the CSS usage rule).
    pub default_animation_easing: String,
    /// Easing assigned to keyframes created through `add_keyframe`.
    pub default_keyframe_easing: Option<String>,
    /// Color channel value of the identity property set.
    pub default_color: String,
    /// Distance (in timeline percent) under which a keyframe counts as "at" a time.
    pub keyframe_hit_tolerance: f64,
    /// Timeline marks the scrubber snaps to.
    pub snap_marks: Vec<f64>,
    /// Snap distance in timeline percent. Zero disables snapping.
    pub snap_threshold: f64,
    /// Selector of the usage rule emitted by the CSS export.
    pub css_selector: String,
    /// Rebase the playback clock whenever the position is scrubbed mid-playback.
    /// Off by default: playback keeps progressing from the original `play()` start.
    pub rebase_on_scrub: bool,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 16,
            default_duration_seconds: 2.0,
            default_animation_easing: "ease-in-out".to_string(),
            default_keyframe_easing: Some("ease-in-out".to_string()),
            default_color: "#ffffff".to_string(),
            keyframe_hit_tolerance: 2.0,
            snap_marks: vec![0.0, 25.0, 50.0, 75.0, 100.0],
            snap_threshold: 5.0,
            css_selector: ".animated-element".to_string(),
            rebase_on_scrub: false,
        }
    }
}

impl StudioConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(text: &str) -> Result<Self, StudioError> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), StudioError> {
        if self.tick_interval_ms == 0 {
            return Err(StudioError::invalid_config(
                "tickIntervalMs",
                "must be greater than zero",
            ));
        }
        if !(self.default_duration_seconds.is_finite() && self.default_duration_seconds > 0.0) {
            return Err(StudioError::invalid_config(
                "defaultDurationSeconds",
                format!("must be > 0, got {}", self.default_duration_seconds),
            ));
        }
        if self.snap_threshold < 0.0 || self.keyframe_hit_tolerance < 0.0 {
            return Err(StudioError::invalid_config(
                "snapThreshold/keyframeHitTolerance",
                "must not be negative",
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
