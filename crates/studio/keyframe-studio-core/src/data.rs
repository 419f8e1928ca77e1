//! Animation data model: property sets, keyframes and the animation itself.
//!
//! Keyframe times are percentages along the timeline in [0, 100]. Scale
//! channels are stored as percentages (100 = identity).

use serde::{Deserialize, Serialize};

use crate::error::StudioError;
use crate::ids::{AnimationId, KeyframeId};

pub const DEFAULT_COLOR: &str = "#ffffff";

/// Numeric channels of a [`PropertySet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    TranslateX,
    TranslateY,
    ScaleX,
    ScaleY,
    Rotation,
    SkewX,
    SkewY,
    X,
    Y,
    Opacity,
}

impl Channel {
    pub const ALL: [Channel; 10] = [
        Channel::TranslateX,
        Channel::TranslateY,
        Channel::ScaleX,
        Channel::ScaleY,
        Channel::Rotation,
        Channel::SkewX,
        Channel::SkewY,
        Channel::X,
        Channel::Y,
        Channel::Opacity,
    ];

    /// Name used by the presentation layer and in JSON snapshots.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TranslateX => "translateX",
            Self::TranslateY => "translateY",
            Self::ScaleX => "scaleX",
            Self::ScaleY => "scaleY",
            Self::Rotation => "rotation",
            Self::SkewX => "skewX",
            Self::SkewY => "skewY",
            Self::X => "x",
            Self::Y => "y",
            Self::Opacity => "opacity",
        }
    }

    /// Scale channels are percentages and interpolate on their decimal fraction.
    #[inline]
    pub fn is_percent_scale(&self) -> bool {
        matches!(self, Self::ScaleX | Self::ScaleY)
    }
}

/// Complete snapshot of every animatable channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySet {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
    pub skew_x: f64,
    pub skew_y: f64,
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    pub color: String,
}

impl PropertySet {
    /// Identity transform carrying the given color.
    pub fn identity(color: impl Into<String>) -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 100.0,
            scale_y: 100.0,
            rotation: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
            x: 0.0,
            y: 0.0,
            opacity: 1.0,
            color: color.into(),
        }
    }

    #[inline]
    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::TranslateX => self.translate_x,
            Channel::TranslateY => self.translate_y,
            Channel::ScaleX => self.scale_x,
            Channel::ScaleY => self.scale_y,
            Channel::Rotation => self.rotation,
            Channel::SkewX => self.skew_x,
            Channel::SkewY => self.skew_y,
            Channel::X => self.x,
            Channel::Y => self.y,
            Channel::Opacity => self.opacity,
        }
    }

    #[inline]
    pub fn set(&mut self, channel: Channel, value: f64) {
        let slot = match channel {
            Channel::TranslateX => &mut self.translate_x,
            Channel::TranslateY => &mut self.translate_y,
            Channel::ScaleX => &mut self.scale_x,
            Channel::ScaleY => &mut self.scale_y,
            Channel::Rotation => &mut self.rotation,
            Channel::SkewX => &mut self.skew_x,
            Channel::SkewY => &mut self.skew_y,
            Channel::X => &mut self.x,
            Channel::Y => &mut self.y,
            Channel::Opacity => &mut self.opacity,
        };
        *slot = value;
    }

    /// Builder-style setter, handy for fixtures and tests.
    pub fn with(mut self, channel: Channel, value: f64) -> Self {
        self.set(channel, value);
        self
    }

    /// CSS transform for the live preview. Unlike the export, scale is a
    /// unitless factor here.
    pub fn preview_transform(&self) -> String {
        format!(
            "translateX({}px) translateY({}px) scaleX({}) scaleY({}) rotate({}deg) skewX({}deg) skewY({}deg)",
            self.translate_x,
            self.translate_y,
            self.scale_x / 100.0,
            self.scale_y / 100.0,
            self.rotation,
            self.skew_x,
            self.skew_y,
        )
    }
}

impl Default for PropertySet {
    fn default() -> Self {
        Self::identity(DEFAULT_COLOR)
    }
}

/// Partial update of a [`PropertySet`]: only `Some` channels are written.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skew_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skew_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl PropertyPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch touching a single numeric channel.
    pub fn channel(channel: Channel, value: f64) -> Self {
        Self::new().with(channel, value)
    }

    pub fn with(mut self, channel: Channel, value: f64) -> Self {
        let slot = match channel {
            Channel::TranslateX => &mut self.translate_x,
            Channel::TranslateY => &mut self.translate_y,
            Channel::ScaleX => &mut self.scale_x,
            Channel::ScaleY => &mut self.scale_y,
            Channel::Rotation => &mut self.rotation,
            Channel::SkewX => &mut self.skew_x,
            Channel::SkewY => &mut self.skew_y,
            Channel::X => &mut self.x,
            Channel::Y => &mut self.y,
            Channel::Opacity => &mut self.opacity,
        };
        *slot = Some(value);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the supplied channels into `target`.
    pub fn apply_to(&self, target: &mut PropertySet) {
        let numeric = [
            (Channel::TranslateX, self.translate_x),
            (Channel::TranslateY, self.translate_y),
            (Channel::ScaleX, self.scale_x),
            (Channel::ScaleY, self.scale_y),
            (Channel::Rotation, self.rotation),
            (Channel::SkewX, self.skew_x),
            (Channel::SkewY, self.skew_y),
            (Channel::X, self.x),
            (Channel::Y, self.y),
            (Channel::Opacity, self.opacity),
        ];
        for (channel, value) in numeric {
            if let Some(v) = value {
                target.set(channel, v);
            }
        }
        if let Some(color) = &self.color {
            target.color.clone_from(color);
        }
    }
}

/// A point on the timeline carrying a full property snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    pub id: KeyframeId,
    /// Percentage along the timeline in [0, 100].
    pub time: f64,
    pub properties: PropertySet,
    /// Easing of the segment ending at this keyframe.
    #[serde(default)]
    pub easing: Option<String>,
}

impl Keyframe {
    pub fn new(time: f64, properties: PropertySet) -> Self {
        Self {
            id: KeyframeId::new(),
            time,
            properties,
            easing: None,
        }
    }

    pub fn with_easing(mut self, easing: impl Into<String>) -> Self {
        self.easing = Some(easing.into());
        self
    }
}

/// A single-element animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    pub id: AnimationId,
    pub name: String,
    /// Length of one pass through the timeline, in seconds. Expected > 0.
    pub duration_seconds: f64,
    /// Keyframes in insertion-then-sort order. Readers must not rely on ordering.
    pub keyframes: Vec<Keyframe>,
    /// Timing function of the exported CSS usage rule.
    pub easing: String,
}

impl Animation {
    pub fn new(
        name: impl Into<String>,
        duration_seconds: f64,
        easing: impl Into<String>,
        keyframes: Vec<Keyframe>,
    ) -> Self {
        Self {
            id: AnimationId::new(),
            name: name.into(),
            duration_seconds,
            keyframes,
            easing: easing.into(),
        }
    }

    /// Check the invariants a loaded snapshot must satisfy.
    pub fn validate_basic(&self) -> Result<(), StudioError> {
        if !(self.duration_seconds.is_finite() && self.duration_seconds > 0.0) {
            return Err(StudioError::InvalidAnimation {
                reason: format!("duration must be > 0, got {}", self.duration_seconds),
            });
        }
        if self.keyframes.is_empty() {
            return Err(StudioError::InvalidAnimation {
                reason: "animation has no keyframes".into(),
            });
        }
        for (i, kf) in self.keyframes.iter().enumerate() {
            if !kf.time.is_finite() || kf.time < 0.0 || kf.time > 100.0 {
                return Err(StudioError::InvalidAnimation {
                    reason: format!("keyframe {} time {} outside [0, 100]", kf.id, kf.time),
                });
            }
            if self.keyframes[..i].iter().any(|other| other.id == kf.id) {
                return Err(StudioError::InvalidAnimation {
                    reason: format!("duplicate keyframe id {}", kf.id),
                });
            }
        }
        Ok(())
    }
}
