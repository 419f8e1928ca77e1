//! Error types for the fallible edges of the studio core.
//!
//! Edit operations on the keyframe store never fail; unknown ids are ignored.
//! Errors only surface from parsing ids, loading configuration and JSON snapshots.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum StudioError {
    /// A string could not be parsed as an identifier
    #[error("Invalid {kind} id: {value}")]
    InvalidId { kind: String, value: String },

    /// Animation snapshot violates the model invariants
    #[error("Invalid animation: {reason}")]
    InvalidAnimation { reason: String },

    /// Configuration failed validation
    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl StudioError {
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidId { .. } | Self::InvalidAnimation { .. } => "data",
            Self::InvalidConfig { .. } => "config",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        let err = StudioError::invalid_config("tick_interval_ms", "must be > 0");
        assert_eq!(err.category(), "config");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: tick_interval_ms: must be > 0"
        );
    }

    #[test]
    fn json_errors_convert() {
        let err: StudioError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.category(), "serialization");
    }
}
