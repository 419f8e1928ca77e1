//! Opaque identifiers for animations and keyframes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StudioError;

/// Unique identifier for an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationId(Uuid);

impl AnimationId {
    /// Generate a new animation ID
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    #[inline]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AnimationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AnimationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a keyframe within an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyframeId(Uuid);

impl KeyframeId {
    /// Generate a new keyframe ID
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a keyframe ID from a UUID string
    /// The string should be a valid UUID format like "d7a6b716-10b0-40bb-a894-8bc13a992737"
    #[inline]
    pub fn from_string(id: impl AsRef<str>) -> Result<Self, StudioError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| StudioError::InvalidId {
                kind: "keyframe".to_string(),
                value: id.as_ref().to_string(),
            })
    }

    /// Get the underlying UUID
    #[inline]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for KeyframeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for KeyframeId {
    #[inline]
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl TryFrom<&str> for KeyframeId {
    type Error = StudioError;

    #[inline]
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::from_string(s)
    }
}

impl std::fmt::Display for KeyframeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(KeyframeId::new(), KeyframeId::new());
        assert_ne!(AnimationId::new(), AnimationId::new());
    }

    #[test]
    fn keyframe_id_round_trips_through_string() {
        let id = KeyframeId::new();
        let parsed = KeyframeId::from_string(id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn malformed_keyframe_id_is_rejected() {
        let err = KeyframeId::try_from("not-a-uuid").unwrap_err();
        assert!(matches!(err, StudioError::InvalidId { ref kind, .. } if kind == "keyframe"));
    }
}
