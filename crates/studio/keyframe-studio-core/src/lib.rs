//! Keyframe Studio core (presentation-agnostic)
//!
//! The animation model, keyframe store, interpolation engine and playback clock
//! behind the Keyframe Studio editor. A single [`EditorSession`] owns all
//! editing state; [`PlaybackDriver`] ticks it in real time. Panels, timeline
//! widgets and pointer handling live outside this crate and talk to it through
//! the session.

pub mod clock;
pub mod config;
pub mod data;
pub mod easing;
pub mod error;
pub mod events;
pub mod export;
pub mod ids;
pub mod sampling;
pub mod selection;
pub mod session;
pub mod store;
pub mod ticker;
pub mod time;
pub mod timeline;

// Re-exports for presentation collaborators
pub use clock::{ClockTick, PlaybackClock, PlaybackState};
pub use config::StudioConfig;
pub use data::{Animation, Channel, Keyframe, PropertyPatch, PropertySet};
pub use easing::{EasingPreset, EASING_PRESETS};
pub use error::StudioError;
pub use events::PlaybackEvent;
pub use export::export_css;
pub use ids::{AnimationId, KeyframeId};
pub use sampling::{evaluate, segment_at, Segment};
pub use selection::Selection;
pub use session::{EditorSession, KeyframeToggle};
pub use ticker::{PlaybackDriver, SharedSession};
pub use time::{ManualTimeSource, SystemTimeSource, TimeSource};

/// Studio result type
pub type Result<T> = core::result::Result<T, StudioError>;
