//! Wall-clock sources for the playback clock.
//!
//! The clock only ever sees milliseconds since an arbitrary origin, so the
//! same state machine runs against real time or a manually advanced clock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Monotonic milliseconds since an arbitrary origin.
pub trait TimeSource: Send {
    fn now_millis(&self) -> f64;
}

/// Real monotonic time.
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    #[inline]
    fn now_millis(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Manually advanced time. Clones share the same counter, so a test can keep a
/// handle while the session owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualTimeSource {
    // Microseconds, to keep sub-millisecond steps exact.
    micros: Arc<AtomicU64>,
}

impl ManualTimeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_millis(&self, millis: f64) {
        let delta = (millis.max(0.0) * 1000.0).round() as u64;
        self.micros.fetch_add(delta, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    #[inline]
    fn now_millis(&self) -> f64 {
        self.micros.load(Ordering::SeqCst) as f64 / 1000.0
    }
}
