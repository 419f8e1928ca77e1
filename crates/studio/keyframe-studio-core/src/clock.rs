//! Playback clock: a two-state machine that turns wall-clock time into a
//! timeline position.
//!
//! The clock owns no timer. Callers feed it timestamps (see [`crate::time`])
//! and the real-time driver in [`crate::ticker`] calls [`PlaybackClock::tick_generation`]
//! on a fixed interval. Every `play()` and every stop bumps the generation, so
//! a tick scheduled by an earlier run is recognised as stale and ignored.
//!
//! Precondition: `duration_seconds > 0`. The clock does not validate it.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Playback state of the editor clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackState {
    /// Not advancing; position stays where it is
    #[default]
    Stopped,
    /// Advancing with wall-clock time
    Playing,
}

impl PlaybackState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Outcome of a tick that belonged to the current run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockTick {
    /// New timeline position, below 100.
    Advanced(f64),
    /// Reached 100%: the clock stopped and the position must wrap to 0.
    Finished,
}

#[derive(Debug, Clone, Default)]
pub struct PlaybackClock {
    state: PlaybackState,
    start_millis: f64,
    start_offset: f64,
    generation: u64,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    /// Identifies the current run. Changes on every start and stop.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start playing from `position`. Returns the new generation, or `None` if
    /// the clock was already playing.
    pub fn play(&mut self, now_millis: f64, position: f64) -> Option<u64> {
        if self.is_playing() {
            return None;
        }
        self.state = PlaybackState::Playing;
        self.start_millis = now_millis;
        self.start_offset = position;
        self.generation = self.generation.wrapping_add(1);
        debug!(
            "clock: play from {}% (generation {})",
            position, self.generation
        );
        Some(self.generation)
    }

    /// Stop advancing. Returns whether the clock was playing.
    pub fn pause(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.stop();
        debug!("clock: paused (generation {})", self.generation);
        true
    }

    /// Restart the elapsed-time origin from `position` without changing state.
    pub fn rebase(&mut self, now_millis: f64, position: f64) {
        if self.is_playing() {
            self.start_millis = now_millis;
            self.start_offset = position;
        }
    }

    /// Advance the current run. Does nothing while stopped.
    pub fn tick(&mut self, now_millis: f64, duration_seconds: f64) -> Option<ClockTick> {
        if !self.is_playing() {
            return None;
        }
        let elapsed = (now_millis - self.start_millis).max(0.0);
        let progress =
            ((elapsed / (duration_seconds * 1000.0)) * 100.0 + self.start_offset).min(100.0);
        trace!("clock: tick elapsed={elapsed}ms progress={progress}%");
        if progress >= 100.0 {
            self.stop();
            debug!("clock: reached end, looping to start");
            Some(ClockTick::Finished)
        } else {
            Some(ClockTick::Advanced(progress))
        }
    }

    /// Like [`tick`](Self::tick), but only for the run identified by `generation`.
    pub fn tick_generation(
        &mut self,
        generation: u64,
        now_millis: f64,
        duration_seconds: f64,
    ) -> Option<ClockTick> {
        if generation != self.generation {
            trace!(
                "clock: dropping stale tick (generation {} != {})",
                generation,
                self.generation
            );
            return None;
        }
        self.tick(now_millis, duration_seconds)
    }

    fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    #[test]
    fn tick_while_stopped_is_none() {
        let mut clock = PlaybackClock::new();
        assert_eq!(clock.tick(1000.0, 2.0), None);
    }

    #[test]
    fn progress_follows_elapsed_time_and_offset() {
        let mut clock = PlaybackClock::new();
        clock.play(500.0, 10.0).unwrap();
        match clock.tick(1500.0, 2.0) {
            Some(ClockTick::Advanced(p)) => approx(p, 60.0, 1e-9),
            other => panic!("unexpected tick {other:?}"),
        }
    }

    #[test]
    fn reaching_end_stops_the_clock() {
        let mut clock = PlaybackClock::new();
        clock.play(0.0, 0.0).unwrap();
        assert_eq!(clock.tick(2000.0, 2.0), Some(ClockTick::Finished));
        assert_eq!(clock.state(), PlaybackState::Stopped);
        assert_eq!(clock.tick(2016.0, 2.0), None);
    }

    #[test]
    fn play_twice_keeps_first_run() {
        let mut clock = PlaybackClock::new();
        let generation = clock.play(0.0, 0.0).unwrap();
        assert_eq!(clock.play(100.0, 50.0), None);
        assert_eq!(clock.generation(), generation);
    }

    #[test]
    fn stale_generation_is_ignored() {
        let mut clock = PlaybackClock::new();
        let old = clock.play(0.0, 0.0).unwrap();
        assert!(clock.pause());
        let new = clock.play(0.0, 0.0).unwrap();
        assert_ne!(old, new);
        assert_eq!(clock.tick_generation(old, 500.0, 2.0), None);
        assert!(clock.tick_generation(new, 500.0, 2.0).is_some());
    }

    #[test]
    fn pause_is_idempotent() {
        let mut clock = PlaybackClock::new();
        assert!(!clock.pause());
        clock.play(0.0, 0.0);
        assert!(clock.pause());
        let generation = clock.generation();
        assert!(!clock.pause());
        assert_eq!(clock.generation(), generation);
    }

    #[test]
    fn rebase_moves_origin() {
        let mut clock = PlaybackClock::new();
        clock.play(0.0, 0.0);
        clock.rebase(1000.0, 80.0);
        match clock.tick(1200.0, 2.0) {
            Some(ClockTick::Advanced(p)) => approx(p, 90.0, 1e-9),
            other => panic!("unexpected tick {other:?}"),
        }
    }
}
