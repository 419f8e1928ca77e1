//! Editor session: the single owner of the animation, timeline position,
//! selection and playback clock.
//!
//! Presentation collaborators read snapshots through the accessors and mutate
//! state only through the methods below. Playback progresses when [`tick`]
//! (or [`tick_generation`], used by the real-time driver) is called.
//!
//! [`tick`]: EditorSession::tick
//! [`tick_generation`]: EditorSession::tick_generation

use log::debug;

use crate::clock::{ClockTick, PlaybackClock, PlaybackState};
use crate::config::StudioConfig;
use crate::data::{Animation, Channel, Keyframe, PropertyPatch, PropertySet};
use crate::error::StudioError;
use crate::events::{EventQueue, PlaybackEvent};
use crate::export::export_css;
use crate::ids::KeyframeId;
use crate::sampling::{evaluate, segment_at, Segment};
use crate::selection::Selection;
use crate::time::{SystemTimeSource, TimeSource};
use crate::timeline::{clamp_percent, snap_to_mark};

/// Result of [`EditorSession::toggle_keyframe_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyframeToggle {
    Added(KeyframeId),
    Removed(KeyframeId),
}

pub struct EditorSession {
    cfg: StudioConfig,
    animation: Animation,
    position: f64,
    selection: Selection,
    clock: PlaybackClock,
    time: Box<dyn TimeSource>,
    events: EventQueue,
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("animation", &self.animation.name)
            .field("position", &self.position)
            .field("state", &self.clock.state())
            .field("selection", &self.selection)
            .finish()
    }
}

/// Two keyframes at 0% and 100% with the configured easing.
fn two_keyframe_animation(cfg: &StudioConfig, name: &str, end: PropertySet) -> Animation {
    let easing = cfg.default_keyframe_easing.clone();
    let mut start = Keyframe::new(0.0, PropertySet::identity(cfg.default_color.clone()));
    start.easing = easing.clone();
    let mut finish = Keyframe::new(100.0, end);
    finish.easing = easing;
    Animation::new(
        name,
        cfg.default_duration_seconds,
        cfg.default_animation_easing.clone(),
        vec![start, finish],
    )
}

impl EditorSession {
    /// Session driven by real monotonic time.
    pub fn new(cfg: StudioConfig) -> Self {
        Self::with_time_source(cfg, SystemTimeSource::new())
    }

    /// Session with a starter animation that slides 100px right; the first
    /// keyframe is selected.
    pub fn with_time_source(cfg: StudioConfig, time: impl TimeSource + 'static) -> Self {
        let end = PropertySet::identity(cfg.default_color.clone()).with(Channel::TranslateX, 100.0);
        let animation = two_keyframe_animation(&cfg, "My Animation", end);
        let selection = Selection::single(animation.keyframes[0].id);
        Self {
            cfg,
            animation,
            position: 0.0,
            selection,
            clock: PlaybackClock::new(),
            time: Box::new(time),
            events: EventQueue::default(),
        }
    }

    // ---- read accessors ----

    #[inline]
    pub fn config(&self) -> &StudioConfig {
        &self.cfg
    }

    #[inline]
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Current timeline position in percent.
    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.clock.state()
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    /// Generation of the current playback run.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.clock.generation()
    }

    #[inline]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Live-preview properties at the current position.
    pub fn evaluate(&self) -> PropertySet {
        evaluate(&self.animation.keyframes, self.position)
    }

    pub fn evaluate_at(&self, time: f64) -> PropertySet {
        evaluate(&self.animation.keyframes, time)
    }

    pub fn current_segment(&self) -> Option<Segment<'_>> {
        segment_at(&self.animation.keyframes, self.position)
    }

    /// Playback readout in seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.position / 100.0 * self.animation.duration_seconds
    }

    pub fn export_css(&self) -> String {
        export_css(&self.animation, &self.cfg.css_selector)
    }

    /// Events queued since the last call. Position changes between other
    /// events arrive as a single `TimeChanged`.
    pub fn take_events(&mut self) -> Vec<PlaybackEvent> {
        self.events.drain()
    }

    // ---- animation lifecycle ----

    /// Discard the current animation for a blank one; stops playback and
    /// clears position and selection.
    pub fn new_animation(&mut self) {
        self.pause();
        let end = PropertySet::identity(self.cfg.default_color.clone());
        self.animation = two_keyframe_animation(&self.cfg, "New Animation", end);
        debug!("new animation {}", self.animation.id);
        self.set_position(0.0);
        self.selection.clear();
    }

    /// Replace the animation with a validated snapshot, with the same resets as
    /// [`new_animation`](Self::new_animation).
    pub fn replace_animation(&mut self, animation: Animation) -> Result<(), StudioError> {
        animation.validate_basic()?;
        self.pause();
        self.animation = animation;
        debug!("loaded animation {} ({})", self.animation.id, self.animation.name);
        self.set_position(0.0);
        self.selection.clear();
        Ok(())
    }

    // ---- playback ----

    /// Start playing from the current position. Returns the run's generation,
    /// or `None` if already playing.
    pub fn play(&mut self) -> Option<u64> {
        let now = self.time.now_millis();
        let generation = self.clock.play(now, self.position)?;
        self.events.push(PlaybackEvent::Started {
            generation,
            from: self.position,
        });
        Some(generation)
    }

    /// Stop advancing, keeping the position. No-op when stopped.
    pub fn pause(&mut self) {
        if self.clock.pause() {
            self.events.push(PlaybackEvent::Paused { at: self.position });
        }
    }

    /// Pause and return to 0, from any state.
    pub fn reset(&mut self) {
        self.pause();
        self.set_position(0.0);
        self.events.push(PlaybackEvent::Reset);
    }

    /// Move the cursor without touching the play state.
    ///
    /// While playing, the clock keeps measuring from the original `play()`
    /// start unless `rebase_on_scrub` is configured.
    pub fn set_timeline_position(&mut self, time: f64) {
        self.set_position(time);
        if self.cfg.rebase_on_scrub && self.clock.is_playing() {
            let now = self.time.now_millis();
            self.clock.rebase(now, time);
        }
    }

    /// Pointer scrub: clamp to the timeline, snap to marks, then move the cursor.
    pub fn scrub(&mut self, percent: f64) -> f64 {
        let snapped = snap_to_mark(
            clamp_percent(percent),
            &self.cfg.snap_marks,
            self.cfg.snap_threshold,
        );
        self.set_timeline_position(snapped);
        snapped
    }

    /// Advance the current run using the session's time source.
    pub fn tick(&mut self) -> Option<ClockTick> {
        let now = self.time.now_millis();
        let tick = self.clock.tick(now, self.animation.duration_seconds)?;
        self.apply_tick(tick);
        Some(tick)
    }

    /// Advance only if `generation` is still the current run.
    pub fn tick_generation(&mut self, generation: u64) -> Option<ClockTick> {
        let now = self.time.now_millis();
        let tick =
            self.clock
                .tick_generation(generation, now, self.animation.duration_seconds)?;
        self.apply_tick(tick);
        Some(tick)
    }

    fn apply_tick(&mut self, tick: ClockTick) {
        match tick {
            ClockTick::Advanced(progress) => self.set_position(progress),
            ClockTick::Finished => {
                self.set_position(0.0);
                self.events.push(PlaybackEvent::Looped {
                    generation: self.clock.generation(),
                });
            }
        }
    }

    fn set_position(&mut self, time: f64) {
        let old_time = self.position;
        self.position = time;
        if old_time != time {
            self.events.push(PlaybackEvent::TimeChanged {
                old_time,
                new_time: time,
            });
        }
    }

    // ---- selection ----

    pub fn select_keyframe(&mut self, id: KeyframeId, multi_select: bool) {
        self.selection.select(id, multi_select);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Select a keyframe and move the cursor onto it. Unknown ids are ignored.
    pub fn focus_keyframe(&mut self, id: KeyframeId, multi_select: bool) -> bool {
        let Some(time) = self.animation.keyframe(id).map(|k| k.time) else {
            return false;
        };
        self.selection.select(id, multi_select);
        self.set_timeline_position(time);
        true
    }

    // ---- keyframe edits ----

    /// Add an identity keyframe at `time` and make it the sole selection.
    pub fn add_keyframe(&mut self, time: f64) -> KeyframeId {
        let id = self.animation.add_keyframe(
            time,
            PropertySet::identity(self.cfg.default_color.clone()),
            self.cfg.default_keyframe_easing.clone(),
        );
        self.selection = Selection::single(id);
        id
    }

    /// Remove a keyframe and drop it from the selection. Unknown ids are ignored.
    pub fn remove_keyframe(&mut self, id: KeyframeId) -> Option<Keyframe> {
        self.selection.remove(id);
        self.animation.remove_keyframe(id)
    }

    pub fn update_keyframe_properties(&mut self, id: KeyframeId, patch: &PropertyPatch) -> bool {
        self.animation.update_properties(id, patch)
    }

    pub fn update_keyframe_easing(&mut self, id: KeyframeId, easing: impl Into<String>) -> bool {
        self.animation.update_easing(id, easing)
    }

    /// Set the duration as given. The presentation layer enforces its range.
    pub fn update_duration(&mut self, seconds: f64) {
        self.animation.update_duration(seconds);
    }

    /// Remove the keyframe near `time` (clearing the selection), or add one there.
    pub fn toggle_keyframe_at(&mut self, time: f64) -> KeyframeToggle {
        let near = self
            .animation
            .keyframe_near(time, self.cfg.keyframe_hit_tolerance)
            .map(|k| k.id);
        match near {
            Some(id) => {
                self.animation.remove_keyframe(id);
                self.selection.clear();
                KeyframeToggle::Removed(id)
            }
            None => KeyframeToggle::Added(self.add_keyframe(time)),
        }
    }

    /// Set `easing` on every selected keyframe; returns how many changed.
    pub fn apply_easing_to_selection(&mut self, easing: &str) -> usize {
        let ids: Vec<KeyframeId> = self.selection.ids().to_vec();
        ids.into_iter()
            .filter(|id| self.animation.update_easing(*id, easing))
            .count()
    }
}
