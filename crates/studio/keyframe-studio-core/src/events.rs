//! Playback events queued by the session for presentation collaborators.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Discrete signals emitted by play/pause/reset, scrubbing and ticks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
#[non_exhaustive]
pub enum PlaybackEvent {
    Started { generation: u64, from: f64 },
    Paused { at: f64 },
    Reset,
    TimeChanged { old_time: f64, new_time: f64 },
    /// Playback reached 100% and the position wrapped back to 0.
    Looped { generation: u64 },
}

/// Most events kept between drains; the oldest are dropped first.
pub const MAX_QUEUED_EVENTS: usize = 256;

/// Event queue drained by the caller.
///
/// Consecutive `TimeChanged` events collapse into one spanning the first
/// `old_time` and the latest `new_time`, so an undrained queue stays bounded
/// while playback ticks.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: VecDeque<PlaybackEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: PlaybackEvent) {
        if let PlaybackEvent::TimeChanged { new_time, .. } = event {
            if let Some(PlaybackEvent::TimeChanged {
                old_time,
                new_time: last,
            }) = self.events.back_mut()
            {
                if *old_time == new_time {
                    self.events.pop_back();
                } else {
                    *last = new_time;
                }
                return;
            }
        }
        if self.events.len() == MAX_QUEUED_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    #[inline]
    pub fn drain(&mut self) -> Vec<PlaybackEvent> {
        self.events.drain(..).collect()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_value(PlaybackEvent::Looped { generation: 3 }).unwrap();
        assert_eq!(json["type"], "looped");
        assert_eq!(json["generation"], 3);
    }

    #[test]
    fn drain_empties_queue() {
        let mut q = EventQueue::default();
        q.push(PlaybackEvent::Reset);
        assert_eq!(q.drain(), vec![PlaybackEvent::Reset]);
        assert!(q.is_empty());
    }

    #[test]
    fn consecutive_time_changes_collapse() {
        let mut q = EventQueue::default();
        q.push(PlaybackEvent::Started {
            generation: 1,
            from: 0.0,
        });
        for step in 1..=1000 {
            q.push(PlaybackEvent::TimeChanged {
                old_time: (step - 1) as f64 * 0.1,
                new_time: step as f64 * 0.1,
            });
        }
        assert_eq!(q.len(), 2);
        match q.drain()[1] {
            PlaybackEvent::TimeChanged { old_time, new_time } => {
                assert_eq!(old_time, 0.0);
                assert!((new_time - 100.0).abs() < 1e-9);
            }
            ref other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn time_change_back_to_start_cancels_out() {
        let mut q = EventQueue::default();
        q.push(PlaybackEvent::TimeChanged {
            old_time: 10.0,
            new_time: 20.0,
        });
        q.push(PlaybackEvent::TimeChanged {
            old_time: 20.0,
            new_time: 10.0,
        });
        assert!(q.is_empty());
    }

    #[test]
    fn oldest_events_drop_at_capacity() {
        let mut q = EventQueue::default();
        for generation in 0..(MAX_QUEUED_EVENTS as u64 + 10) {
            q.push(PlaybackEvent::Looped { generation });
        }
        let events = q.drain();
        assert_eq!(events.len(), MAX_QUEUED_EVENTS);
        assert_eq!(events[0], PlaybackEvent::Looped { generation: 10 });
    }
}
