//! Interpolation engine: property values at any timeline position.
//!
//! Model:
//! - Keyframes are sorted by time on every call; storage order is never trusted.
//! - prev = last keyframe with time <= t, next = first keyframe with time > t.
//! - Before the first keyframe the first keyframe holds; at or after the last
//!   keyframe the last one holds.
//! - Inside a segment numeric channels blend linearly in time. Scale channels
//!   blend on their decimal fraction (value / 100). Color holds prev's value.
//! - Keyframe easing is carried for the CSS export only and never applied here.
//!
//! With several keyframes at the same time, the stable sort keeps insertion
//! order, so the last inserted one is prev at that time. next always has a
//! strictly greater time, so the progress denominator is never zero. The first
//! inserted keyframe at a shared time is only reached as the left-hand limit of
//! the segment that ends there.

use crate::data::{Channel, Keyframe, PropertySet};

/// The bracketing keyframes of a timeline position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment<'a> {
    /// Before the first keyframe: holds the first keyframe.
    Before(&'a Keyframe),
    /// Inside a segment, with `progress` in [0, 1).
    Between {
        prev: &'a Keyframe,
        next: &'a Keyframe,
        progress: f64,
    },
    /// At or after the last keyframe: holds the last keyframe.
    After(&'a Keyframe),
}

impl<'a> Segment<'a> {
    /// Easing that governs this position in the exported CSS, if any.
    pub fn easing(&self) -> Option<&'a str> {
        match self {
            Segment::Between { next, .. } => next.easing.as_deref(),
            _ => None,
        }
    }
}

fn sorted(keyframes: &[Keyframe]) -> Vec<&Keyframe> {
    let mut sorted: Vec<&Keyframe> = keyframes.iter().collect();
    sorted.sort_by(|a, b| a.time.total_cmp(&b.time));
    sorted
}

/// Locate the segment containing `time`. `None` when there are no keyframes.
pub fn segment_at(keyframes: &[Keyframe], time: f64) -> Option<Segment<'_>> {
    let sorted = sorted(keyframes);
    let first = *sorted.first()?;

    // Number of keyframes with kf.time <= time.
    let split = sorted.partition_point(|k| k.time <= time);
    if split == 0 {
        return Some(Segment::Before(first));
    }
    let prev = sorted[split - 1];
    match sorted.get(split) {
        None => Some(Segment::After(prev)),
        Some(&next) => {
            let progress = (time - prev.time) / (next.time - prev.time);
            Some(Segment::Between {
                prev,
                next,
                progress,
            })
        }
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn blend(prev: &PropertySet, next: &PropertySet, progress: f64) -> PropertySet {
    let mut out = PropertySet::identity(prev.color.clone());
    for channel in Channel::ALL {
        let (a, b) = (prev.get(channel), next.get(channel));
        let value = if channel.is_percent_scale() {
            lerp(a / 100.0, b / 100.0, progress) * 100.0
        } else {
            lerp(a, b, progress)
        };
        out.set(channel, value);
    }
    out
}

/// Property values at timeline position `time` (percent).
///
/// Pure: the same inputs always produce the same output. An empty slice yields
/// the identity property set.
pub fn evaluate(keyframes: &[Keyframe], time: f64) -> PropertySet {
    match segment_at(keyframes, time) {
        None => PropertySet::default(),
        Some(Segment::Before(kf)) | Some(Segment::After(kf)) => kf.properties.clone(),
        Some(Segment::Between { prev, .. }) if prev.time == time => prev.properties.clone(),
        Some(Segment::Between {
            prev,
            next,
            progress,
        }) => blend(&prev.properties, &next.properties, progress),
    }
}
