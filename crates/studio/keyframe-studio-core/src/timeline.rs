//! Timeline position helpers used when scrubbing.

/// Clamp a position to the [0, 100] timeline.
#[inline]
pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

/// Snap to the first mark within `threshold` (inclusive), else return `percent`.
pub fn snap_to_mark(percent: f64, marks: &[f64], threshold: f64) -> f64 {
    marks
        .iter()
        .copied()
        .find(|mark| (percent - mark).abs() <= threshold)
        .unwrap_or(percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKS: [f64; 5] = [0.0, 25.0, 50.0, 75.0, 100.0];

    #[test]
    fn snaps_within_threshold() {
        assert_eq!(snap_to_mark(23.0, &MARKS, 5.0), 25.0);
        assert_eq!(snap_to_mark(80.0, &MARKS, 5.0), 75.0);
        assert_eq!(snap_to_mark(96.0, &MARKS, 5.0), 100.0);
    }

    #[test]
    fn leaves_far_positions_alone() {
        assert_eq!(snap_to_mark(37.5, &MARKS, 5.0), 37.5);
        assert_eq!(snap_to_mark(23.0, &MARKS, 0.0), 23.0);
    }

    #[test]
    fn clamps_and_handles_nan() {
        assert_eq!(clamp_percent(-3.0), 0.0);
        assert_eq!(clamp_percent(140.0), 100.0);
        assert_eq!(clamp_percent(f64::NAN), 0.0);
    }
}
