//! Half-open time intervals and the primitive operations on them

use serde::{Deserialize, Serialize};

/// Guard against division by zero for degenerate (zero-length) intervals.
const EPSILON: f64 = 1e-6;

/// A half-open time interval `[start, end)` in seconds.
///
/// Invariant: `end >= start >= 0`. The constructor clamps rather than
/// panics, so an interval is always well-formed once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl TimeInterval {
    /// Build an interval, clamping negative times to zero and an end
    /// before the start up to the start.
    pub fn new(start: f64, end: f64) -> Self {
        let start = start.max(0.0);
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Length of the interval in seconds
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Midpoint of the interval
    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Whether a timestamp falls inside the interval
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }

    /// Length of the intersection with another interval, 0 if disjoint
    pub fn overlap(&self, other: &TimeInterval) -> f64 {
        (self.end.min(other.end) - self.start.max(other.start)).max(0.0)
    }

    /// Fraction of `self` covered by `other` (0.0 - 1.0).
    ///
    /// Degenerate zero-length intervals are treated as epsilon-long so the
    /// result stays finite; a zero-length span inside `other` reports 1.0.
    pub fn overlap_fraction(&self, other: &TimeInterval) -> f64 {
        if self.length() < EPSILON {
            return if other.contains(self.start) { 1.0 } else { 0.0 };
        }
        (self.overlap(other) / self.length()).min(1.0)
    }

    /// Absolute distance from a timestamp to the interval, 0 if inside
    pub fn distance_to(&self, t: f64) -> f64 {
        if self.contains(t) {
            0.0
        } else {
            (t - self.start).abs().min((t - self.end).abs())
        }
    }
}

/// Minimal distance from a timestamp to any interval boundary.
///
/// Returns `None` for an empty sequence.
pub fn distance_to_nearest(t: f64, intervals: &[TimeInterval]) -> Option<f64> {
    intervals
        .iter()
        .map(|iv| iv.distance_to(t))
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}

/// Index of the interval nearest to a timestamp.
///
/// Ties resolve to the earliest interval in the sequence, which keeps the
/// result deterministic for identical inputs.
pub fn nearest_interval(t: f64, intervals: &[TimeInterval]) -> Option<usize> {
    intervals
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.distance_to(t)
                .partial_cmp(&b.distance_to(t))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_disjoint() {
        let a = TimeInterval::new(0.0, 1.0);
        let b = TimeInterval::new(2.0, 3.0);
        assert_eq!(a.overlap(&b), 0.0);
        assert_eq!(b.overlap(&a), 0.0);
    }

    #[test]
    fn test_overlap_partial() {
        let a = TimeInterval::new(0.0, 2.0);
        let b = TimeInterval::new(1.0, 3.0);
        assert!((a.overlap(&b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_fraction() {
        let span = TimeInterval::new(1.0, 3.0);
        let turn = TimeInterval::new(0.0, 2.0);
        assert!((span.overlap_fraction(&turn) - 0.5).abs() < 1e-9);

        let full = TimeInterval::new(0.0, 10.0);
        assert!((span.overlap_fraction(&full) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_fraction_zero_length_span() {
        let point = TimeInterval::new(1.5, 1.5);
        let turn = TimeInterval::new(1.0, 2.0);
        assert_eq!(point.overlap_fraction(&turn), 1.0);

        let elsewhere = TimeInterval::new(3.0, 4.0);
        assert_eq!(point.overlap_fraction(&elsewhere), 0.0);
    }

    #[test]
    fn test_new_clamps() {
        let iv = TimeInterval::new(-1.0, -2.0);
        assert_eq!(iv.start, 0.0);
        assert_eq!(iv.end, 0.0);

        let iv = TimeInterval::new(3.0, 2.0);
        assert_eq!(iv.end, 3.0);
    }

    #[test]
    fn test_distance_to() {
        let iv = TimeInterval::new(1.0, 2.0);
        assert_eq!(iv.distance_to(1.5), 0.0);
        assert!((iv.distance_to(0.5) - 0.5).abs() < 1e-9);
        assert!((iv.distance_to(2.25) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_interval_prefers_earliest_on_tie() {
        let intervals = vec![TimeInterval::new(0.0, 1.0), TimeInterval::new(2.0, 3.0)];
        // 1.5 is 0.5 away from both boundaries
        assert_eq!(nearest_interval(1.5, &intervals), Some(0));
        assert_eq!(nearest_interval(2.5, &intervals), Some(1));
        assert_eq!(nearest_interval(0.0, &[]), None);
    }

    #[test]
    fn test_distance_to_nearest() {
        let intervals = vec![TimeInterval::new(0.0, 1.0), TimeInterval::new(4.0, 5.0)];
        assert!((distance_to_nearest(2.0, &intervals).unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(distance_to_nearest(2.0, &[]), None);
    }
}
