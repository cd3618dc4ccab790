//! Relative-wheel tracking over the absolute slider strip.
//!
//! The pad wheel is reported as an absolute position in `0..=0x3f`.
//! Consumers want relative motion, so the tracker differences successive
//! positions and suppresses jumps at or above the profile threshold —
//! those are finger lift/land bounce, not real motion. The baseline
//! still re-anchors on every in-range reading so a run of suppressed
//! jumps cannot inflate the next delta.

use serde::{Deserialize, Serialize};

/// Stateful delta filter for one device's wheel strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelTracker {
    last_position: i32,
    jump_threshold: i32,
}

impl WheelTracker {
    /// Create a tracker in the reset state.
    pub fn new(jump_threshold: i32) -> Self {
        let mut tracker = Self {
            last_position: 0,
            jump_threshold,
        };
        tracker.reset();
        tracker
    }

    /// Forget the baseline. The sentinel sits strictly below
    /// `-threshold`, so the first reading after a reset always lands in
    /// the suppression window and only establishes the baseline.
    pub fn reset(&mut self) {
        self.last_position = -self.jump_threshold - 1;
    }

    /// Feed one in-range slider position. Returns the delta to emit, or
    /// `None` when the jump was suppressed. The baseline updates either
    /// way.
    pub fn observe(&mut self, position: i32) -> Option<i32> {
        let diff = position - self.last_position;
        self.last_position = position;
        if diff.abs() < self.jump_threshold {
            Some(diff)
        } else {
            None
        }
    }

    pub fn last_position(&self) -> i32 {
        self.last_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_motions_pass() {
        let mut tracker = WheelTracker::new(4);
        assert_eq!(tracker.observe(5), None); // first reading anchors only
        assert_eq!(tracker.observe(8), Some(3));
        assert_eq!(tracker.observe(11), Some(3));
    }

    #[test]
    fn test_jump_suppressed_but_baseline_moves() {
        let mut tracker = WheelTracker::new(10);
        assert_eq!(tracker.observe(5), None);
        assert_eq!(tracker.observe(40), None); // diff 35 >= 10
        assert_eq!(tracker.last_position(), 40);
        assert_eq!(tracker.observe(42), Some(2));
    }

    #[test]
    fn test_sentinel_never_emits_on_first_reading() {
        let mut tracker = WheelTracker::new(4);
        // diff = 0 - (-5) = 5 >= 4, suppressed by construction
        assert_eq!(tracker.observe(0), None);
        assert_eq!(tracker.last_position(), 0);
    }

    #[test]
    fn test_reset_restores_sentinel() {
        let mut tracker = WheelTracker::new(4);
        assert_eq!(tracker.observe(3), None);
        assert_eq!(tracker.observe(4), Some(1));
        tracker.reset();
        assert_eq!(tracker.last_position(), -5);
        assert_eq!(tracker.observe(2), None);
    }

    #[test]
    fn test_reverse_motion() {
        let mut tracker = WheelTracker::new(4);
        tracker.observe(10);
        assert_eq!(tracker.observe(7), Some(-3));
    }
}
