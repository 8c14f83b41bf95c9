// ABOUTME: Debounced two-phase repetition state machine driven by joint angles
// ABOUTME: Hysteresis between up/down thresholds, reps counted on the down-to-up edge only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Repetition state machine
//!
//! The gap between the "up" and "down" thresholds is the debounce: an angle
//! jittering around either threshold can flip the phase at most once until
//! it crosses the opposite threshold.
//!
//! | Direction | Down → Up (counts) | Up → Down |
//! |-----------|--------------------|-----------|
//! | Flexion   | angle < up         | angle > down |
//! | Extension | angle > up         | angle < down |

use coach_core::models::{Direction, ExerciseProfile, JointTracker, KeypointFrame, Phase};

use crate::geometry::observed_angle;

/// Result of feeding one observation to the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepUpdate {
    /// No tracker was observable, or the angle did not cross a threshold
    NoChange,
    /// Phase changed without completing a repetition
    PhaseChanged {
        /// Phase before the observation
        from: Phase,
        /// Phase after the observation
        to: Phase,
    },
    /// The down-to-up edge completed a repetition
    RepCompleted {
        /// Repetition count including this one
        count: u32,
    },
}

/// Phase the counter moves to for `angle`, or `None` to stay put
///
/// Only the exit condition of the current phase is evaluated, so an
/// observation that looks beyond both thresholds never forces a transition
/// the current phase does not allow. A `Neutral` phase settles into whichever
/// side the angle is decisively on.
#[must_use]
pub fn next_phase(phase: Phase, tracker: &JointTracker, angle: f64) -> Option<Phase> {
    let (reached_up, reached_down) = match tracker.direction() {
        Direction::Flexion => (angle < tracker.up_angle(), angle > tracker.down_angle()),
        Direction::Extension => (angle > tracker.up_angle(), angle < tracker.down_angle()),
    };
    match phase {
        Phase::Down => reached_up.then_some(Phase::Up),
        Phase::Up => reached_down.then_some(Phase::Down),
        Phase::Neutral if reached_up => Some(Phase::Up),
        Phase::Neutral if reached_down => Some(Phase::Down),
        Phase::Neutral => None,
    }
}

/// Angle-driven repetition counter for one exercise session
#[derive(Debug, Clone)]
pub struct RepCounter {
    phase: Phase,
    rep_count: u32,
    trackers: Vec<JointTracker>,
}

impl RepCounter {
    /// Counter starting in `start_phase` with zero reps
    #[must_use]
    pub const fn new(start_phase: Phase, trackers: Vec<JointTracker>) -> Self {
        Self {
            phase: start_phase,
            rep_count: 0,
            trackers,
        }
    }

    /// Counter configured from a profile's start state and trackers
    #[must_use]
    pub fn for_profile(profile: &ExerciseProfile) -> Self {
        Self::new(profile.start_state, profile.trackers.clone())
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Repetitions counted so far
    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        self.rep_count
    }

    /// Trackers in the order they are tried
    #[must_use]
    pub fn trackers(&self) -> &[JointTracker] {
        &self.trackers
    }

    /// Feed one keypoint frame
    ///
    /// The first tracker whose three landmarks are all observed supplies the
    /// angle. If none is observable the frame is a no-op.
    pub fn observe(&mut self, frame: &KeypointFrame) -> RepUpdate {
        let phase = self.phase;
        let next = self.trackers.iter().find_map(|tracker| {
            observed_angle(frame, tracker.joints()).map(|angle| next_phase(phase, tracker, angle))
        });
        match next {
            Some(next) => self.transition(next),
            None => RepUpdate::NoChange,
        }
    }

    /// Feed an already computed angle for `tracker`
    pub fn apply_angle(&mut self, tracker: &JointTracker, angle: f64) -> RepUpdate {
        let next = next_phase(self.phase, tracker, angle);
        self.transition(next)
    }

    fn transition(&mut self, next: Option<Phase>) -> RepUpdate {
        let Some(to) = next else {
            return RepUpdate::NoChange;
        };
        let from = self.phase;
        self.phase = to;
        if from == Phase::Down && to == Phase::Up {
            self.rep_count = self.rep_count.saturating_add(1);
            RepUpdate::RepCompleted {
                count: self.rep_count,
            }
        } else {
            RepUpdate::PhaseChanged { from, to }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_core::models::JointTriple;

    fn curl() -> JointTracker {
        JointTracker::flexion(JointTriple::LEFT_ELBOW, 50.0, 160.0).unwrap()
    }

    fn squat() -> JointTracker {
        JointTracker::extension(JointTriple::LEFT_KNEE, 160.0, 80.0).unwrap()
    }

    #[test]
    fn test_flexion_counts_on_down_to_up_edge() {
        let tracker = curl();
        let mut counter = RepCounter::new(Phase::Down, vec![tracker.clone()]);

        assert_eq!(counter.apply_angle(&tracker, 170.0), RepUpdate::NoChange);
        assert_eq!(
            counter.apply_angle(&tracker, 40.0),
            RepUpdate::RepCompleted { count: 1 }
        );
        assert_eq!(
            counter.apply_angle(&tracker, 170.0),
            RepUpdate::PhaseChanged {
                from: Phase::Up,
                to: Phase::Down
            }
        );
        assert_eq!(counter.rep_count(), 1);
    }

    #[test]
    fn test_extension_counts_on_down_to_up_edge() {
        let tracker = squat();
        let mut counter = RepCounter::new(Phase::Up, vec![tracker.clone()]);

        counter.apply_angle(&tracker, 170.0);
        assert_eq!(counter.rep_count(), 0);
        counter.apply_angle(&tracker, 60.0);
        assert_eq!(counter.phase(), Phase::Down);
        assert_eq!(counter.rep_count(), 0);
        counter.apply_angle(&tracker, 170.0);
        assert_eq!(counter.rep_count(), 1);
    }

    #[test]
    fn test_jitter_inside_band_does_not_count() {
        let tracker = squat();
        let mut counter = RepCounter::new(Phase::Down, vec![tracker.clone()]);
        for angle in [100.0, 150.0, 120.0, 159.9, 81.0, 155.0] {
            assert_eq!(counter.apply_angle(&tracker, angle), RepUpdate::NoChange);
        }
        assert_eq!(counter.rep_count(), 0);
    }

    #[test]
    fn test_threshold_values_themselves_do_not_transition() {
        let tracker = curl();
        let mut counter = RepCounter::new(Phase::Down, vec![tracker.clone()]);
        assert_eq!(counter.apply_angle(&tracker, 50.0), RepUpdate::NoChange);
        assert_eq!(counter.phase(), Phase::Down);
    }

    #[test]
    fn test_neutral_settles_without_counting() {
        let tracker = curl();
        let mut counter = RepCounter::new(Phase::Neutral, vec![tracker.clone()]);
        assert_eq!(counter.apply_angle(&tracker, 100.0), RepUpdate::NoChange);
        assert_eq!(
            counter.apply_angle(&tracker, 30.0),
            RepUpdate::PhaseChanged {
                from: Phase::Neutral,
                to: Phase::Up
            }
        );
        assert_eq!(counter.rep_count(), 0);
    }

    #[test]
    fn test_empty_frame_is_noop() {
        let mut counter = RepCounter::new(Phase::Down, vec![curl()]);
        assert_eq!(
            counter.observe(&KeypointFrame::default()),
            RepUpdate::NoChange
        );
        assert_eq!(counter.phase(), Phase::Down);
    }
}
