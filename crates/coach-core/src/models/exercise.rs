// ABOUTME: Exercise profile models describing how each movement is tracked
// ABOUTME: Phases, direction categories, joint trackers with threshold invariants, and goals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use super::keypoint::Landmark;
use crate::errors::{AppError, AppResult};

/// Discrete movement phase tracked by the rep counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Top of the movement (curled arm, standing body)
    Up,
    /// Bottom of the movement (extended arm, bent knees)
    Down,
    /// No angle-based phase; isometric or not yet settled
    Neutral,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
            Self::Neutral => f.write_str("neutral"),
        }
    }
}

/// Which way the tracked joint angle moves to reach the "up" phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Angle decreases toward "up" (curls, presses, pulls)
    Flexion,
    /// Angle increases toward "up" (squats, lunges, push-ups)
    Extension,
}

/// Three landmarks whose middle point is the measured joint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JointTriple {
    /// Landmark on the body side of the joint
    pub proximal: Landmark,
    /// The joint itself
    pub vertex: Landmark,
    /// Landmark on the limb side of the joint
    pub distal: Landmark,
}

impl JointTriple {
    /// Left shoulder, elbow, wrist
    pub const LEFT_ELBOW: Self = Self {
        proximal: Landmark::LeftShoulder,
        vertex: Landmark::LeftElbow,
        distal: Landmark::LeftWrist,
    };

    /// Left hip, knee, ankle
    pub const LEFT_KNEE: Self = Self {
        proximal: Landmark::LeftHip,
        vertex: Landmark::LeftKnee,
        distal: Landmark::LeftAnkle,
    };
}

impl fmt::Display for JointTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.proximal, self.vertex, self.distal)
    }
}

/// One joint angle with the thresholds that delimit its phases
///
/// Construction enforces the threshold ordering for the direction category,
/// so a tracker held by the counter can never describe an impossible cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TrackerFields")]
pub struct JointTracker {
    joints: JointTriple,
    direction: Direction,
    up_angle: f64,
    down_angle: f64,
}

impl JointTracker {
    /// Create a tracker after checking thresholds
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if an angle is outside [0, 180] or the
    /// thresholds are ordered against the direction category.
    pub fn new(
        joints: JointTriple,
        direction: Direction,
        up_angle: f64,
        down_angle: f64,
    ) -> AppResult<Self> {
        for angle in [up_angle, down_angle] {
            if !(0.0..=180.0).contains(&angle) {
                return Err(AppError::config_invalid(format!(
                    "threshold {angle} for joint {joints} is outside 0..=180 degrees"
                )));
            }
        }
        let ordered = match direction {
            Direction::Flexion => up_angle < down_angle,
            Direction::Extension => up_angle > down_angle,
        };
        if !ordered {
            return Err(AppError::config_invalid(format!(
                "{direction:?} tracker for {joints} needs thresholds ordered for its direction, got up={up_angle} down={down_angle}"
            )));
        }
        Ok(Self {
            joints,
            direction,
            up_angle,
            down_angle,
        })
    }

    /// Flexion tracker (angle decreases to reach "up")
    ///
    /// # Errors
    ///
    /// See [`JointTracker::new`].
    pub fn flexion(joints: JointTriple, up_angle: f64, down_angle: f64) -> AppResult<Self> {
        Self::new(joints, Direction::Flexion, up_angle, down_angle)
    }

    /// Extension tracker (angle increases to reach "up")
    ///
    /// # Errors
    ///
    /// See [`JointTracker::new`].
    pub fn extension(joints: JointTriple, up_angle: f64, down_angle: f64) -> AppResult<Self> {
        Self::new(joints, Direction::Extension, up_angle, down_angle)
    }

    /// Landmarks measured by this tracker
    #[must_use]
    pub const fn joints(&self) -> &JointTriple {
        &self.joints
    }

    /// Direction category
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Threshold for entering "up"
    #[must_use]
    pub const fn up_angle(&self) -> f64 {
        self.up_angle
    }

    /// Threshold for entering "down"
    #[must_use]
    pub const fn down_angle(&self) -> f64 {
        self.down_angle
    }
}

/// Unchecked tracker fields as they appear in serialized profiles
#[derive(Deserialize)]
struct TrackerFields {
    joints: JointTriple,
    direction: Direction,
    up_angle: f64,
    down_angle: f64,
}

impl TryFrom<TrackerFields> for JointTracker {
    type Error = AppError;

    fn try_from(fields: TrackerFields) -> AppResult<Self> {
        Self::new(
            fields.joints,
            fields.direction,
            fields.up_angle,
            fields.down_angle,
        )
    }
}

/// Biomechanical thresholds and metadata for one exercise type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseProfile {
    /// Stable identifier (e.g. "squat")
    pub id: String,
    /// Human-readable name
    pub display_name: String,
    /// Phase a fresh session begins in
    pub start_state: Phase,
    /// Joint trackers tried in order; empty for isometric/duration exercises
    pub trackers: Vec<JointTracker>,
    /// Energy estimate per repetition or per second
    pub calories_per_unit: f64,
    /// Coaching cue shown to the user
    pub instructions: String,
    /// Muscle groups worked
    pub muscles: String,
}

impl ExerciseProfile {
    /// Create a profile with empty metadata
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        start_state: Phase,
        trackers: Vec<JointTracker>,
        calories_per_unit: f64,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            start_state,
            trackers,
            calories_per_unit,
            instructions: String::new(),
            muscles: String::new(),
        }
    }

    /// Attach coaching instructions
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Attach the muscle groups worked
    #[must_use]
    pub fn with_muscles(mut self, muscles: impl Into<String>) -> Self {
        self.muscles = muscles.into();
        self
    }

    /// Whether this exercise has no angle-based counting
    #[must_use]
    pub fn is_isometric(&self) -> bool {
        self.trackers.is_empty()
    }

    /// First tracker, whose thresholds describe the exercise
    #[must_use]
    pub fn primary_tracker(&self) -> Option<&JointTracker> {
        self.trackers.first()
    }
}

/// Target a session must reach to be considered complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Number of repetitions
    Reps(u32),
    /// Hold or activity duration in seconds
    Duration(u32),
}

impl Goal {
    /// Target value (reps or seconds)
    #[must_use]
    pub const fn value(&self) -> u32 {
        match self {
            Self::Reps(value) | Self::Duration(value) => *value,
        }
    }

    /// Same kind of goal with a different target
    #[must_use]
    pub const fn with_value(&self, value: u32) -> Self {
        match self {
            Self::Reps(_) => Self::Reps(value),
            Self::Duration(_) => Self::Duration(value),
        }
    }

    /// Whether the goal is measured in elapsed seconds
    #[must_use]
    pub const fn is_duration(&self) -> bool {
        matches!(self, Self::Duration(_))
    }

    /// Check that the target is positive
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the target is zero.
    pub fn validate(&self) -> AppResult<()> {
        if self.value() == 0 {
            return Err(AppError::invalid_input(format!(
                "goal must be greater than zero, got {self}"
            )));
        }
        Ok(())
    }

    /// Whether the given progress satisfies this goal
    #[must_use]
    pub const fn is_met(&self, rep_count: u32, elapsed_seconds: u32) -> bool {
        match self {
            Self::Reps(target) => rep_count >= *target,
            Self::Duration(target) => elapsed_seconds >= *target,
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reps(reps) => write!(f, "{reps} reps"),
            Self::Duration(seconds) => write!(f, "{seconds}s"),
        }
    }
}
