// ABOUTME: Core data models for pose-driven repetition counting
// ABOUTME: Re-exports keypoint, exercise profile, goal, and workout plan types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data models shared by the algorithm crate and the session runtime

/// Keypoints and per-frame pose observations
pub mod keypoint;

/// Exercise profiles, joint trackers, phases, and goals
pub mod exercise;

/// Workout plans and completion summaries
pub mod plan;

pub use exercise::{Direction, ExerciseProfile, Goal, JointTracker, JointTriple, Phase};
pub use keypoint::{Keypoint, KeypointFrame, Landmark};
pub use plan::{CompletedExercise, Difficulty, PlanExercise, WorkoutPlan, WorkoutSummary};
