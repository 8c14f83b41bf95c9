// ABOUTME: Shared helpers for rep coach integration tests
// ABOUTME: Quiet logging setup, synthetic poses, single-exercise plans, and recordings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(dead_code, missing_docs)]

use std::env;
use std::sync::Once;

use rep_coach::detection::replay::{synthetic_pose, RecordedEntry, Recording};
use rep_coach::models::{
    Difficulty, Goal, JointTriple, KeypointFrame, PlanExercise, WorkoutPlan,
};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };
        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Frame whose `joints` form `angle` degrees, fully confident
pub fn pose_frame(joints: &JointTriple, angle: f64) -> KeypointFrame {
    KeypointFrame::new(synthetic_pose(joints, angle, 0.9))
}

/// Frame whose `joints` form `angle` degrees at the given confidence
pub fn pose_frame_with_confidence(joints: &JointTriple, angle: f64, confidence: f64) -> KeypointFrame {
    KeypointFrame::new(synthetic_pose(joints, angle, confidence))
}

/// Plan with the given entries
pub fn plan_of(exercises: Vec<PlanExercise>) -> WorkoutPlan {
    WorkoutPlan {
        id: "test_plan".into(),
        name: "Test Plan".into(),
        category: "test".into(),
        difficulty: Difficulty::Custom,
        description: "Integration test plan".into(),
        exercises,
        estimated_minutes: 1,
        estimated_calories: 1.0,
    }
}

/// Plan with a single exercise and goal
pub fn single_exercise_plan(exercise_id: &str, goal: Goal) -> WorkoutPlan {
    let entry = match goal {
        Goal::Reps(reps) => PlanExercise::reps(exercise_id, exercise_id, reps, 1),
        Goal::Duration(seconds) => PlanExercise::timed(exercise_id, exercise_id, seconds, 1),
    };
    plan_of(vec![entry])
}

/// Recording of one pose per angle
pub fn recording_from_angles(joints: &JointTriple, angles: &[f64]) -> Recording {
    Recording::new(
        angles
            .iter()
            .map(|angle| RecordedEntry::Pose {
                keypoints: synthetic_pose(joints, *angle, 0.9),
            })
            .collect(),
    )
}
