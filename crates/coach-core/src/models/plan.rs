// ABOUTME: Workout plan models and completion summaries
// ABOUTME: Ordered exercise lists with per-exercise targets, plus calories/duration totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::exercise::Goal;

/// Plan difficulty label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Entry level
    Beginner,
    /// Regular trainees
    Intermediate,
    /// Experienced trainees
    Advanced,
    /// User-composed plan
    Custom,
}

/// One exercise entry in a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanExercise {
    /// Exercise profile id
    pub exercise_id: String,
    /// Name shown for this entry (may differ from the profile name)
    pub name: String,
    /// Rep or duration target
    pub target: Goal,
    /// Number of sets
    pub sets: u32,
    /// Demonstration video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl PlanExercise {
    /// Rep-based entry
    #[must_use]
    pub fn reps(exercise_id: impl Into<String>, name: impl Into<String>, reps: u32, sets: u32) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            name: name.into(),
            target: Goal::Reps(reps),
            sets,
            video_url: None,
        }
    }

    /// Duration-based entry
    #[must_use]
    pub fn timed(
        exercise_id: impl Into<String>,
        name: impl Into<String>,
        seconds: u32,
        sets: u32,
    ) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            name: name.into(),
            target: Goal::Duration(seconds),
            sets,
            video_url: None,
        }
    }

    /// Attach a demonstration video
    #[must_use]
    pub fn with_video(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }
}

/// Ordered sequence of exercises executed one after another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    /// Plan identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Catalog category (e.g. "full_body")
    pub category: String,
    /// Difficulty label
    pub difficulty: Difficulty,
    /// Short description
    pub description: String,
    /// Exercises in execution order
    pub exercises: Vec<PlanExercise>,
    /// Expected length in minutes
    pub estimated_minutes: u32,
    /// Expected energy expenditure
    pub estimated_calories: f64,
}

/// Record of one finished exercise inside a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedExercise {
    /// Session that performed the exercise
    pub session_id: Uuid,
    /// Exercise profile id
    pub exercise_id: String,
    /// Target the session was evaluated against
    pub goal: Goal,
    /// Reps for rep goals, seconds for duration goals
    pub units_performed: u32,
    /// Repetitions counted during the session
    pub rep_count: u32,
    /// Seconds elapsed during the session
    pub elapsed_seconds: u32,
    /// `units_performed` times the profile's calories per unit
    pub calories: f64,
    /// Whether the goal was reached
    pub goal_reached: bool,
}

/// Totals emitted when the last exercise of a plan is finished
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    /// Plan that was completed
    pub plan_id: String,
    /// Per-exercise records in execution order
    pub exercises: Vec<CompletedExercise>,
    /// Sum of per-exercise calories
    pub total_calories: f64,
    /// Sum of per-exercise elapsed seconds
    pub total_duration_seconds: u32,
    /// When the workout finished
    pub completed_at: DateTime<Utc>,
}

impl WorkoutSummary {
    /// Build totals from the completed exercises
    #[must_use]
    pub fn from_exercises(plan_id: impl Into<String>, exercises: Vec<CompletedExercise>) -> Self {
        let total_calories = exercises.iter().map(|ex| ex.calories).sum();
        let total_duration_seconds = exercises
            .iter()
            .map(|ex| ex.elapsed_seconds)
            .fold(0_u32, u32::saturating_add);
        Self {
            plan_id: plan_id.into(),
            exercises,
            total_calories,
            total_duration_seconds,
            completed_at: Utc::now(),
        }
    }
}
