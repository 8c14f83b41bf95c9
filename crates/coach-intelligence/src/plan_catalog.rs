// ABOUTME: Built-in workout plan catalog and custom plan builder
// ABOUTME: Validates user-composed entries and estimates plan length and energy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use coach_core::constants::{calories::DEFAULT_CALORIES_PER_UNIT, exercise_ids, plans};
use coach_core::errors::{AppError, AppResult};
use coach_core::models::{Difficulty, Goal, PlanExercise, WorkoutPlan};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::ExerciseCatalog;

const SQUAT_VIDEO: &str = "https://www.youtube.com/watch?v=aclHkVaku9U";
const PUSH_UP_VIDEO: &str = "https://www.youtube.com/watch?v=IODxDxX7oi4";
const PULL_UP_VIDEO: &str = "https://www.youtube.com/watch?v=eGo4IYlbE5g";
const SHOULDER_PRESS_VIDEO: &str = "https://www.youtube.com/watch?v=qEwKCR5JCog";
const LUNGE_VIDEO: &str = "https://www.youtube.com/watch?v=QOVaHwm-Q6U";
const BICEP_CURL_VIDEO: &str = "https://www.youtube.com/watch?v=ykJmrZ5v0Oo";

/// Every built-in plan, grouped by category in display order
#[must_use]
pub fn builtin_plans() -> Vec<WorkoutPlan> {
    use exercise_ids::{
        BICEP_CURL, BURPEES, JUMPING_JACKS, LUNGE, MOUNTAIN_CLIMBERS, PLANK, PULL_UP, PUSH_UP,
        SHOULDER_PRESS, SQUAT,
    };

    vec![
        WorkoutPlan {
            id: "beginner_fullbody".into(),
            name: "Beginner Full Body".into(),
            category: "full_body".into(),
            difficulty: Difficulty::Beginner,
            description: "Perfect for starters - builds foundational strength".into(),
            exercises: vec![
                PlanExercise::reps(SQUAT, "Bodyweight Squat", 12, 3).with_video(SQUAT_VIDEO),
                PlanExercise::reps(PUSH_UP, "Knee Push-ups", 8, 3)
                    .with_video("https://www.youtube.com/watch?v=eFOSh8vpd8I"),
                PlanExercise::timed(PLANK, "Plank", 30, 3),
            ],
            estimated_minutes: 20,
            estimated_calories: 180.0,
        },
        WorkoutPlan {
            id: "intermediate_fullbody".into(),
            name: "Intermediate Full Body".into(),
            category: "full_body".into(),
            difficulty: Difficulty::Intermediate,
            description: "Challenging full body routine".into(),
            exercises: vec![
                PlanExercise::reps(SQUAT, "Squats", 15, 4).with_video(SQUAT_VIDEO),
                PlanExercise::reps(PUSH_UP, "Push-ups", 12, 4).with_video(PUSH_UP_VIDEO),
                PlanExercise::reps(PULL_UP, "Assisted Pull-ups", 6, 3).with_video(PULL_UP_VIDEO),
                PlanExercise::timed(PLANK, "Plank", 45, 3),
            ],
            estimated_minutes: 30,
            estimated_calories: 250.0,
        },
        WorkoutPlan {
            id: "intermediate_ppl".into(),
            name: "PPL Split".into(),
            category: "push_pull_legs".into(),
            difficulty: Difficulty::Intermediate,
            description: "Classic push, pull, legs split for balanced development".into(),
            exercises: vec![
                PlanExercise::reps(PUSH_UP, "Push-ups", 12, 4).with_video(PUSH_UP_VIDEO),
                PlanExercise::reps(SHOULDER_PRESS, "Shoulder Press", 10, 3)
                    .with_video(SHOULDER_PRESS_VIDEO),
                PlanExercise::reps(PULL_UP, "Pull-ups", 8, 3).with_video(PULL_UP_VIDEO),
                PlanExercise::reps(SQUAT, "Squats", 12, 3).with_video(SQUAT_VIDEO),
                PlanExercise::reps(LUNGE, "Lunges", 10, 3).with_video(LUNGE_VIDEO),
            ],
            estimated_minutes: 45,
            estimated_calories: 300.0,
        },
        WorkoutPlan {
            id: "advanced_ppl".into(),
            name: "Advanced PPL".into(),
            category: "push_pull_legs".into(),
            difficulty: Difficulty::Advanced,
            description: "Intensive push/pull/legs for advanced lifters".into(),
            exercises: vec![
                PlanExercise::reps(PUSH_UP, "Weighted Push-ups", 10, 4)
                    .with_video("https://www.youtube.com/watch?v=G1dS8iLzS9A"),
                PlanExercise::reps(PULL_UP, "Weighted Pull-ups", 6, 4)
                    .with_video("https://www.youtube.com/watch?v=Hdc7Mw6BIEE"),
                PlanExercise::reps(SQUAT, "Bulgarian Split Squats", 10, 3)
                    .with_video("https://www.youtube.com/watch?v=2C-uNgKwPLE"),
            ],
            estimated_minutes: 50,
            estimated_calories: 350.0,
        },
        WorkoutPlan {
            id: "intermediate_upper_lower".into(),
            name: "Upper/Lower Split".into(),
            category: "upper_lower".into(),
            difficulty: Difficulty::Intermediate,
            description: "Balanced upper and lower body focus".into(),
            exercises: vec![
                PlanExercise::reps(PUSH_UP, "Push-ups", 15, 4).with_video(PUSH_UP_VIDEO),
                PlanExercise::reps(BICEP_CURL, "Bicep Curls", 12, 3).with_video(BICEP_CURL_VIDEO),
                PlanExercise::reps(SQUAT, "Squats", 15, 4).with_video(SQUAT_VIDEO),
                PlanExercise::reps(LUNGE, "Lunges", 12, 3).with_video(LUNGE_VIDEO),
            ],
            estimated_minutes: 50,
            estimated_calories: 320.0,
        },
        WorkoutPlan {
            id: "advanced_upper_lower".into(),
            name: "Advanced Upper/Lower".into(),
            category: "upper_lower".into(),
            difficulty: Difficulty::Advanced,
            description: "High intensity upper/lower split".into(),
            exercises: vec![
                PlanExercise::reps(PULL_UP, "Wide Grip Pull-ups", 10, 4)
                    .with_video("https://www.youtube.com/watch?v=Hdc7Mw6BIEE"),
                PlanExercise::reps(PUSH_UP, "Archer Push-ups", 8, 3)
                    .with_video("https://www.youtube.com/watch?v=9u5HzYgtf7E"),
                PlanExercise::reps(SQUAT, "Jump Squats", 15, 3)
                    .with_video("https://www.youtube.com/watch?v=CVaEhXotL7M"),
            ],
            estimated_minutes: 55,
            estimated_calories: 380.0,
        },
        WorkoutPlan {
            id: "hiit".into(),
            name: "HIIT Circuit".into(),
            category: "cardio".into(),
            difficulty: Difficulty::Intermediate,
            description: "High intensity interval training".into(),
            exercises: vec![
                PlanExercise::timed(JUMPING_JACKS, "Jumping Jacks", 30, 3)
                    .with_video("https://www.youtube.com/watch?v=iSSAk4XCsRA"),
                PlanExercise::reps(BURPEES, "Burpees", 10, 3)
                    .with_video("https://www.youtube.com/watch?v=TU8QYVW0gDU"),
                PlanExercise::timed(MOUNTAIN_CLIMBERS, "Mountain Climbers", 30, 3)
                    .with_video("https://www.youtube.com/watch?v=nmwgirgXLYM"),
            ],
            estimated_minutes: 20,
            estimated_calories: 250.0,
        },
        WorkoutPlan {
            id: "individual_exercises".into(),
            name: "Individual Exercises".into(),
            category: "individual".into(),
            difficulty: Difficulty::Custom,
            description: "Practice specific exercises with custom rep goals".into(),
            exercises: vec![
                PlanExercise::reps(BICEP_CURL, "Bicep Curls", 10, 3).with_video(BICEP_CURL_VIDEO),
                PlanExercise::reps(SQUAT, "Squats", 12, 3).with_video(SQUAT_VIDEO),
                PlanExercise::reps(SHOULDER_PRESS, "Shoulder Press", 10, 3)
                    .with_video(SHOULDER_PRESS_VIDEO),
                PlanExercise::reps(PUSH_UP, "Push-ups", 10, 3).with_video(PUSH_UP_VIDEO),
            ],
            estimated_minutes: 20,
            estimated_calories: 200.0,
        },
    ]
}

/// Built-in plan by id
///
/// # Errors
///
/// Returns `ResourceNotFound` if no built-in plan has this id.
pub fn find_plan(id: &str) -> AppResult<WorkoutPlan> {
    builtin_plans()
        .into_iter()
        .find(|plan| plan.id == id)
        .ok_or_else(|| AppError::not_found(format!("workout plan '{id}'")))
}

/// One user-composed entry before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEntry {
    /// Exercise profile id
    pub exercise_id: String,
    /// Target repetitions, zero when the entry is timed
    #[serde(default)]
    pub reps: u32,
    /// Target seconds, zero when the entry counts reps
    #[serde(default)]
    pub duration_seconds: u32,
    /// Number of sets
    #[serde(default = "default_sets")]
    pub sets: u32,
}

const fn default_sets() -> u32 {
    plans::DEFAULT_SETS
}

impl CustomEntry {
    /// Rep target wins when both targets are set
    const fn target(&self) -> Option<Goal> {
        if self.reps > 0 {
            Some(Goal::Reps(self.reps))
        } else if self.duration_seconds > 0 {
            Some(Goal::Duration(self.duration_seconds))
        } else {
            None
        }
    }
}

/// Build a custom plan from user entries
///
/// Entries whose exercise has no registered profile, that have no positive
/// target, or that have zero sets are dropped.
///
/// # Errors
///
/// Returns `InvalidInput` if no entry survives validation.
pub fn build_custom_plan(catalog: &ExerciseCatalog, entries: &[CustomEntry]) -> AppResult<WorkoutPlan> {
    let exercises: Vec<PlanExercise> = entries
        .iter()
        .filter_map(|entry| {
            let Some(profile) = catalog.get(&entry.exercise_id) else {
                debug!(exercise.id = %entry.exercise_id, "Dropping custom entry with unknown exercise");
                return None;
            };
            let target = entry.target().filter(|_| entry.sets > 0)?;
            Some(PlanExercise {
                exercise_id: entry.exercise_id.clone(),
                name: profile.display_name.clone(),
                target,
                sets: entry.sets,
                video_url: None,
            })
        })
        .collect();

    if exercises.is_empty() {
        return Err(AppError::invalid_input(
            "custom workout needs at least one known exercise with a positive rep or duration target and at least one set",
        ));
    }

    let estimated_seconds = exercises
        .iter()
        .map(estimated_seconds)
        .fold(0_u32, u32::saturating_add);
    let estimated_calories = exercises
        .iter()
        .map(|exercise| {
            let per_unit = catalog
                .get(&exercise.exercise_id)
                .map_or(DEFAULT_CALORIES_PER_UNIT, |profile| profile.calories_per_unit);
            per_unit * f64::from(exercise.target.value()) * f64::from(exercise.sets)
        })
        .sum();

    let plan = WorkoutPlan {
        id: format!("{}{}", plans::CUSTOM_PLAN_PREFIX, Utc::now().timestamp_millis()),
        name: "Custom Workout".into(),
        category: "custom".into(),
        difficulty: Difficulty::Custom,
        description: "User-composed workout".into(),
        exercises,
        estimated_minutes: estimated_seconds.div_ceil(60),
        estimated_calories,
    };
    info!(
        plan.id = %plan.id,
        exercises = plan.exercises.len(),
        dropped = entries.len() - plan.exercises.len(),
        "Custom workout plan built"
    );
    Ok(plan)
}

/// Seconds of work an entry is expected to take
fn estimated_seconds(exercise: &PlanExercise) -> u32 {
    match exercise.target {
        Goal::Duration(seconds) => seconds.saturating_mul(exercise.sets),
        Goal::Reps(reps) => reps
            .saturating_mul(exercise.sets)
            .saturating_mul(plans::SECONDS_PER_REP_ESTIMATE),
    }
}
