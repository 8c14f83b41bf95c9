// ABOUTME: Workout lifecycle manager owning the plan cursor and the active exercise session
// ABOUTME: Idle/Active/Complete state machine with resets, goal overrides, and completion totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Workout Lifecycle Management
//!
//! ```text
//! Idle --start_workout--> Active --advance_to_next--> Active (next exercise)
//!                           |  \--advance_to_next (last)--> Complete --return_to_idle--> Idle
//!                           \--cancel--> Idle
//! ```
//!
//! The manager is the single owner of the [`ExerciseSession`]. Every
//! transition replaces the session wholesale; nothing patches it in place.

use coach_core::constants::messages;
use coach_core::models::{CompletedExercise, KeypointFrame, WorkoutPlan, WorkoutSummary};
use coach_intelligence::{ExerciseCatalog, ExerciseSession, FrameOutcome, RepUpdate, TickOutcome};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::config::CoachConfig;
use crate::errors::{AppError, AppResult};
use crate::notifications::SessionObserver;

/// Workout-level state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutState {
    /// No plan loaded
    Idle,
    /// A plan is running with an active exercise session
    Active,
    /// The last exercise finished; a summary is available
    Complete,
}

/// Result of [`WorkoutManager::advance_to_next`]
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// The next exercise is now active
    Next {
        /// Plan position of the new session
        exercise_index: usize,
    },
    /// The plan is finished
    Completed(WorkoutSummary),
}

/// Owns the workout plan, its cursor, and the active session
#[derive(Debug)]
pub struct WorkoutManager {
    catalog: ExerciseCatalog,
    state: WorkoutState,
    plan: Option<WorkoutPlan>,
    session: Option<ExerciseSession>,
    completed: Vec<CompletedExercise>,
    summary: Option<WorkoutSummary>,
}

impl WorkoutManager {
    /// Idle manager resolving exercises against `catalog`
    #[must_use]
    pub const fn new(catalog: ExerciseCatalog) -> Self {
        Self {
            catalog,
            state: WorkoutState::Idle,
            plan: None,
            session: None,
            completed: Vec::new(),
            summary: None,
        }
    }

    /// Idle manager over the built-in profile table
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the built-in table is inconsistent.
    pub fn from_config(config: &CoachConfig) -> AppResult<Self> {
        let catalog =
            ExerciseCatalog::builtin()?.with_default_fallback(config.allow_default_profile);
        Ok(Self::new(catalog))
    }

    /// Current workout state
    #[must_use]
    pub const fn state(&self) -> WorkoutState {
        self.state
    }

    /// Profile table in use
    #[must_use]
    pub const fn catalog(&self) -> &ExerciseCatalog {
        &self.catalog
    }

    /// Plan being executed, including any goal override
    #[must_use]
    pub const fn plan(&self) -> Option<&WorkoutPlan> {
        self.plan.as_ref()
    }

    /// Active exercise session
    #[must_use]
    pub const fn session(&self) -> Option<&ExerciseSession> {
        self.session.as_ref()
    }

    /// Summary of the finished workout
    #[must_use]
    pub const fn summary(&self) -> Option<&WorkoutSummary> {
        self.summary.as_ref()
    }

    /// Exercises finished so far in the current workout
    #[must_use]
    pub fn completed(&self) -> &[CompletedExercise] {
        &self.completed
    }

    /// Whether the active session has reached its goal
    #[must_use]
    pub fn goal_reached(&self) -> bool {
        self.session.as_ref().is_some_and(ExerciseSession::goal_reached)
    }

    /// Load `plan` and start its first exercise
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless idle, `InvalidInput` for an empty plan or
    /// a zero goal, and `UnknownExercise` for an exercise with no profile when
    /// the default entry is disabled. A configuration failure is also reported
    /// through `on_error` and leaves the manager idle.
    pub fn start_workout(
        &mut self,
        plan: WorkoutPlan,
        observer: &mut dyn SessionObserver,
    ) -> AppResult<()> {
        if self.state != WorkoutState::Idle {
            return Err(AppError::invalid_state(format!(
                "cannot start a workout while {:?}",
                self.state
            )));
        }
        if let Err(e) = self.validate_plan(&plan) {
            error!(plan.id = %plan.id, error = %e, "Workout plan rejected");
            observer.on_error(messages::INVALID_EXERCISE);
            return Err(e);
        }

        info!(
            plan.id = %plan.id,
            plan.exercises = plan.exercises.len(),
            "Starting workout"
        );
        self.plan = Some(plan);
        self.completed.clear();
        self.summary = None;
        self.state = WorkoutState::Active;
        if let Err(e) = self.initialize_session(0, observer) {
            self.cancel();
            return Err(e);
        }
        Ok(())
    }

    fn validate_plan(&self, plan: &WorkoutPlan) -> AppResult<()> {
        if plan.exercises.is_empty() {
            return Err(AppError::invalid_input(format!(
                "workout plan '{}' has no exercises",
                plan.id
            )));
        }
        for exercise in &plan.exercises {
            self.catalog.resolve(&exercise.exercise_id)?;
            exercise.target.validate()?;
        }
        Ok(())
    }

    /// Replace the active session with a fresh one for plan entry `index`
    ///
    /// The goal is read from the plan entry, which already carries any
    /// override written by [`apply_goal_override`](Self::apply_goal_override).
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` without an active plan, `ValueOutOfRange` for
    /// an index past the end, and `UnknownExercise` when the exercise cannot
    /// be resolved (also reported through `on_error`).
    pub fn initialize_session(
        &mut self,
        index: usize,
        observer: &mut dyn SessionObserver,
    ) -> AppResult<()> {
        let Some(plan) = self.plan.as_ref() else {
            return Err(AppError::invalid_state("no active workout plan"));
        };
        let Some(entry) = plan.exercises.get(index) else {
            return Err(AppError::out_of_range(format!(
                "exercise index {index} out of range for plan '{}' with {} exercises",
                plan.id,
                plan.exercises.len()
            )));
        };

        let profile = match self.catalog.tracking_profile(&entry.exercise_id, &entry.target) {
            Ok(profile) => profile,
            Err(e) => {
                error!(exercise.id = %entry.exercise_id, error = %e, "Session initialization halted");
                observer.on_error(messages::INVALID_EXERCISE);
                return Err(e);
            }
        };
        let session = ExerciseSession::start(entry.exercise_id.clone(), profile, entry.target, index)?;

        info!(
            plan.id = %plan.id,
            exercise.index = index,
            exercise.id = %entry.exercise_id,
            session.id = %session.session_id(),
            goal = %entry.target,
            "Exercise session initialized"
        );
        self.session = Some(session);
        observer.on_session_reset();
        observer.on_rep_update(0);
        Ok(())
    }

    /// Finish the active exercise and move the cursor forward
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless a workout is active.
    pub fn advance_to_next(
        &mut self,
        observer: &mut dyn SessionObserver,
    ) -> AppResult<AdvanceOutcome> {
        if self.state != WorkoutState::Active {
            return Err(AppError::invalid_state("no active workout to advance"));
        }
        let Some(finished) = self.session.take() else {
            return Err(AppError::invalid_state("active workout has no session"));
        };
        self.completed.push(finished.to_completed());

        let next = finished.exercise_index() + 1;
        let exercise_count = self.plan.as_ref().map_or(0, |plan| plan.exercises.len());
        if next < exercise_count {
            self.initialize_session(next, observer)?;
            return Ok(AdvanceOutcome::Next {
                exercise_index: next,
            });
        }

        let plan_id = self.plan.as_ref().map(|plan| plan.id.clone()).unwrap_or_default();
        let summary = WorkoutSummary::from_exercises(plan_id, self.completed.clone());
        info!(
            plan.id = %summary.plan_id,
            calories.total = summary.total_calories,
            duration.total_seconds = summary.total_duration_seconds,
            exercises = summary.exercises.len(),
            "Workout complete"
        );
        self.summary = Some(summary.clone());
        self.state = WorkoutState::Complete;
        Ok(AdvanceOutcome::Completed(summary))
    }

    /// Replace the active exercise's goal value and restart its session
    ///
    /// The goal kind is kept; a rep goal stays a rep goal. Progress is reset
    /// to zero so the new goal is evaluated from a clean start.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless a workout is active and `InvalidInput`
    /// for a zero goal.
    pub fn apply_goal_override(
        &mut self,
        value: u32,
        observer: &mut dyn SessionObserver,
    ) -> AppResult<()> {
        let (Some(plan), Some(session)) = (self.plan.as_mut(), self.session.as_ref()) else {
            return Err(AppError::invalid_state("no active exercise to override"));
        };
        let index = session.exercise_index();
        let Some(entry) = plan.exercises.get_mut(index) else {
            return Err(AppError::internal(format!(
                "session index {index} missing from plan '{}'",
                plan.id
            )));
        };
        let target = entry.target.with_value(value);
        target.validate()?;

        info!(
            exercise.index = index,
            exercise.id = %entry.exercise_id,
            goal.previous = %entry.target,
            goal.new = %target,
            "Applying goal override"
        );
        entry.target = target;
        self.initialize_session(index, observer)
    }

    /// Discard the plan and session, returning to idle from any state
    pub fn cancel(&mut self) {
        if self.state != WorkoutState::Idle {
            info!(
                plan.id = self.plan.as_ref().map_or("", |plan| plan.id.as_str()),
                state = ?self.state,
                "Workout cancelled"
            );
        }
        self.state = WorkoutState::Idle;
        self.plan = None;
        self.session = None;
        self.completed.clear();
        self.summary = None;
    }

    /// Leave the complete state
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the workout is complete.
    pub fn return_to_idle(&mut self) -> AppResult<()> {
        if self.state != WorkoutState::Complete {
            return Err(AppError::invalid_state(format!(
                "return to idle requires a complete workout, currently {:?}",
                self.state
            )));
        }
        self.cancel();
        Ok(())
    }

    /// Feed a keypoint frame to the active session
    ///
    /// Returns `None` when no session is active.
    pub fn process_frame(
        &mut self,
        frame: &KeypointFrame,
        observer: &mut dyn SessionObserver,
    ) -> Option<FrameOutcome> {
        let session = self.session.as_mut()?;
        let outcome = session.process_frame(frame);
        if let RepUpdate::RepCompleted { count } = outcome.update {
            observer.on_rep_update(count);
        }
        if outcome.goal_reached_now {
            observer.on_goal_reached();
        }
        Some(outcome)
    }

    /// Advance the active session's elapsed time by one second
    ///
    /// Returns `None` when no session is active.
    pub fn tick(&mut self, observer: &mut dyn SessionObserver) -> Option<TickOutcome> {
        let Some(session) = self.session.as_mut() else {
            warn!("Timer tick without an active session");
            return None;
        };
        let outcome = session.tick();
        if let TickOutcome::Advanced {
            goal_reached_now: true,
            ..
        } = outcome
        {
            observer.on_goal_reached();
        }
        Some(outcome)
    }
}
