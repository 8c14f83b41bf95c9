// ABOUTME: Mutable state of one exercise attempt: phase, reps, elapsed time, goal flag
// ABOUTME: Frame and tick entry points that report rep updates and the one-shot goal event
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use coach_core::errors::AppResult;
use coach_core::models::{CompletedExercise, ExerciseProfile, Goal, KeypointFrame, Phase};
use tracing::debug;
use uuid::Uuid;

use crate::rep_counter::{RepCounter, RepUpdate};

/// Result of feeding one keypoint frame to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutcome {
    /// What the rep counter did with the frame
    pub update: RepUpdate,
    /// True only on the frame that first satisfied the goal
    pub goal_reached_now: bool,
}

impl FrameOutcome {
    const fn unchanged() -> Self {
        Self {
            update: RepUpdate::NoChange,
            goal_reached_now: false,
        }
    }
}

/// Result of one timer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Elapsed time advanced
    Advanced {
        /// Seconds elapsed after this tick
        elapsed_seconds: u32,
        /// True only on the tick that first satisfied a duration goal
        goal_reached_now: bool,
    },
    /// The goal was already reached, so the timer is stopped
    Stopped,
}

/// One exercise attempt, replaced wholesale on every transition
#[derive(Debug, Clone)]
pub struct ExerciseSession {
    session_id: Uuid,
    exercise_id: String,
    exercise_index: usize,
    profile: ExerciseProfile,
    goal: Goal,
    counter: RepCounter,
    elapsed_seconds: u32,
    goal_reached: bool,
    started_at: DateTime<Utc>,
}

impl ExerciseSession {
    /// Fresh session for `exercise_id` tracked with `profile`
    ///
    /// `exercise_id` is the id the plan asked for; `profile.id` may differ
    /// when the default entry stands in for an unknown exercise.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the goal value is zero.
    pub fn start(
        exercise_id: impl Into<String>,
        profile: ExerciseProfile,
        goal: Goal,
        exercise_index: usize,
    ) -> AppResult<Self> {
        goal.validate()?;
        let session = Self {
            session_id: Uuid::new_v4(),
            exercise_id: exercise_id.into(),
            exercise_index,
            counter: RepCounter::for_profile(&profile),
            profile,
            goal,
            elapsed_seconds: 0,
            goal_reached: false,
            started_at: Utc::now(),
        };
        debug!(
            session.id = %session.session_id,
            exercise.id = %session.exercise_id,
            profile.id = %session.profile.id,
            goal = %goal,
            phase = %session.counter.phase(),
            "Exercise session started"
        );
        Ok(session)
    }

    /// Session identifier
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Exercise id requested by the plan
    #[must_use]
    pub fn exercise_id(&self) -> &str {
        &self.exercise_id
    }

    /// Position of the exercise in its plan
    #[must_use]
    pub const fn exercise_index(&self) -> usize {
        self.exercise_index
    }

    /// Profile driving the counter
    #[must_use]
    pub const fn profile(&self) -> &ExerciseProfile {
        &self.profile
    }

    /// Target for this session
    #[must_use]
    pub const fn goal(&self) -> Goal {
        self.goal
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.counter.phase()
    }

    /// Repetitions counted so far
    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        self.counter.rep_count()
    }

    /// Seconds counted by the timer
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Whether the goal has been reached
    #[must_use]
    pub const fn goal_reached(&self) -> bool {
        self.goal_reached
    }

    /// When the session started
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Whether frames drive this session
    ///
    /// Duration goals and isometric profiles are evaluated on elapsed time
    /// alone and never touch the angle path.
    #[must_use]
    pub fn counts_reps(&self) -> bool {
        !self.goal.is_duration() && !self.profile.is_isometric()
    }

    /// Feed one keypoint frame
    pub fn process_frame(&mut self, frame: &KeypointFrame) -> FrameOutcome {
        if !self.counts_reps() {
            return FrameOutcome::unchanged();
        }

        let update = self.counter.observe(frame);
        let RepUpdate::RepCompleted { count } = update else {
            return FrameOutcome {
                update,
                goal_reached_now: false,
            };
        };

        debug!(
            session.id = %self.session_id,
            exercise.id = %self.exercise_id,
            rep.count = count,
            "Repetition completed"
        );
        FrameOutcome {
            update,
            goal_reached_now: self.mark_goal_if_met(),
        }
    }

    /// Advance the elapsed-time counter by one second
    ///
    /// Ticks after the goal is reached are ignored. Only duration goals are
    /// evaluated against elapsed time.
    pub fn tick(&mut self) -> TickOutcome {
        if self.goal_reached {
            return TickOutcome::Stopped;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        let goal_reached_now = self.goal.is_duration() && self.mark_goal_if_met();
        TickOutcome::Advanced {
            elapsed_seconds: self.elapsed_seconds,
            goal_reached_now,
        }
    }

    fn mark_goal_if_met(&mut self) -> bool {
        if self.goal_reached || !self.goal.is_met(self.rep_count(), self.elapsed_seconds) {
            return false;
        }
        self.goal_reached = true;
        debug!(
            session.id = %self.session_id,
            exercise.id = %self.exercise_id,
            goal = %self.goal,
            "Goal reached"
        );
        true
    }

    /// Reps for rep goals, seconds for duration goals
    #[must_use]
    pub const fn units_performed(&self) -> u32 {
        match self.goal {
            Goal::Reps(_) => self.rep_count(),
            Goal::Duration(_) => self.elapsed_seconds,
        }
    }

    /// Energy spent so far
    #[must_use]
    pub fn calories(&self) -> f64 {
        f64::from(self.units_performed()) * self.profile.calories_per_unit
    }

    /// Snapshot for the workout summary
    #[must_use]
    pub fn to_completed(&self) -> CompletedExercise {
        CompletedExercise {
            session_id: self.session_id,
            exercise_id: self.exercise_id.clone(),
            goal: self.goal,
            units_performed: self.units_performed(),
            rep_count: self.rep_count(),
            elapsed_seconds: self.elapsed_seconds,
            calories: self.calories(),
            goal_reached: self.goal_reached,
        }
    }
}
