// ABOUTME: Static exercise profile table mapping exercise ids to thresholds and metadata
// ABOUTME: Lookup with an explicit default entry for exercises that have no profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Exercise profile table
//!
//! Adding an exercise is a data change: append a profile to
//! [`ExerciseCatalog::builtin`] with its joint trackers and direction category.

use std::collections::HashMap;

use coach_core::constants::{calories::DEFAULT_CALORIES_PER_UNIT, default_thresholds, exercise_ids};
use coach_core::errors::{AppError, AppResult};
use coach_core::models::{ExerciseProfile, Goal, JointTracker, JointTriple, Phase};
use tracing::debug;

/// Immutable table of exercise profiles
#[derive(Debug, Clone)]
pub struct ExerciseCatalog {
    profiles: HashMap<String, ExerciseProfile>,
    default_profile: ExerciseProfile,
    fallback_to_default: bool,
}

impl ExerciseCatalog {
    /// Create a catalog from explicit profiles
    ///
    /// Unknown ids resolve to `default_profile` until
    /// [`with_default_fallback`](Self::with_default_fallback) disables it.
    #[must_use]
    pub fn from_profiles(profiles: Vec<ExerciseProfile>, default_profile: ExerciseProfile) -> Self {
        Self {
            profiles: profiles
                .into_iter()
                .map(|profile| (profile.id.clone(), profile))
                .collect(),
            default_profile,
            fallback_to_default: true,
        }
    }

    /// The built-in exercise table
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if a built-in threshold pair violates its
    /// direction invariant.
    pub fn builtin() -> AppResult<Self> {
        let profiles = vec![
            ExerciseProfile::new(
                exercise_ids::BICEP_CURL,
                "Bicep Curl",
                Phase::Down,
                vec![JointTracker::flexion(JointTriple::LEFT_ELBOW, 50.0, 160.0)?],
                DEFAULT_CALORIES_PER_UNIT,
            )
            .with_instructions("Keep elbows close to body, curl slowly up and down")
            .with_muscles("Biceps, Forearms"),
            ExerciseProfile::new(
                exercise_ids::SQUAT,
                "Squat",
                Phase::Up,
                vec![JointTracker::extension(JointTriple::LEFT_KNEE, 160.0, 80.0)?],
                DEFAULT_CALORIES_PER_UNIT,
            )
            .with_instructions("Keep chest up, push through heels, knees over toes")
            .with_muscles("Quads, Glutes, Hamstrings"),
            ExerciseProfile::new(
                exercise_ids::PUSH_UP,
                "Push-up",
                Phase::Up,
                vec![JointTracker::extension(JointTriple::LEFT_ELBOW, 170.0, 90.0)?],
                DEFAULT_CALORIES_PER_UNIT,
            )
            .with_instructions("Maintain straight body line, lower chest to floor")
            .with_muscles("Chest, Shoulders, Triceps"),
            ExerciseProfile::new(
                exercise_ids::SHOULDER_PRESS,
                "Shoulder Press",
                Phase::Down,
                vec![JointTracker::flexion(JointTriple::LEFT_ELBOW, 60.0, 150.0)?],
                DEFAULT_CALORIES_PER_UNIT,
            )
            .with_instructions("Press straight up, avoid arching back")
            .with_muscles("Shoulders, Triceps"),
            ExerciseProfile::new(
                exercise_ids::PULL_UP,
                "Pull-up",
                Phase::Down,
                vec![JointTracker::flexion(JointTriple::LEFT_ELBOW, 30.0, 160.0)?],
                DEFAULT_CALORIES_PER_UNIT,
            )
            .with_instructions("Pull your chin over the bar, control the descent")
            .with_muscles("Back, Biceps"),
            ExerciseProfile::new(
                exercise_ids::LUNGE,
                "Lunge",
                Phase::Up,
                vec![JointTracker::extension(JointTriple::LEFT_KNEE, 180.0, 90.0)?],
                DEFAULT_CALORIES_PER_UNIT,
            )
            .with_instructions("Keep torso upright, lower until back knee nearly touches ground")
            .with_muscles("Quads, Glutes, Hamstrings"),
            ExerciseProfile::new(
                exercise_ids::PLANK,
                "Plank",
                Phase::Neutral,
                Vec::new(),
                DEFAULT_CALORIES_PER_UNIT,
            )
            .with_instructions("Keep body straight, engage core")
            .with_muscles("Core, Shoulders"),
            ExerciseProfile::new(
                exercise_ids::JUMPING_JACKS,
                "Jumping Jacks",
                Phase::Neutral,
                Vec::new(),
                DEFAULT_CALORIES_PER_UNIT,
            )
            .with_instructions("Jump while spreading legs and raising arms")
            .with_muscles("Full body cardio"),
            ExerciseProfile::new(
                exercise_ids::BURPEES,
                "Burpees",
                Phase::Neutral,
                Vec::new(),
                DEFAULT_CALORIES_PER_UNIT,
            )
            .with_instructions("Squat down, kick back to plank, return to squat and jump")
            .with_muscles("Full body explosive"),
            ExerciseProfile::new(
                exercise_ids::MOUNTAIN_CLIMBERS,
                "Mountain Climbers",
                Phase::Neutral,
                Vec::new(),
                DEFAULT_CALORIES_PER_UNIT,
            )
            .with_instructions("Alternate bringing knees to chest while in plank position")
            .with_muscles("Core, Cardio"),
        ];

        Ok(Self::from_profiles(profiles, Self::generic_profile()?))
    }

    /// Arm flexion first, then leg extension, with generic thresholds
    fn generic_profile() -> AppResult<ExerciseProfile> {
        Ok(ExerciseProfile::new(
            exercise_ids::DEFAULT,
            "Custom Exercise",
            Phase::Down,
            vec![
                JointTracker::flexion(
                    JointTriple::LEFT_ELBOW,
                    default_thresholds::ARM_UP_ANGLE,
                    default_thresholds::ARM_DOWN_ANGLE,
                )?,
                JointTracker::extension(
                    JointTriple::LEFT_KNEE,
                    default_thresholds::LEG_UP_ANGLE,
                    default_thresholds::LEG_DOWN_ANGLE,
                )?,
            ],
            DEFAULT_CALORIES_PER_UNIT,
        ))
    }

    /// Enable or disable the default entry for unknown ids
    #[must_use]
    pub fn with_default_fallback(mut self, enabled: bool) -> Self {
        self.fallback_to_default = enabled;
        self
    }

    /// Whether unknown ids resolve to the default entry
    #[must_use]
    pub const fn falls_back_to_default(&self) -> bool {
        self.fallback_to_default
    }

    /// Profile registered under `id`, without fallback
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ExerciseProfile> {
        self.profiles.get(id)
    }

    /// The default entry
    #[must_use]
    pub const fn default_profile(&self) -> &ExerciseProfile {
        &self.default_profile
    }

    /// Whether `resolve(id)` would succeed
    #[must_use]
    pub fn is_resolvable(&self, id: &str) -> bool {
        self.fallback_to_default || self.profiles.contains_key(id)
    }

    /// Profile for `id`, falling back to the default entry when enabled
    ///
    /// # Errors
    ///
    /// Returns `UnknownExercise` when `id` has no profile and the default
    /// entry is disabled.
    pub fn resolve(&self, id: &str) -> AppResult<&ExerciseProfile> {
        if let Some(profile) = self.profiles.get(id) {
            return Ok(profile);
        }
        if self.fallback_to_default {
            debug!(exercise.id = %id, "No profile registered, using default profile");
            return Ok(&self.default_profile);
        }
        Err(AppError::unknown_exercise(id))
    }

    /// Profile a session should track for `id` under `goal`
    ///
    /// An isometric exercise asked to count reps has nothing to count with,
    /// so it borrows the default entry's trackers and start phase while
    /// keeping its own id, calories, and metadata.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub fn tracking_profile(&self, id: &str, goal: &Goal) -> AppResult<ExerciseProfile> {
        let profile = self.resolve(id)?;
        if profile.is_isometric() && !goal.is_duration() {
            debug!(
                exercise.id = %id,
                goal = %goal,
                "Isometric exercise with a rep goal, tracking with default joints"
            );
            let mut tracked = profile.clone();
            tracked.trackers.clone_from(&self.default_profile.trackers);
            tracked.start_state = self.default_profile.start_state;
            return Ok(tracked);
        }
        Ok(profile.clone())
    }

    /// All registered profiles sorted by id
    #[must_use]
    pub fn profiles(&self) -> Vec<&ExerciseProfile> {
        let mut profiles: Vec<_> = self.profiles.values().collect();
        profiles.sort_by(|a, b| a.id.cmp(&b.id));
        profiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_core::errors::ErrorCode;
    use coach_core::models::Direction;

    #[test]
    fn test_builtin_table_directions() {
        let catalog = ExerciseCatalog::builtin().unwrap();
        let direction = |id: &str| {
            catalog
                .get(id)
                .and_then(ExerciseProfile::primary_tracker)
                .map(JointTracker::direction)
        };
        assert_eq!(direction("bicep_curl"), Some(Direction::Flexion));
        assert_eq!(direction("shoulder_press"), Some(Direction::Flexion));
        assert_eq!(direction("pull_up"), Some(Direction::Flexion));
        assert_eq!(direction("squat"), Some(Direction::Extension));
        assert_eq!(direction("lunge"), Some(Direction::Extension));
        assert_eq!(direction("push_up"), Some(Direction::Extension));
        assert_eq!(direction("plank"), None);
    }

    #[test]
    fn test_unknown_id_falls_back_to_default() {
        let catalog = ExerciseCatalog::builtin().unwrap();
        let profile = catalog.resolve("tricep_dip").unwrap();
        assert_eq!(profile.id, "default");
        assert_eq!(profile.trackers.len(), 2);
        assert_eq!(profile.trackers[0].joints(), &JointTriple::LEFT_ELBOW);
        assert_eq!(profile.trackers[1].joints(), &JointTriple::LEFT_KNEE);
    }

    #[test]
    fn test_unknown_id_without_default_is_config_error() {
        let catalog = ExerciseCatalog::builtin()
            .unwrap()
            .with_default_fallback(false);
        let error = catalog.resolve("tricep_dip").unwrap_err();
        assert_eq!(error.code, ErrorCode::UnknownExercise);
        assert!(!catalog.is_resolvable("tricep_dip"));
        assert!(catalog.is_resolvable("squat"));
    }

    #[test]
    fn test_isometric_with_rep_goal_borrows_default_trackers() {
        let catalog = ExerciseCatalog::builtin().unwrap();
        let tracked = catalog.tracking_profile("burpees", &Goal::Reps(10)).unwrap();
        assert_eq!(tracked.id, "burpees");
        assert_eq!(tracked.trackers.len(), 2);
        assert_eq!(tracked.start_state, Phase::Down);

        let timed = catalog
            .tracking_profile("plank", &Goal::Duration(30))
            .unwrap();
        assert!(timed.is_isometric());
        assert_eq!(timed.start_state, Phase::Neutral);
    }

    #[test]
    fn test_profiles_sorted() {
        let catalog = ExerciseCatalog::builtin().unwrap();
        let ids: Vec<_> = catalog.profiles().iter().map(|p| p.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), 10);
    }
}
