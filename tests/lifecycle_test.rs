// ABOUTME: Integration tests for the workout lifecycle manager
// ABOUTME: Multi-exercise plans, goal overrides, cancellation, and default-profile fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{init_test_logging, plan_of, pose_frame, single_exercise_plan};
use rep_coach::catalog::ExerciseCatalog;
use rep_coach::constants::{exercise_ids, messages};
use rep_coach::errors::ErrorCode;
use rep_coach::lifecycle::{AdvanceOutcome, WorkoutManager, WorkoutState};
use rep_coach::models::{Goal, JointTriple, PlanExercise};
use rep_coach::notifications::{EventRecorder, SessionEvent};
use rep_coach::plan_catalog::find_plan;
use rep_coach::session::TickOutcome;

fn manager() -> WorkoutManager {
    init_test_logging();
    WorkoutManager::new(ExerciseCatalog::builtin().unwrap())
}

fn squat_reps(manager: &mut WorkoutManager, observer: &mut EventRecorder, reps: u32) {
    for _ in 0..reps {
        manager.process_frame(&pose_frame(&JointTriple::LEFT_KNEE, 60.0), observer);
        manager.process_frame(&pose_frame(&JointTriple::LEFT_KNEE, 170.0), observer);
    }
}

#[test]
fn test_two_exercise_workout_runs_to_summary() {
    let mut manager = manager();
    let mut observer = EventRecorder::new();
    let plan = plan_of(vec![
        PlanExercise::reps(exercise_ids::SQUAT, "Squat", 2, 1),
        PlanExercise::timed(exercise_ids::PLANK, "Plank", 3, 1),
    ]);

    manager.start_workout(plan, &mut observer).unwrap();
    assert_eq!(manager.state(), WorkoutState::Active);
    assert_eq!(
        observer.drain(),
        vec![SessionEvent::SessionReset, SessionEvent::RepUpdate { count: 0 }]
    );

    squat_reps(&mut manager, &mut observer, 2);
    assert!(manager.goal_reached());
    assert_eq!(observer.last_rep_count(), Some(2));

    let outcome = manager.advance_to_next(&mut observer).unwrap();
    assert_eq!(outcome, AdvanceOutcome::Next { exercise_index: 1 });
    assert_eq!(manager.session().unwrap().exercise_id(), exercise_ids::PLANK);

    // Plank ignores angles entirely
    squat_reps(&mut manager, &mut observer, 1);
    assert_eq!(manager.session().unwrap().rep_count(), 0);

    for second in 1..=3 {
        let outcome = manager.tick(&mut observer).unwrap();
        assert_eq!(
            outcome,
            TickOutcome::Advanced {
                elapsed_seconds: second,
                goal_reached_now: second == 3
            }
        );
    }
    assert_eq!(manager.tick(&mut observer), Some(TickOutcome::Stopped));

    let AdvanceOutcome::Completed(summary) = manager.advance_to_next(&mut observer).unwrap() else {
        panic!("expected the workout to complete");
    };
    assert_eq!(manager.state(), WorkoutState::Complete);
    assert_eq!(summary.exercises.len(), 2);
    assert!((summary.total_calories - 2.5).abs() < 1e-9);
    assert_eq!(summary.total_duration_seconds, 3);
    assert_eq!(summary.exercises[0].units_performed, 2);
    assert_eq!(summary.exercises[1].units_performed, 3);
    assert!(summary.exercises.iter().all(|exercise| exercise.goal_reached));
    assert_eq!(observer.goal_count(), 2);

    manager.return_to_idle().unwrap();
    assert_eq!(manager.state(), WorkoutState::Idle);
    assert!(manager.summary().is_none());
}

#[test]
fn test_goal_override_resets_progress_and_rewrites_plan() {
    let mut manager = manager();
    let mut observer = EventRecorder::new();
    manager
        .start_workout(single_exercise_plan(exercise_ids::SQUAT, Goal::Reps(3)), &mut observer)
        .unwrap();
    squat_reps(&mut manager, &mut observer, 2);
    manager.tick(&mut observer);

    manager.apply_goal_override(5, &mut observer).unwrap();

    let session = manager.session().unwrap();
    assert_eq!(session.rep_count(), 0);
    assert_eq!(session.elapsed_seconds(), 0);
    assert_eq!(session.goal(), Goal::Reps(5));
    assert_eq!(manager.plan().unwrap().exercises[0].target, Goal::Reps(5));
    assert_eq!(observer.last_rep_count(), Some(0));
}

#[test]
fn test_goal_override_keeps_duration_kind() {
    let mut manager = manager();
    let mut observer = EventRecorder::new();
    manager
        .start_workout(single_exercise_plan(exercise_ids::PLANK, Goal::Duration(30)), &mut observer)
        .unwrap();

    manager.apply_goal_override(45, &mut observer).unwrap();

    assert_eq!(manager.session().unwrap().goal(), Goal::Duration(45));
}

#[test]
fn test_zero_goal_override_is_rejected() {
    let mut manager = manager();
    let mut observer = EventRecorder::new();
    manager
        .start_workout(single_exercise_plan(exercise_ids::SQUAT, Goal::Reps(3)), &mut observer)
        .unwrap();
    squat_reps(&mut manager, &mut observer, 1);

    let error = manager.apply_goal_override(0, &mut observer).unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(manager.session().unwrap().rep_count(), 1);
    assert_eq!(manager.plan().unwrap().exercises[0].target, Goal::Reps(3));
}

#[test]
fn test_cancel_returns_to_idle_from_active() {
    let mut manager = manager();
    let mut observer = EventRecorder::new();
    manager.start_workout(find_plan("beginner_fullbody").unwrap(), &mut observer).unwrap();

    manager.cancel();

    assert_eq!(manager.state(), WorkoutState::Idle);
    assert!(manager.session().is_none());
    assert!(manager.plan().is_none());
    assert!(manager.tick(&mut observer).is_none());
    assert!(manager.process_frame(&pose_frame(&JointTriple::LEFT_KNEE, 60.0), &mut observer).is_none());
}

#[test]
fn test_start_requires_idle() {
    let mut manager = manager();
    let mut observer = EventRecorder::new();
    manager
        .start_workout(single_exercise_plan(exercise_ids::SQUAT, Goal::Reps(1)), &mut observer)
        .unwrap();

    let error = manager
        .start_workout(single_exercise_plan(exercise_ids::PLANK, Goal::Duration(10)), &mut observer)
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidState);
    assert_eq!(manager.session().unwrap().exercise_id(), exercise_ids::SQUAT);
}

#[test]
fn test_unknown_exercise_uses_default_profile() {
    let mut manager = manager();
    let mut observer = EventRecorder::new();
    manager
        .start_workout(single_exercise_plan("kettlebell_swing", Goal::Reps(1)), &mut observer)
        .unwrap();

    let session = manager.session().unwrap();
    assert_eq!(session.exercise_id(), "kettlebell_swing");
    assert_eq!(session.profile().id, exercise_ids::DEFAULT);

    manager.process_frame(&pose_frame(&JointTriple::LEFT_ELBOW, 40.0), &mut observer);
    assert!(manager.goal_reached());
}

#[test]
fn test_unknown_exercise_without_fallback_is_reported() {
    init_test_logging();
    let catalog = ExerciseCatalog::builtin().unwrap().with_default_fallback(false);
    let mut manager = WorkoutManager::new(catalog);
    let mut observer = EventRecorder::new();

    let error = manager
        .start_workout(single_exercise_plan("kettlebell_swing", Goal::Reps(1)), &mut observer)
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::UnknownExercise);
    assert_eq!(manager.state(), WorkoutState::Idle);
    assert_eq!(
        observer.events(),
        [SessionEvent::Error {
            message: messages::INVALID_EXERCISE.to_owned()
        }]
    );
}

#[test]
fn test_isometric_exercise_with_rep_goal_counts_reps() {
    let mut manager = manager();
    let mut observer = EventRecorder::new();
    manager
        .start_workout(single_exercise_plan(exercise_ids::PLANK, Goal::Reps(1)), &mut observer)
        .unwrap();

    manager.process_frame(&pose_frame(&JointTriple::LEFT_ELBOW, 40.0), &mut observer);

    assert_eq!(manager.session().unwrap().rep_count(), 1);
    assert!(manager.goal_reached());
}
