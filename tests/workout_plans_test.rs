// ABOUTME: Integration tests for built-in and custom workout plans driven through the manager
// ABOUTME: Plan lookup, custom plan composition from JSON, and broadcast delivery of session events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{init_test_logging, pose_frame};
use rep_coach::catalog::ExerciseCatalog;
use rep_coach::constants::exercise_ids;
use rep_coach::errors::ErrorCode;
use rep_coach::lifecycle::{AdvanceOutcome, WorkoutManager};
use rep_coach::models::{Goal, JointTriple};
use rep_coach::notifications::{BroadcastObserver, SessionEvent};
use rep_coach::plan_catalog::{build_custom_plan, builtin_plans, find_plan, CustomEntry};

#[test]
fn test_every_builtin_plan_starts() {
    init_test_logging();
    let catalog = ExerciseCatalog::builtin().unwrap().with_default_fallback(false);
    for plan in builtin_plans() {
        let mut manager = WorkoutManager::new(catalog.clone());
        let (mut observer, _receiver) = BroadcastObserver::channel(8);
        let id = plan.id.clone();
        assert!(
            manager.start_workout(plan, &mut observer).is_ok(),
            "plan {id} failed to start"
        );
    }
}

#[test]
fn test_unknown_plan_is_not_found() {
    let error = find_plan("marathon_taper").unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}

#[test]
fn test_custom_plan_from_json_entries() {
    let catalog = ExerciseCatalog::builtin().unwrap();
    let entries: Vec<CustomEntry> = serde_json::from_str(
        r#"[
            {"exercise_id": "squat", "reps": 2},
            {"exercise_id": "plank", "duration_seconds": 90, "sets": 1},
            {"exercise_id": "kettlebell_swing", "reps": 10},
            {"exercise_id": "push_up"}
        ]"#,
    )
    .unwrap();

    let plan = build_custom_plan(&catalog, &entries).unwrap();

    assert!(plan.id.starts_with("custom_"));
    assert_eq!(plan.exercises.len(), 2);
    assert_eq!(plan.exercises[0].target, Goal::Reps(2));
    assert_eq!(plan.exercises[0].sets, 3);
    assert_eq!(plan.exercises[1].target, Goal::Duration(90));
    // 2 reps x 3 sets x 5 s + 90 s = 120 s
    assert_eq!(plan.estimated_minutes, 2);
}

#[test]
fn test_custom_plan_without_valid_entries_is_rejected() {
    let catalog = ExerciseCatalog::builtin().unwrap();
    let entries = vec![CustomEntry {
        exercise_id: exercise_ids::SQUAT.into(),
        sets: 3,
        ..CustomEntry::default()
    }];

    let error = build_custom_plan(&catalog, &entries).unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[test]
fn test_broadcast_subscribers_see_the_workout() {
    init_test_logging();
    let catalog = ExerciseCatalog::builtin().unwrap();
    let entries = vec![CustomEntry {
        exercise_id: exercise_ids::BICEP_CURL.into(),
        reps: 1,
        duration_seconds: 0,
        sets: 1,
    }];
    let plan = build_custom_plan(&catalog, &entries).unwrap();
    let mut manager = WorkoutManager::new(catalog);
    let (mut observer, mut receiver) = BroadcastObserver::channel(16);

    manager.start_workout(plan, &mut observer).unwrap();
    manager.process_frame(&pose_frame(&JointTriple::LEFT_ELBOW, 40.0), &mut observer);
    let outcome = manager.advance_to_next(&mut observer).unwrap();

    assert!(matches!(outcome, AdvanceOutcome::Completed(_)));
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    assert_eq!(
        events,
        vec![
            SessionEvent::SessionReset,
            SessionEvent::RepUpdate { count: 0 },
            SessionEvent::RepUpdate { count: 1 },
            SessionEvent::GoalReached,
        ]
    );
}
