// ABOUTME: Integration tests for the two-phase repetition counter
// ABOUTME: Flexion and extension sequences, threshold jitter, default profile ordering, goal latching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::pose_frame;
use rep_coach::catalog::ExerciseCatalog;
use rep_coach::constants::exercise_ids;
use rep_coach::models::{Goal, JointTracker, JointTriple, KeypointFrame, Phase};
use rep_coach::rep_counter::{RepCounter, RepUpdate};
use rep_coach::session::ExerciseSession;

fn feed(counter: &mut RepCounter, joints: &JointTriple, angles: &[f64]) -> Vec<u32> {
    angles
        .iter()
        .map(|angle| {
            counter.observe(&pose_frame(joints, *angle));
            counter.rep_count()
        })
        .collect()
}

#[test]
fn test_flexion_curl_counts_on_the_way_up() {
    let tracker = JointTracker::flexion(JointTriple::LEFT_ELBOW, 50.0, 160.0).unwrap();
    let mut counter = RepCounter::new(Phase::Down, vec![tracker]);

    let counts = feed(&mut counter, &JointTriple::LEFT_ELBOW, &[170.0, 40.0, 170.0]);

    assert_eq!(counts, vec![0, 1, 1]);
    assert_eq!(counter.phase(), Phase::Down);
}

#[test]
fn test_extension_squat_counts_on_stand_up() {
    let tracker = JointTracker::extension(JointTriple::LEFT_KNEE, 160.0, 80.0).unwrap();
    let mut counter = RepCounter::new(Phase::Up, vec![tracker]);

    let counts = feed(&mut counter, &JointTriple::LEFT_KNEE, &[170.0, 60.0, 170.0]);

    assert_eq!(counts, vec![0, 0, 1]);
    assert_eq!(counter.phase(), Phase::Up);
}

#[test]
fn test_jitter_between_thresholds_is_debounced() {
    let tracker = JointTracker::flexion(JointTriple::LEFT_ELBOW, 50.0, 160.0).unwrap();
    let mut counter = RepCounter::new(Phase::Down, vec![tracker]);

    let counts = feed(
        &mut counter,
        &JointTriple::LEFT_ELBOW,
        &[49.0, 51.0, 49.0, 51.0, 120.0, 159.0, 49.0],
    );

    assert_eq!(counts, vec![1, 1, 1, 1, 1, 1, 1]);
    assert_eq!(counter.phase(), Phase::Up);
}

#[test]
fn test_phase_change_updates_are_reported() {
    let tracker = JointTracker::flexion(JointTriple::LEFT_ELBOW, 50.0, 160.0).unwrap();
    let mut counter = RepCounter::new(Phase::Up, vec![tracker]);

    assert_eq!(
        counter.observe(&pose_frame(&JointTriple::LEFT_ELBOW, 170.0)),
        RepUpdate::PhaseChanged {
            from: Phase::Up,
            to: Phase::Down
        }
    );
    assert_eq!(
        counter.observe(&pose_frame(&JointTriple::LEFT_ELBOW, 100.0)),
        RepUpdate::NoChange
    );
}

#[test]
fn test_empty_frame_is_ignored() {
    let catalog = ExerciseCatalog::builtin().unwrap();
    let mut counter = RepCounter::for_profile(catalog.resolve(exercise_ids::BICEP_CURL).unwrap());

    assert_eq!(counter.observe(&KeypointFrame::default()), RepUpdate::NoChange);
    assert_eq!(counter.rep_count(), 0);
}

#[test]
fn test_default_profile_prefers_arm_tracker() {
    let catalog = ExerciseCatalog::builtin().unwrap();
    let profile = catalog.resolve("kettlebell_swing").unwrap();
    assert_eq!(profile.id, exercise_ids::DEFAULT);

    let mut counter = RepCounter::for_profile(profile);
    let mut frame = pose_frame(&JointTriple::LEFT_ELBOW, 40.0);
    // Knee reads "down" but the elbow is observable and wins
    frame
        .keypoints
        .extend(pose_frame(&JointTriple::LEFT_KNEE, 60.0).keypoints);

    assert_eq!(counter.observe(&frame), RepUpdate::RepCompleted { count: 1 });
}

#[test]
fn test_default_profile_falls_back_to_leg_tracker() {
    let catalog = ExerciseCatalog::builtin().unwrap();
    let mut counter = RepCounter::for_profile(catalog.resolve("kettlebell_swing").unwrap());

    let counts = feed(
        &mut counter,
        &JointTriple::LEFT_KNEE,
        &[170.0, 80.0, 170.0],
    );

    assert_eq!(counts, vec![1, 1, 2]);
}

#[test]
fn test_goal_reached_fires_once() {
    let catalog = ExerciseCatalog::builtin().unwrap();
    let profile = catalog
        .tracking_profile(exercise_ids::BICEP_CURL, &Goal::Reps(2))
        .unwrap();
    let mut session = ExerciseSession::start(exercise_ids::BICEP_CURL, profile, Goal::Reps(2), 0).unwrap();

    let reached: Vec<bool> = [40.0, 170.0, 40.0, 170.0, 40.0]
        .iter()
        .map(|angle| {
            session
                .process_frame(&pose_frame(&JointTriple::LEFT_ELBOW, *angle))
                .goal_reached_now
        })
        .collect();

    assert_eq!(reached, vec![false, false, true, false, false]);
    assert!(session.goal_reached());
    assert_eq!(session.rep_count(), 3);
}
