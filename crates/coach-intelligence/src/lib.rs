// ABOUTME: Rep counting engine for pose-driven workouts
// ABOUTME: Joint angles, exercise profile table, rep state machine, sessions, and plan catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Coach Intelligence
//!
//! Synchronous, allocation-light algorithms that turn keypoint frames into
//! repetition counts. Nothing in this crate performs I/O or awaits; the root
//! crate drives it from its detection loop.
//!
//! Data flows `geometry` → `rep_counter` → `session`, with `catalog`
//! supplying the per-exercise thresholds.

/// Joint angle computation from three landmarks
pub mod geometry;

/// Static exercise profile table with a default entry
pub mod catalog;

/// Debounced two-phase repetition state machine
pub mod rep_counter;

/// Per-exercise session state with goal detection
pub mod session;

/// Built-in workout plans and custom plan builder
pub mod plan_catalog;

pub use catalog::ExerciseCatalog;
pub use geometry::{joint_angle, observed_angle};
pub use rep_counter::{RepCounter, RepUpdate};
pub use session::{ExerciseSession, FrameOutcome, TickOutcome};
