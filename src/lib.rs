// ABOUTME: Main library entry point for the rep coach session runtime
// ABOUTME: Drives pose estimates through rep counting and walks users through workout plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Rep Coach
//!
//! Runtime around the `coach-intelligence` rep counting engine. An external
//! pose estimator supplies keypoints; this crate turns them into repetition
//! counts, goal events, and workout summaries.
//!
//! ## Architecture
//!
//! - **Detection**: cooperative loop that paces frames, calls the estimator,
//!   and drives the elapsed-time timer
//! - **Lifecycle**: workout state machine owning the plan and the active session
//! - **Notifications**: observer interface towards the UI
//! - **Config** and **Logging**: environment-driven settings and tracing setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use rep_coach::config::CoachConfig;
//! use rep_coach::detection::replay::{ReplayFrameSource, ReplayPoseSource, Recording};
//! use rep_coach::detection::DetectionLoop;
//! use rep_coach::errors::AppResult;
//! use rep_coach::lifecycle::WorkoutManager;
//! use rep_coach::notifications::TracingObserver;
//! use rep_coach::plan_catalog::find_plan;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = CoachConfig::from_env()?;
//!     let mut manager = WorkoutManager::from_config(&config)?;
//!     let mut observer = TracingObserver;
//!     manager.start_workout(find_plan("beginner_fullbody")?, &mut observer)?;
//!
//!     let recording = Recording::load("squats.jsonl").await?;
//!     let mut detection = DetectionLoop::new(
//!         ReplayPoseSource::new(recording),
//!         ReplayFrameSource::new(640, 480),
//!         config.detection,
//!     );
//!     let exit = detection.run(&mut manager, &mut observer).await?;
//!     println!("detection finished: {exit:?}");
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Detection loop, source interfaces, and replay sources
pub mod detection;

/// Unified error handling re-exported from `coach-core`
pub mod errors;

/// Workout lifecycle manager
pub mod lifecycle;

/// Structured logging setup
pub mod logging;

/// Session notifications towards the UI
pub mod notifications;

pub use coach_core::{constants, formatters, models};
pub use coach_intelligence::{catalog, geometry, plan_catalog, rep_counter, session};
