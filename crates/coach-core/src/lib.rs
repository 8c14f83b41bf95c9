// ABOUTME: Core types and constants for the rep coach workspace
// ABOUTME: Foundation crate with error handling, keypoint/exercise/plan models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Coach Core
//!
//! Foundation crate providing shared types and constants for pose-driven
//! repetition counting. This crate is designed to change infrequently so the
//! algorithm crate and the session runtime can build on a stable base.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DetectionError`
//! - **constants**: Thresholds, timing defaults, and exercise identifiers
//! - **models**: Keypoints, exercise profiles, goals, and workout plans
//! - **formatters**: Human-readable rendering of elapsed time

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (keypoints, exercise profiles, plans)
pub mod models;

/// Display helpers shared by the runtime and the CLI
pub mod formatters;
