// ABOUTME: Error types for the session runtime, re-exported from coach-core
// ABOUTME: Single AppError/ErrorCode vocabulary shared by the engine, runtime, and CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! The runtime reports every failure as an [`AppError`] carrying an
//! [`ErrorCode`]. Recoverable detection failures travel as
//! [`DetectionError`] until they reach the detection loop, which turns them
//! into `on_error` notifications instead of returning them.

pub use coach_core::errors::{AppError, AppResult, DetectionError, ErrorCode};
