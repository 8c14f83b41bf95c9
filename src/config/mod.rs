// ABOUTME: Configuration module for the session runtime
// ABOUTME: Environment-driven settings for the detection loop, timers, and profile fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment variable parsing and validation
pub mod environment;

pub use environment::{CoachConfig, DetectionConfig, Environment};
