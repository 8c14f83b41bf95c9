// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for pose thresholds, timing, calories, and exercise ids
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat namespace.

/// Pose estimator output handling
pub mod pose {
    /// Landmarks at or below this confidence are treated as not observed
    pub const MIN_KEYPOINT_CONFIDENCE: f64 = 0.3;
}

/// Detection loop and timer defaults
pub mod timing {
    /// Frame interval for a ~30 Hz display refresh
    pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 33;
    /// Delay between the video source becoming ready and the first detection
    pub const DEFAULT_WARMUP_MS: u64 = 500;
    /// Period of the elapsed-time timer
    pub const DEFAULT_TICK_MS: u64 = 1000;
    /// Consecutive estimator failures after which each further failure is warn-logged
    pub const CONSECUTIVE_FAILURE_WARN_THRESHOLD: u32 = 3;
}

/// Energy estimates
pub mod calories {
    /// Calories per rep or per second when a profile does not specify one
    pub const DEFAULT_CALORIES_PER_UNIT: f64 = 0.5;
}

/// Plan estimation constants
pub mod plans {
    /// Seconds assumed per repetition when estimating plan length
    pub const SECONDS_PER_REP_ESTIMATE: u32 = 5;
    /// Sets assumed when a custom entry does not specify any
    pub const DEFAULT_SETS: u32 = 3;
    /// Prefix of generated custom plan ids
    pub const CUSTOM_PLAN_PREFIX: &str = "custom_";
}

/// Default angle thresholds (degrees) for exercises without a profile
pub mod default_thresholds {
    /// Elbow angle below which an arm is considered curled ("up")
    pub const ARM_UP_ANGLE: f64 = 50.0;
    /// Elbow angle above which an arm is considered extended ("down")
    pub const ARM_DOWN_ANGLE: f64 = 160.0;
    /// Knee angle above which a leg is considered extended ("up")
    pub const LEG_UP_ANGLE: f64 = 160.0;
    /// Knee angle below which a leg is considered bent ("down")
    pub const LEG_DOWN_ANGLE: f64 = 90.0;
}

/// Stable exercise identifiers used by the built-in profile table
pub mod exercise_ids {
    /// Bicep curl
    pub const BICEP_CURL: &str = "bicep_curl";
    /// Bodyweight squat
    pub const SQUAT: &str = "squat";
    /// Push-up
    pub const PUSH_UP: &str = "push_up";
    /// Shoulder press
    pub const SHOULDER_PRESS: &str = "shoulder_press";
    /// Plank hold
    pub const PLANK: &str = "plank";
    /// Pull-up
    pub const PULL_UP: &str = "pull_up";
    /// Lunge
    pub const LUNGE: &str = "lunge";
    /// Jumping jacks
    pub const JUMPING_JACKS: &str = "jumping_jacks";
    /// Burpees
    pub const BURPEES: &str = "burpees";
    /// Mountain climbers
    pub const MOUNTAIN_CLIMBERS: &str = "mountain_climbers";
    /// Fallback profile for unknown exercises
    pub const DEFAULT: &str = "default";
}

/// Messages delivered through `on_error` notifications
pub mod messages {
    /// Transient estimator failure
    pub const DETECTION_FAILED: &str = "Pose detection failed";
    /// Unknown exercise with no fallback
    pub const INVALID_EXERCISE: &str = "Invalid exercise configuration";
}

/// Service identification for structured logging
pub mod service_names {
    /// Service name reported in logs
    pub const REP_COACH: &str = "rep-coach";
}

/// Environment variable names read by the configuration layer
pub mod env_config {
    /// Detection frame interval in milliseconds
    pub const FRAME_INTERVAL_MS: &str = "COACH_FRAME_INTERVAL_MS";
    /// Warm-up delay in milliseconds
    pub const WARMUP_MS: &str = "COACH_WARMUP_MS";
    /// Elapsed-time timer period in milliseconds
    pub const TICK_MS: &str = "COACH_TICK_MS";
    /// Whether unknown exercises fall back to the default profile
    pub const ALLOW_DEFAULT_PROFILE: &str = "COACH_ALLOW_DEFAULT_PROFILE";
    /// Whether the detection loop returns as soon as the goal is reached
    pub const STOP_ON_GOAL: &str = "COACH_STOP_ON_GOAL";
    /// Deployment environment name
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}
