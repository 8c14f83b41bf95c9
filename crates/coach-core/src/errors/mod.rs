// ABOUTME: Unified error types for the rep coach workspace
// ABOUTME: Defines ErrorCode taxonomy, AppError with chaining, and the AppResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! Every fallible operation in the workspace returns [`AppResult`]. Errors carry
//! an [`ErrorCode`] that tells the caller whether the condition is recoverable
//! (a transient estimator failure) or requires user action (an unknown exercise,
//! an unavailable camera).

/// Detection-specific error types (pose estimator, video source, recordings)
pub mod detection;

pub use detection::DetectionError;

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Standard error codes used throughout the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Caller supplied invalid input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Value is outside the accepted range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // State (4000-4999)
    /// Requested resource does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    /// Operation is not allowed in the current workout state
    #[serde(rename = "INVALID_STATE")]
    InvalidState = 4004,

    // Perception (5000-5999)
    /// The external pose estimator raised an error
    #[serde(rename = "POSE_ESTIMATION_FAILED")]
    PoseEstimationFailed = 5000,
    /// Camera permission denied or video source unavailable
    #[serde(rename = "VIDEO_SOURCE_UNAVAILABLE")]
    VideoSourceUnavailable = 5001,

    // Configuration (6000-6999)
    /// Configuration value could not be parsed or is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,
    /// Exercise id has no profile and no default is available
    #[serde(rename = "UNKNOWN_EXERCISE")]
    UnknownExercise = 6003,

    // Internal (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::InvalidState => "The operation is not allowed in the current workout state",
            Self::PoseEstimationFailed => "Pose detection failed",
            Self::VideoSourceUnavailable => "The camera is unavailable",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::UnknownExercise => "Invalid exercise configuration",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the detection loop may continue after an error with this code
    ///
    /// Recoverable conditions are reported and then retried on the next frame.
    /// Everything else halts the session and needs user action.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::PoseEstimationFailed)
    }
}

/// Unified error type for the workspace
#[derive(Debug)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Whether the caller may keep going after this error
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        self.code.is_recoverable()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn Error + 'static))
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience functions for creating common errors
impl AppError {
    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Value out of range
    #[must_use]
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Operation not allowed in the current state
    #[must_use]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidState, message)
    }

    /// Invalid configuration value
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Exercise id with no profile and no fallback
    #[must_use]
    pub fn unknown_exercise(exercise_id: &str) -> Self {
        Self::new(
            ErrorCode::UnknownExercise,
            format!("no profile for exercise '{exercise_id}' and default profile is disabled"),
        )
    }

    /// Video source failure
    #[must_use]
    pub fn video_source(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::VideoSourceUnavailable, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_estimator_failures_are_recoverable() {
        assert!(ErrorCode::PoseEstimationFailed.is_recoverable());
        assert!(!ErrorCode::VideoSourceUnavailable.is_recoverable());
        assert!(!ErrorCode::UnknownExercise.is_recoverable());
        assert!(!ErrorCode::InvalidState.is_recoverable());
    }

    #[test]
    fn test_display_includes_description_and_message() {
        let error = AppError::unknown_exercise("handstand");
        let rendered = error.to_string();
        assert!(rendered.starts_with("Invalid exercise configuration"));
        assert!(rendered.contains("handstand"));
    }

    #[test]
    fn test_error_code_serializes_screaming_case() {
        let json = serde_json::to_string(&ErrorCode::VideoSourceUnavailable).unwrap();
        assert_eq!(json, "\"VIDEO_SOURCE_UNAVAILABLE\"");
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let parse_error = serde_json::from_str::<u32>("not a number").unwrap_err();
        let error = AppError::from(parse_error);
        assert_eq!(error.code, ErrorCode::SerializationError);
        assert!(Error::source(&error).is_some());
    }
}
