// ABOUTME: Detection error types for the pose estimator, video source, and recordings
// ABOUTME: Structured errors that convert into AppError with the right recoverability code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Detection Error Types
//!
//! - `DetectionError` - failures raised at the perception boundary
//! - Conversion into `AppError` so the lifecycle layer sees one error type

use thiserror::Error;

use super::{AppError, ErrorCode};

/// Errors raised by the collaborators feeding the detection loop.
///
/// Perception gaps (low-confidence landmarks, no pose in frame) are not
/// errors at all and never show up here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DetectionError {
    /// The pose estimator raised an error for one frame
    #[error("pose estimator failed: {details}")]
    EstimatorFailed {
        /// Message reported by the estimator
        details: String,
    },
    /// The camera is unavailable or permission was denied
    #[error("video source unavailable: {reason}")]
    VideoUnavailable {
        /// Why the source cannot deliver frames
        reason: String,
    },
    /// A recorded keypoint stream could not be read
    #[error("recording '{path}' could not be read: {details}")]
    RecordingUnreadable {
        /// Path of the recording
        path: String,
        /// Underlying I/O failure
        details: String,
    },
    /// A line of a recorded keypoint stream is malformed
    #[error("recording line {line} is malformed: {details}")]
    RecordingMalformed {
        /// One-based line number
        line: usize,
        /// Parser message
        details: String,
    },
}

impl DetectionError {
    /// Create an "estimator failed" error
    #[must_use]
    pub fn estimator_failed(details: impl Into<String>) -> Self {
        Self::EstimatorFailed {
            details: details.into(),
        }
    }

    /// Create a "video unavailable" error
    #[must_use]
    pub fn video_unavailable(reason: impl Into<String>) -> Self {
        Self::VideoUnavailable {
            reason: reason.into(),
        }
    }

    /// Error code this failure maps to
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EstimatorFailed { .. } => ErrorCode::PoseEstimationFailed,
            Self::VideoUnavailable { .. } => ErrorCode::VideoSourceUnavailable,
            Self::RecordingUnreadable { .. } | Self::RecordingMalformed { .. } => {
                ErrorCode::InvalidInput
            }
        }
    }
}

impl From<DetectionError> for AppError {
    fn from(error: DetectionError) -> Self {
        Self::new(error.code(), error.to_string()).with_source(error)
    }
}
