// ABOUTME: Collaborator interfaces feeding the detection loop: video frames and pose estimates
// ABOUTME: Latest-frame-only video source plus an async, fallible pose estimator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use bytes::Bytes;
use coach_core::models::Keypoint;
use serde::{Deserialize, Serialize};

use crate::errors::DetectionError;

/// One captured video frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    /// Capture order; strictly increasing for new frames
    pub sequence: u64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Encoded pixel data, opaque to the loop
    pub data: Bytes,
}

impl VideoFrame {
    /// Frames with a zero dimension cannot be analysed
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Readiness and geometry of the video source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceStatus {
    /// Frames can be read
    pub ready: bool,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
}

impl SourceStatus {
    /// Ready source with the given dimensions
    #[must_use]
    pub const fn ready(width: u32, height: u32) -> Self {
        Self {
            ready: true,
            width,
            height,
        }
    }

    /// Source still initializing
    #[must_use]
    pub const fn pending() -> Self {
        Self {
            ready: false,
            width: 0,
            height: 0,
        }
    }
}

/// Camera or other frame provider
///
/// Only the newest frame is exposed. Frames that arrive while the loop is
/// busy are overwritten, never queued.
pub trait FrameSource: Send {
    /// Current readiness
    ///
    /// # Errors
    ///
    /// Returns `VideoUnavailable` when the source has failed for good, e.g.
    /// camera permission was denied.
    fn status(&mut self) -> Result<SourceStatus, DetectionError>;

    /// Newest frame, if any has been captured
    fn latest_frame(&mut self) -> Option<VideoFrame>;
}

/// External pose estimator
///
/// Estimation borrows the source immutably so the loop can keep one
/// outstanding request while it polls frames and timers. Implementations
/// that keep state use interior mutability.
#[async_trait]
pub trait PoseSource: Send + Sync {
    /// Keypoints of at most one pose in `frame`
    ///
    /// An empty list means no pose was found, which is not an error.
    ///
    /// # Errors
    ///
    /// Returns `EstimatorFailed` when the estimator raised for this frame.
    async fn estimate(&self, frame: VideoFrame) -> Result<Vec<Keypoint>, DetectionError>;
}
