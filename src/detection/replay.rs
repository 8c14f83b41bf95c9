// ABOUTME: Recorded keypoint streams replayed through the detection loop
// ABOUTME: JSON-lines recordings, a replaying pose source, and a synthetic frame source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Replay sources
//!
//! A recording is a JSON-lines file. Each non-blank line that does not start
//! with `#` is one estimator result:
//!
//! ```text
//! {"keypoints": [{"name": "left_elbow", "x": 0.5, "y": 0.4, "confidence": 0.9}, ...]}
//! [{"name": "left_elbow", "x": 0.5, "y": 0.4, "score": 0.9}, ...]
//! {"error": "backend lost"}
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use coach_core::models::{JointTriple, Keypoint};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use super::sources::{FrameSource, PoseSource, SourceStatus, VideoFrame};
use super::DetectionHandle;
use crate::errors::{AppResult, DetectionError};

/// One recorded estimator result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordedEntry {
    /// Keypoints of one pose (possibly empty)
    Pose {
        /// Estimated landmarks
        keypoints: Vec<Keypoint>,
    },
    /// Estimator failure
    Failure {
        /// Message the estimator raised
        error: String,
    },
    /// Bare keypoint array as emitted by most estimators
    Bare(Vec<Keypoint>),
}

impl RecordedEntry {
    fn into_result(self) -> Result<Vec<Keypoint>, DetectionError> {
        match self {
            Self::Pose { keypoints } | Self::Bare(keypoints) => Ok(keypoints),
            Self::Failure { error } => Err(DetectionError::estimator_failed(error)),
        }
    }
}

/// Ordered estimator results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    entries: Vec<RecordedEntry>,
}

impl Recording {
    /// Recording from in-memory entries
    #[must_use]
    pub const fn new(entries: Vec<RecordedEntry>) -> Self {
        Self { entries }
    }

    /// Parse JSON-lines text
    ///
    /// # Errors
    ///
    /// Returns `RecordingMalformed` with the one-based line number of the
    /// first line that is not a valid entry.
    pub fn parse(text: &str) -> Result<Self, DetectionError> {
        let entries = text
            .lines()
            .enumerate()
            .filter(|(_, line)| {
                let line = line.trim();
                !line.is_empty() && !line.starts_with('#')
            })
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|e| DetectionError::RecordingMalformed {
                    line: index + 1,
                    details: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Read and parse a recording file
    ///
    /// # Errors
    ///
    /// Returns `RecordingUnreadable` if the file cannot be read and
    /// `RecordingMalformed` if a line cannot be parsed.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DetectionError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .await
            .map_err(|e| DetectionError::RecordingUnreadable {
                path: path.display().to_string(),
                details: e.to_string(),
            })?;
        let recording = Self::parse(&text)?;
        info!(
            recording.path = %path.display(),
            recording.entries = recording.len(),
            "Recording loaded"
        );
        Ok(recording)
    }

    /// Serialize back to JSON-lines
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if an entry cannot be encoded.
    pub fn to_jsonl(&self) -> AppResult<String> {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&serde_json::to_string(entry)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Recorded entries in order
    #[must_use]
    pub fn entries(&self) -> &[RecordedEntry] {
        &self.entries
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the recording has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Keypoints whose `joints` form `angle_degrees` at the vertex
///
/// The vertex sits at the origin, the proximal point straight above it and
/// the distal point rotated by the angle. Useful for building recordings.
#[must_use]
pub fn synthetic_pose(joints: &JointTriple, angle_degrees: f64, confidence: f64) -> Vec<Keypoint> {
    let radians = angle_degrees.to_radians();
    vec![
        Keypoint::new(joints.proximal.clone(), 0.0, 1.0, confidence),
        Keypoint::new(joints.vertex.clone(), 0.0, 0.0, confidence),
        Keypoint::new(joints.distal.clone(), radians.sin(), radians.cos(), confidence),
    ]
}

/// Pose source answering from a recording, one entry per call
///
/// Once the recording is exhausted the source either wraps around
/// (`repeat`) or stops the attached detection handle and answers with
/// empty poses.
#[derive(Debug)]
pub struct ReplayPoseSource {
    recording: Recording,
    position: AtomicUsize,
    repeat: bool,
    latency: Duration,
    handle: Option<DetectionHandle>,
}

impl ReplayPoseSource {
    /// Source replaying `recording` once
    #[must_use]
    pub const fn new(recording: Recording) -> Self {
        Self {
            recording,
            position: AtomicUsize::new(0),
            repeat: false,
            latency: Duration::ZERO,
            handle: None,
        }
    }

    /// Wrap around instead of stopping at the end
    #[must_use]
    pub const fn repeating(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    /// Simulated estimator latency per call
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Handle stopped when the recording runs out
    #[must_use]
    pub fn stop_when_exhausted(mut self, handle: DetectionHandle) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Number of estimate calls answered so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.position.load(Ordering::SeqCst)
    }

    /// Whether every entry has been replayed at least once
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.calls() >= self.recording.len()
    }
}

#[async_trait]
impl PoseSource for ReplayPoseSource {
    async fn estimate(&self, frame: VideoFrame) -> Result<Vec<Keypoint>, DetectionError> {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
        let call = self.position.fetch_add(1, Ordering::SeqCst);
        let len = self.recording.len();
        let index = if self.repeat && len > 0 { call % len } else { call };

        let Some(entry) = self.recording.entries().get(index) else {
            if call == len {
                debug!(frame.sequence = frame.sequence, "Recording exhausted");
                if let Some(handle) = &self.handle {
                    handle.stop();
                }
            }
            return Ok(Vec::new());
        };
        entry.clone().into_result()
    }
}

/// Frame source producing blank frames of a fixed size
#[derive(Debug, Clone)]
pub struct ReplayFrameSource {
    width: u32,
    height: u32,
    sequence: u64,
    created_at: Instant,
    ready_after: Duration,
    failure: Option<String>,
}

impl ReplayFrameSource {
    /// Source that is ready immediately
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            sequence: 0,
            created_at: Instant::now(),
            ready_after: Duration::ZERO,
            failure: None,
        }
    }

    /// Report "not ready" until `delay` after creation
    #[must_use]
    pub const fn with_ready_after(mut self, delay: Duration) -> Self {
        self.ready_after = delay;
        self
    }

    /// Source whose status always fails, like a denied camera
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::new(0, 0)
        }
    }

    /// Frames handed out so far
    #[must_use]
    pub const fn frames_captured(&self) -> u64 {
        self.sequence
    }
}

impl FrameSource for ReplayFrameSource {
    fn status(&mut self) -> Result<SourceStatus, DetectionError> {
        if let Some(reason) = &self.failure {
            return Err(DetectionError::video_unavailable(reason.clone()));
        }
        if self.created_at.elapsed() < self.ready_after {
            return Ok(SourceStatus::pending());
        }
        Ok(SourceStatus::ready(self.width, self.height))
    }

    fn latest_frame(&mut self) -> Option<VideoFrame> {
        self.sequence += 1;
        Some(VideoFrame {
            sequence: self.sequence,
            width: self.width,
            height: self.height,
            data: Bytes::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_intelligence::joint_angle;

    #[test]
    fn test_parse_all_entry_shapes() {
        let text = r#"
# warm-up
{"keypoints": [{"name": "left_elbow", "x": 0.1, "y": 0.2, "confidence": 0.9}]}
[{"name": "nose", "x": 0.5, "y": 0.1, "score": 0.8}]
{"error": "backend lost"}

{"keypoints": []}
"#;
        let recording = Recording::parse(text).unwrap();
        assert_eq!(recording.len(), 4);
        assert!(matches!(recording.entries()[2], RecordedEntry::Failure { .. }));
        assert!(matches!(recording.entries()[1], RecordedEntry::Bare(ref points) if points.len() == 1));
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let error = Recording::parse("{\"keypoints\": []}\n\n{not json}\n").unwrap_err();
        assert!(matches!(error, DetectionError::RecordingMalformed { line: 3, .. }));
    }

    #[test]
    fn test_synthetic_pose_angle() {
        let pose = synthetic_pose(&JointTriple::LEFT_ELBOW, 40.0, 0.9);
        let angle = joint_angle(&pose[0], &pose[1], &pose[2]);
        assert!((angle - 40.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_exhausted_source_stops_handle() {
        let handle = DetectionHandle::new();
        let source = ReplayPoseSource::new(Recording::new(vec![RecordedEntry::Failure {
            error: "boom".into(),
        }]))
        .stop_when_exhausted(handle.clone());
        let mut frames = ReplayFrameSource::new(640, 480);

        let first = source.estimate(frames.latest_frame().unwrap()).await;
        assert!(first.is_err());
        assert!(handle.is_running());

        let second = source.estimate(frames.latest_frame().unwrap()).await.unwrap();
        assert!(second.is_empty());
        assert!(!handle.is_running());
        assert!(source.is_exhausted());
    }

    #[test]
    fn test_unavailable_frame_source() {
        let mut frames = ReplayFrameSource::unavailable("permission denied");
        assert!(matches!(
            frames.status(),
            Err(DetectionError::VideoUnavailable { .. })
        ));
    }
}
