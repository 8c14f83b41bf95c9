// ABOUTME: Keypoint and frame models produced by the external pose estimator
// ABOUTME: Named anatomical landmarks with 2D position and confidence score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::pose::MIN_KEYPOINT_CONFIDENCE;

/// Named anatomical landmark using the 17-point COCO naming
///
/// Estimators that emit more points (`BlazePose` has 33) map the extra names to
/// `Other` so they survive deserialization without being used for angles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Landmark {
    /// Nose
    Nose,
    /// Left eye
    LeftEye,
    /// Right eye
    RightEye,
    /// Left ear
    LeftEar,
    /// Right ear
    RightEar,
    /// Left shoulder
    LeftShoulder,
    /// Right shoulder
    RightShoulder,
    /// Left elbow
    LeftElbow,
    /// Right elbow
    RightElbow,
    /// Left wrist
    LeftWrist,
    /// Right wrist
    RightWrist,
    /// Left hip
    LeftHip,
    /// Right hip
    RightHip,
    /// Left knee
    LeftKnee,
    /// Right knee
    RightKnee,
    /// Left ankle
    LeftAnkle,
    /// Right ankle
    RightAnkle,
    /// Any landmark name not in the COCO set
    Other(String),
}

impl Landmark {
    /// Canonical `snake_case` name
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for Landmark {
    fn from(name: &str) -> Self {
        match name {
            "nose" => Self::Nose,
            "left_eye" => Self::LeftEye,
            "right_eye" => Self::RightEye,
            "left_ear" => Self::LeftEar,
            "right_ear" => Self::RightEar,
            "left_shoulder" => Self::LeftShoulder,
            "right_shoulder" => Self::RightShoulder,
            "left_elbow" => Self::LeftElbow,
            "right_elbow" => Self::RightElbow,
            "left_wrist" => Self::LeftWrist,
            "right_wrist" => Self::RightWrist,
            "left_hip" => Self::LeftHip,
            "right_hip" => Self::RightHip,
            "left_knee" => Self::LeftKnee,
            "right_knee" => Self::RightKnee,
            "left_ankle" => Self::LeftAnkle,
            "right_ankle" => Self::RightAnkle,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for Landmark {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<Landmark> for String {
    fn from(landmark: Landmark) -> Self {
        match landmark {
            Landmark::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One landmark as reported by the pose estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Landmark name
    pub name: Landmark,
    /// Horizontal position in frame pixels
    pub x: f64,
    /// Vertical position in frame pixels (grows downward)
    pub y: f64,
    /// Detection confidence in [0, 1]
    #[serde(alias = "score", alias = "confidenceScore")]
    pub confidence: f64,
}

impl Keypoint {
    /// Create a new keypoint
    #[must_use]
    pub fn new(name: Landmark, x: f64, y: f64, confidence: f64) -> Self {
        Self {
            name,
            x,
            y,
            confidence,
        }
    }

    /// Whether the estimator is confident enough for this point to be used
    #[must_use]
    pub fn is_observed(&self) -> bool {
        self.confidence > MIN_KEYPOINT_CONFIDENCE
    }
}

/// All landmarks for a single pose in a single video frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeypointFrame {
    /// Landmarks in estimator order
    pub keypoints: Vec<Keypoint>,
}

impl KeypointFrame {
    /// Wrap estimator output
    #[must_use]
    pub const fn new(keypoints: Vec<Keypoint>) -> Self {
        Self { keypoints }
    }

    /// Whether the estimator found no pose in this frame
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    /// Look up a landmark regardless of confidence
    #[must_use]
    pub fn get(&self, landmark: &Landmark) -> Option<&Keypoint> {
        self.keypoints.iter().find(|kp| &kp.name == landmark)
    }

    /// Look up a landmark only if it is observed with sufficient confidence
    #[must_use]
    pub fn observed(&self, landmark: &Landmark) -> Option<&Keypoint> {
        self.get(landmark).filter(|kp| kp.is_observed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_names_round_trip_through_strings() {
        assert_eq!(Landmark::from("left_elbow"), Landmark::LeftElbow);
        assert_eq!(String::from(Landmark::RightAnkle), "right_ankle");
        assert_eq!(
            Landmark::from("left_index"),
            Landmark::Other("left_index".to_owned())
        );
    }

    #[test]
    fn test_keypoint_accepts_estimator_score_field() {
        let kp: Keypoint =
            serde_json::from_str(r#"{"name":"left_knee","x":10.0,"y":20.0,"score":0.9}"#).unwrap();
        assert_eq!(kp.name, Landmark::LeftKnee);
        assert!((kp.confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_confidence_threshold_is_exclusive() {
        let at_threshold = Keypoint::new(Landmark::Nose, 0.0, 0.0, 0.3);
        let above = Keypoint::new(Landmark::Nose, 0.0, 0.0, 0.31);
        assert!(!at_threshold.is_observed());
        assert!(above.is_observed());
    }

    #[test]
    fn test_observed_filters_low_confidence() {
        let frame = KeypointFrame::new(vec![
            Keypoint::new(Landmark::LeftHip, 1.0, 1.0, 0.9),
            Keypoint::new(Landmark::LeftKnee, 1.0, 2.0, 0.1),
        ]);
        assert!(frame.observed(&Landmark::LeftHip).is_some());
        assert!(frame.get(&Landmark::LeftKnee).is_some());
        assert!(frame.observed(&Landmark::LeftKnee).is_none());
        assert!(frame.observed(&Landmark::LeftAnkle).is_none());
    }
}
