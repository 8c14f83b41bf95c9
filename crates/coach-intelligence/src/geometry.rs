// ABOUTME: Joint angle computation from pose keypoints
// ABOUTME: Interior angle at a vertex landmark in degrees, gated on landmark confidence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coach_core::models::{JointTriple, Keypoint, KeypointFrame};

/// Interior angle at `vertex` formed by `proximal` and `distal`, in degrees
///
/// The difference of the two ray headings is folded into [0, 180], so the
/// result does not depend on which side of the body the camera sees and
/// swapping `proximal` with `distal` yields the same angle.
#[must_use]
pub fn joint_angle(proximal: &Keypoint, vertex: &Keypoint, distal: &Keypoint) -> f64 {
    let distal_heading = (distal.y - vertex.y).atan2(distal.x - vertex.x);
    let proximal_heading = (proximal.y - vertex.y).atan2(proximal.x - vertex.x);
    let angle = (distal_heading - proximal_heading).to_degrees().abs();
    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Angle for a joint triple, or `None` if any landmark is not observed
///
/// A `None` means the caller must leave its state untouched for this frame.
#[must_use]
pub fn observed_angle(frame: &KeypointFrame, joints: &JointTriple) -> Option<f64> {
    let proximal = frame.observed(&joints.proximal)?;
    let vertex = frame.observed(&joints.vertex)?;
    let distal = frame.observed(&joints.distal)?;
    Some(joint_angle(proximal, vertex, distal))
}
