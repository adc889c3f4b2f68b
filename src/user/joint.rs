//! Skeletal joint vocabulary and joint orientation.

use nalgebra::Rotation3;

/// Named skeletal joint reported by the sensor collaborator.
///
/// This is the closed vocabulary consumed by the limb topology; the
/// collaborator must map its own joint identifiers onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkeletonJoint {
    Head,
    Neck,
    Torso,
    LeftShoulder,
    LeftElbow,
    LeftHand,
    RightShoulder,
    RightElbow,
    RightHand,
    LeftHip,
    LeftKnee,
    LeftFoot,
    RightHip,
    RightKnee,
    RightFoot,
}

/// Orientation of a joint, with the fitter's confidence in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointOrientation {
    /// World-space rotation of the joint frame.
    pub rotation: Rotation3<f32>,
    /// Fit confidence in `[0, 1]`.
    pub confidence: f32,
}

impl Default for JointOrientation {
    fn default() -> Self {
        Self {
            rotation: Rotation3::identity(),
            confidence: 0.0,
        }
    }
}
