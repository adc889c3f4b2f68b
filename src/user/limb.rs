//! Limb segments and the fixed skeleton topology.

use nalgebra::{Point2, Point3};

use crate::error::TrackError;
use crate::render::Canvas;
use crate::user::joint::{JointOrientation, SkeletonJoint};

/// Radius used when a limb draws as a point marker.
const MARKER_RADIUS: f32 = 10.0;
/// Stroke width used when a limb draws as a segment.
const SEGMENT_WIDTH: f32 = 5.0;

/// Identifier for one of the fixed skeleton limbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimbId {
    Head,
    Neck,

    // hands
    LeftHand,
    RightHand,

    // left arm + shoulder
    LeftShoulder,
    LeftUpperArm,
    LeftLowerArm,

    // right arm + shoulder
    RightShoulder,
    RightUpperArm,
    RightLowerArm,

    // torso
    LeftUpperTorso,
    RightUpperTorso,

    // left lower torso + leg
    LeftLowerTorso,
    LeftUpperLeg,
    LeftLowerLeg,

    // right lower torso + leg
    RightLowerTorso,
    RightUpperLeg,
    RightLowerLeg,

    Hip,
}

impl LimbId {
    /// Number of limbs in the skeleton.
    pub const COUNT: usize = 19;

    /// All limbs in index order.
    pub const ALL: [LimbId; Self::COUNT] = [
        LimbId::Head,
        LimbId::Neck,
        LimbId::LeftHand,
        LimbId::RightHand,
        LimbId::LeftShoulder,
        LimbId::LeftUpperArm,
        LimbId::LeftLowerArm,
        LimbId::RightShoulder,
        LimbId::RightUpperArm,
        LimbId::RightLowerArm,
        LimbId::LeftUpperTorso,
        LimbId::RightUpperTorso,
        LimbId::LeftLowerTorso,
        LimbId::LeftUpperLeg,
        LimbId::LeftLowerLeg,
        LimbId::RightLowerTorso,
        LimbId::RightUpperLeg,
        LimbId::RightLowerLeg,
        LimbId::Hip,
    ];

    /// Positional index of this limb in `[0, COUNT)`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Checked conversion from a numeric index.
    pub fn from_index(index: usize) -> Result<LimbId, TrackError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(TrackError::InvalidLimbIndex(index))
    }

    /// The (start, end) joints this limb spans. Self-loops are point
    /// markers (head, hands), not segments.
    pub fn joints(self) -> (SkeletonJoint, SkeletonJoint) {
        use SkeletonJoint::*;
        match self {
            LimbId::Head => (Head, Head),
            LimbId::Neck => (Head, Neck),
            LimbId::LeftHand => (LeftHand, LeftHand),
            LimbId::RightHand => (RightHand, RightHand),
            LimbId::LeftShoulder => (Neck, LeftShoulder),
            LimbId::LeftUpperArm => (LeftShoulder, LeftElbow),
            LimbId::LeftLowerArm => (LeftElbow, LeftHand),
            LimbId::RightShoulder => (Neck, RightShoulder),
            LimbId::RightUpperArm => (RightShoulder, RightElbow),
            LimbId::RightLowerArm => (RightElbow, RightHand),
            LimbId::LeftUpperTorso => (LeftShoulder, Torso),
            LimbId::RightUpperTorso => (RightShoulder, Torso),
            LimbId::LeftLowerTorso => (Torso, LeftHip),
            LimbId::LeftUpperLeg => (LeftHip, LeftKnee),
            LimbId::LeftLowerLeg => (LeftKnee, LeftFoot),
            LimbId::RightLowerTorso => (Torso, RightHip),
            LimbId::RightUpperLeg => (RightHip, RightKnee),
            LimbId::RightLowerLeg => (RightKnee, RightFoot),
            LimbId::Hip => (LeftHip, RightHip),
        }
    }
}

/// A rigid segment between two skeletal joints, or a point marker when
/// both joints coincide.
///
/// Endpoints are meaningful only while `found` is true; per-frame loss of
/// an individual limb is normal and draws nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limb {
    start_joint: SkeletonJoint,
    end_joint: SkeletonJoint,
    orientation: JointOrientation,
    // projective coordinates
    begin: Point2<f32>,
    end: Point2<f32>,
    // real world coordinates
    world_begin: Point3<f32>,
    world_end: Point3<f32>,
    found: bool,
}

impl Limb {
    pub fn new(start_joint: SkeletonJoint, end_joint: SkeletonJoint) -> Self {
        Self {
            start_joint,
            end_joint,
            orientation: JointOrientation::default(),
            begin: Point2::origin(),
            end: Point2::origin(),
            world_begin: Point3::origin(),
            world_end: Point3::origin(),
            found: false,
        }
    }

    /// Rebind the limb to a joint pair, resetting geometry to the origin
    /// and clearing `found`.
    pub fn set(&mut self, start_joint: SkeletonJoint, end_joint: SkeletonJoint) {
        *self = Limb::new(start_joint, end_joint);
    }

    pub fn start_joint(&self) -> SkeletonJoint {
        self.start_joint
    }

    pub fn end_joint(&self) -> SkeletonJoint {
        self.end_joint
    }

    pub fn orientation(&self) -> &JointOrientation {
        &self.orientation
    }

    /// Begin endpoint in projective coordinates.
    pub fn begin(&self) -> Point2<f32> {
        self.begin
    }

    /// End endpoint in projective coordinates.
    pub fn end(&self) -> Point2<f32> {
        self.end
    }

    pub fn world_begin(&self) -> Point3<f32> {
        self.world_begin
    }

    pub fn world_end(&self) -> Point3<f32> {
        self.world_end
    }

    pub fn is_found(&self) -> bool {
        self.found
    }

    /// True when this limb is a point marker rather than a segment.
    pub fn is_point_marker(&self) -> bool {
        self.start_joint == self.end_joint
    }

    /// Tracker-only write path for a fitted limb.
    pub(crate) fn set_geometry(
        &mut self,
        begin: Point2<f32>,
        end: Point2<f32>,
        world_begin: Point3<f32>,
        world_end: Point3<f32>,
        orientation: JointOrientation,
    ) {
        self.begin = begin;
        self.end = end;
        self.world_begin = world_begin;
        self.world_end = world_end;
        self.orientation = orientation;
        self.found = true;
    }

    pub(crate) fn clear(&mut self) {
        self.set(self.start_joint, self.end_joint);
    }

    /// Emit draw calls for this limb. Silently skips limbs that were not
    /// found this frame; point markers draw as filled circles, everything
    /// else as a segment.
    pub fn draw(&self, canvas: &mut impl Canvas) {
        if !self.found {
            return;
        }
        if self.is_point_marker() {
            canvas.fill_circle(self.begin, MARKER_RADIUS);
        } else {
            canvas.draw_line(self.begin, self.end, SEGMENT_WIDTH);
        }
    }
}
