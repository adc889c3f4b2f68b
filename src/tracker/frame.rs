//! Per-frame observation data handed over by the sensor SDK.

use nalgebra::{Point2, Point3};
use ndarray::Array2;

use crate::user::joint::{JointOrientation, SkeletonJoint};
use crate::user::UserId;

/// One fitted joint sample: both coordinate spaces, orientation, and the
/// fitter's position confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSample {
    pub joint: SkeletonJoint,
    pub position: Point2<f32>,
    pub world_position: Point3<f32>,
    pub orientation: JointOrientation,
    pub position_confidence: f32,
}

/// Where the sensor believes one body is in its tracking lifecycle this
/// frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPhase {
    /// Body present, not yet position-locked
    Detected,
    /// Center of mass locked, no skeleton
    Tracking,
    /// Skeleton calibration underway
    Calibrating,
    /// Calibration attempt failed; back to position tracking
    CalibrationFailed,
    /// Calibrated skeleton streaming joints
    SkeletonTracked,
    /// Sensor reports the body gone
    Lost,
}

/// One body as reported this frame. `joints` is populated only in the
/// `SkeletonTracked` phase.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyObservation {
    pub user_id: UserId,
    pub phase: BodyPhase,
    pub centroid: Point3<f32>,
    pub joints: Vec<JointSample>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandPhase {
    Started,
    Updated,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandObservation {
    pub hand_id: UserId,
    pub phase: HandPhase,
    pub position: Point2<f32>,
    pub world_position: Point3<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GesturePhase {
    /// In progress, with completion in `[0, 1]`
    Progress(f32),
    Recognized,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureObservation {
    pub name: String,
    pub phase: GesturePhase,
    pub position: Point2<f32>,
    pub world_position: Point3<f32>,
}

/// Dense world-space depth samples for the whole frame, row-major.
/// Indexed in lock-step with the scene-label map.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthMap {
    width: usize,
    height: usize,
    points: Vec<Point3<f32>>,
    colors: Option<Vec<[f32; 4]>>,
}

impl DepthMap {
    /// `points` must hold exactly `width * height` samples; `colors`, when
    /// present, the same.
    pub fn new(
        width: usize,
        height: usize,
        points: Vec<Point3<f32>>,
        colors: Option<Vec<[f32; 4]>>,
    ) -> Self {
        debug_assert_eq!(points.len(), width * height);
        if let Some(colors) = &colors {
            debug_assert_eq!(colors.len(), width * height);
        }
        Self {
            width,
            height,
            points,
            colors,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn point(&self, x: usize, y: usize) -> Point3<f32> {
        self.points[y * self.width + x]
    }

    pub fn color(&self, x: usize, y: usize) -> Option<[f32; 4]> {
        self.colors.as_ref().map(|c| c[y * self.width + x])
    }
}

/// Everything the sensor hands over for one capture frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorFrame {
    pub timestamp_millis: u64,
    pub bodies: Vec<BodyObservation>,
    pub hands: Vec<HandObservation>,
    pub gestures: Vec<GestureObservation>,
    /// Per-pixel user labels, `(height, width)`; 0 is background.
    pub scene_labels: Option<Array2<u16>>,
    pub depth: Option<DepthMap>,
}

impl Default for BodyObservation {
    fn default() -> Self {
        Self {
            user_id: 0,
            phase: BodyPhase::Detected,
            centroid: Point3::origin(),
            joints: Vec::new(),
        }
    }
}
