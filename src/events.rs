//! Immutable event records describing user, hand, and gesture transitions.
//!
//! Pure value snapshots constructed by the tracker from sensor callback
//! data; they carry a device id, a kind-specific status, and a millisecond
//! timestamp, and have no behavior of their own.

use nalgebra::{Point2, Point3};

use crate::user::UserId;

/// Lifecycle transition of a tracked user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Found,
    Lost,
    CalibrationStarted,
    CalibrationSucceeded,
    CalibrationFailed,
    SkeletonFound,
    SkeletonLost,
}

/// Transition of a tracked hand point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandStatus {
    TrackingStarted,
    TrackingUpdated,
    TrackingStopped,
}

/// Progress of a recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureStatus {
    Progress,
    Recognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserEvent {
    pub device_id: u32,
    pub status: UserStatus,
    pub user_id: UserId,
    pub timestamp_millis: u64,
}

impl UserEvent {
    pub fn new(device_id: u32, status: UserStatus, user_id: UserId, timestamp_millis: u64) -> Self {
        Self {
            device_id,
            status,
            user_id,
            timestamp_millis,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandEvent {
    pub device_id: u32,
    pub status: HandStatus,
    pub hand_id: UserId,
    pub position: Point2<f32>,
    pub world_position: Point3<f32>,
    pub timestamp_millis: u64,
}

impl HandEvent {
    pub fn new(
        device_id: u32,
        status: HandStatus,
        hand_id: UserId,
        position: Point2<f32>,
        world_position: Point3<f32>,
        timestamp_millis: u64,
    ) -> Self {
        Self {
            device_id,
            status,
            hand_id,
            position,
            world_position,
            timestamp_millis,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureEvent {
    pub device_id: u32,
    pub gesture_name: String,
    pub status: GestureStatus,
    /// Completion in `[0, 1]`; 1.0 once recognized.
    pub progress: f32,
    pub position: Point2<f32>,
    pub world_position: Point3<f32>,
    pub timestamp_millis: u64,
}

impl GestureEvent {
    pub fn new(
        device_id: u32,
        gesture_name: impl Into<String>,
        status: GestureStatus,
        progress: f32,
        position: Point2<f32>,
        world_position: Point3<f32>,
        timestamp_millis: u64,
    ) -> Self {
        Self {
            device_id,
            gesture_name: gesture_name.into(),
            status,
            progress,
            position,
            world_position,
            timestamp_millis,
        }
    }
}

/// One entry in the per-update event batch returned by the tracker.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    User(UserEvent),
    Hand(HandEvent),
    Gesture(GestureEvent),
}
