//! Minimal tracked hand point.

use nalgebra::{Point2, Point3};

use crate::user::UserId;

/// A single tracked hand: id, positions in both coordinate spaces, and a
/// tracking flag. Mutated only by the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hand {
    pub(crate) id: UserId,
    pub(crate) position: Point2<f32>,
    pub(crate) world_position: Point3<f32>,
    pub(crate) tracking: bool,
}

impl Hand {
    pub(crate) fn new(id: UserId, position: Point2<f32>, world_position: Point3<f32>) -> Self {
        Self {
            id,
            position,
            world_position,
            tracking: true,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    /// Projective-space position.
    pub fn position(&self) -> Point2<f32> {
        self.position
    }

    pub fn world_position(&self) -> Point3<f32> {
        self.world_position
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }
}
