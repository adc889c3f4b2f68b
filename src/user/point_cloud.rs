//! Point cloud storage and the front/back frame buffer.

use nalgebra::Point3;

/// One frame's worth of depth samples for a user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    vertices: Vec<Point3<f32>>,
    colors: Vec<[f32; 4]>,
}

impl PointCloud {
    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    /// Per-vertex RGBA colors; empty when the depth source carries none.
    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.vertices.clear();
        self.colors.clear();
    }

    pub(crate) fn push(&mut self, vertex: Point3<f32>, color: Option<[f32; 4]>) {
        self.vertices.push(vertex);
        if let Some(color) = color {
            self.colors.push(color);
        }
    }
}

/// Explicit two-slot front/back buffer for the point cloud.
///
/// The tracker fills the back slot while consumers read the front one;
/// `swap` is an index flip performed only at frame boundaries, so a front
/// reference taken before the swap is never written through.
#[derive(Debug, Clone, Default)]
pub struct CloudBuffer {
    slots: [PointCloud; 2],
    front: usize,
}

impl CloudBuffer {
    /// The cloud currently readable by consumers.
    pub fn front(&self) -> &PointCloud {
        &self.slots[self.front]
    }

    pub(crate) fn back_mut(&mut self) -> &mut PointCloud {
        &mut self.slots[1 - self.front]
    }

    /// Publish the back slot. Frame-boundary only.
    pub(crate) fn swap(&mut self) {
        self.front = 1 - self.front;
    }

    pub(crate) fn clear(&mut self) {
        self.slots[0].clear();
        self.slots[1].clear();
    }
}
