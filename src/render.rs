//! Draw seam for rendering consumers.
//!
//! The core never touches a graphics API; skeleton, point-cloud, and mask
//! drawing emit primitive calls through the [`Canvas`] trait, and the host
//! application maps those onto its own renderer. All draw entry points are
//! safe to call every frame regardless of tracking state.

use nalgebra::{Point2, Point3};

/// Primitive draw surface implemented by the host renderer.
pub trait Canvas {
    /// Filled circle at a projective-space point.
    fn fill_circle(&mut self, center: Point2<f32>, radius: f32);

    /// Line segment between two projective-space points.
    fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, width: f32);

    /// Batch of world-space points, with optional per-point RGBA colors.
    fn draw_points(&mut self, points: &[Point3<f32>], colors: &[[f32; 4]], size: i32);

    /// RGBA image blit (row-major, `width * height * 4` bytes).
    fn draw_image(&mut self, width: usize, height: usize, rgba: &[u8]);
}

/// One recorded primitive, for canvases that capture rather than render.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Circle {
        center: Point2<f32>,
        radius: f32,
    },
    Line {
        from: Point2<f32>,
        to: Point2<f32>,
        width: f32,
    },
    Points {
        count: usize,
        size: i32,
    },
    Image {
        width: usize,
        height: usize,
    },
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Canvas that records every primitive it receives.
    #[derive(Debug, Default)]
    pub struct RecordingCanvas {
        pub calls: Vec<DrawCall>,
    }

    impl Canvas for RecordingCanvas {
        fn fill_circle(&mut self, center: Point2<f32>, radius: f32) {
            self.calls.push(DrawCall::Circle { center, radius });
        }

        fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, width: f32) {
            self.calls.push(DrawCall::Line { from, to, width });
        }

        fn draw_points(&mut self, points: &[Point3<f32>], _colors: &[[f32; 4]], size: i32) {
            self.calls.push(DrawCall::Points {
                count: points.len(),
                size,
            });
        }

        fn draw_image(&mut self, width: usize, height: usize, _rgba: &[u8]) {
            self.calls.push(DrawCall::Image { width, height });
        }
    }
}
