//! Trait for sensor-SDK frame sources.

use crate::tracker::frame::SensorFrame;

/// Boundary to the physical sensor SDK.
///
/// Implement this to connect real device bindings to the tracker: each
/// call yields the next completed capture frame, or `None` when no frame
/// is ready yet.
///
/// # Example
///
/// ```ignore
/// use bodytrack_rs::{SkeletonSource, SensorFrame};
///
/// struct MySensor {
///     // Your SDK handle here
/// }
///
/// impl SkeletonSource for MySensor {
///     type Error = std::io::Error;
///
///     fn next_frame(&mut self) -> Result<Option<SensorFrame>, Self::Error> {
///         // Poll the device and translate its callbacks
///         Ok(None)
///     }
/// }
/// ```
pub trait SkeletonSource {
    /// Error type for acquisition failures.
    type Error;

    /// Poll for the next completed sensor frame.
    fn next_frame(&mut self) -> Result<Option<SensorFrame>, Self::Error>;
}
