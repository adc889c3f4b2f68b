//! Per-user skeleton tracking state for depth-sensor pipelines.
//!
//! Models what a depth/skeleton sensor knows about each body it sees: the
//! lifecycle state machine (lost, found, tracking, calibrating, skeleton
//! ready), limb geometry in projective and world space, the point cloud
//! behind a front/back frame buffer, the per-user depth mask, and the
//! discrete user/hand/gesture events.
//!
//! The sensor SDK sits behind [`SkeletonSource`]; [`UserTracker`] is the
//! sole writer of user state, applying one [`SensorFrame`] per update and
//! returning the events it caused. Consumers read [`TrackedUser`]
//! accessors and emit draw calls through the [`render::Canvas`] seam.

mod error;
pub mod events;
pub mod render;
pub mod tracker;
pub mod user;

pub use error::TrackError;
pub use events::{
    GestureEvent, GestureStatus, HandEvent, HandStatus, TrackerEvent, UserEvent, UserStatus,
};
pub use tracker::{
    BodyObservation, BodyPhase, SensorFrame, SkeletonSource, TrackerConfig, TrackerPipeline,
    UserTracker,
};
pub use user::{
    Hand, JointOrientation, Limb, LimbId, MaskTexture, PointCloud, SkeletonJoint, TrackedUser,
    UserConfig, UserId, UserState,
};
