mod frame;
mod pipeline;
mod source;
mod user_tracker;

pub use frame::{
    BodyObservation, BodyPhase, DepthMap, GestureObservation, GesturePhase, HandObservation,
    HandPhase, JointSample, SensorFrame,
};
pub use pipeline::TrackerPipeline;
pub use source::SkeletonSource;
pub use user_tracker::{TrackerConfig, UserTracker};
