pub mod hand;
pub mod joint;
pub mod limb;
pub mod mask;
pub mod point_cloud;
pub mod tracked_user;
pub mod user_state;

pub use hand::Hand;
pub use joint::{JointOrientation, SkeletonJoint};
pub use limb::{Limb, LimbId};
pub use mask::MaskTexture;
pub use point_cloud::{CloudBuffer, PointCloud};
pub use tracked_user::{TrackedUser, UserConfig};
pub use user_state::UserState;

/// Device-scoped identifier for a tracked body or hand.
pub type UserId = u32;
