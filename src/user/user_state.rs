/// Lifecycle state of a tracked user.
///
/// A single closed enumeration replaces the four independent status flags
/// of older sensor wrappers; only these five combinations are
/// representable, so skeleton readiness always implies tracking, tracking
/// implies presence, and calibrating can never coincide with a ready
/// skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserState {
    /// Not currently visible to the sensor
    #[default]
    Lost,
    /// Body detected, no position lock yet
    Found,
    /// Center of mass tracked, no skeleton
    Tracking,
    /// Skeleton calibration in progress
    Calibrating,
    /// Calibrated skeleton streaming joints
    SkeletonReady,
}

impl UserState {
    /// The sensor currently sees this body.
    pub fn is_found(self) -> bool {
        self != UserState::Lost
    }

    /// The body's position is locked and followed frame to frame.
    pub fn is_tracking(self) -> bool {
        matches!(
            self,
            UserState::Tracking | UserState::Calibrating | UserState::SkeletonReady
        )
    }

    /// A calibrated skeleton is available.
    pub fn is_skeleton(self) -> bool {
        self == UserState::SkeletonReady
    }

    /// Skeleton calibration is underway.
    pub fn is_calibrating(self) -> bool {
        self == UserState::Calibrating
    }
}
