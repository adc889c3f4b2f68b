use thiserror::Error;

use crate::user::limb::LimbId;

/// Errors produced by the tracking core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrackError {
    /// Numeric limb index outside `0..LimbId::COUNT`.
    #[error("limb index {0} out of range 0..{count}", count = LimbId::COUNT)]
    InvalidLimbIndex(usize),
}
