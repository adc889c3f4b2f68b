//! TrackerPipeline for combining a sensor source with the user tracker.

use crate::events::TrackerEvent;
use crate::tracker::user_tracker::{TrackerConfig, UserTracker};

use super::SkeletonSource;

/// Bundles a [`SkeletonSource`] with a [`UserTracker`] for end-to-end
/// per-frame processing.
pub struct TrackerPipeline<S: SkeletonSource> {
    source: S,
    tracker: UserTracker,
}

impl<S: SkeletonSource> TrackerPipeline<S> {
    /// Create a new pipeline with the given source and tracker config.
    pub fn new(source: S, config: TrackerConfig) -> Self {
        Self {
            source,
            tracker: UserTracker::new(config),
        }
    }

    /// Create a new pipeline with default tracker configuration.
    pub fn with_default_config(source: S) -> Self {
        Self::new(source, TrackerConfig::default())
    }

    /// Poll the source once and, if a frame was ready, apply it.
    ///
    /// Returns the lifecycle events the frame caused, or `None` when the
    /// source had no frame, or an acquisition error.
    pub fn process_frame(&mut self) -> Result<Option<Vec<TrackerEvent>>, S::Error> {
        match self.source.next_frame()? {
            Some(frame) => Ok(Some(self.tracker.update(frame))),
            None => Ok(None),
        }
    }

    /// Get a reference to the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &UserTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut UserTracker {
        &mut self.tracker
    }
}
