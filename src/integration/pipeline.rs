//! ZonePipeline for combining detection with zone tracking.

use thiserror::Error;

use crate::zone::{Clock, FrameOutput, MonotonicClock, ZoneConfig, ZoneError, ZoneTracker};

use super::DetectionSource;

/// Failure of one pipeline step.
#[derive(Error, Debug)]
pub enum PipelineError<E> {
    #[error("detection failed: {0}")]
    Detection(E),
    #[error(transparent)]
    Zone(#[from] ZoneError),
}

/// Bundles a `DetectionSource`, a clock and a `ZoneTracker`.
///
/// Each call to [`process_frame`](Self::process_frame) samples the clock once,
/// so every detection of a frame shares the same timestamp.
pub struct ZonePipeline<D: DetectionSource, C: Clock = MonotonicClock> {
    detector: D,
    clock: C,
    tracker: ZoneTracker,
}

impl<D: DetectionSource> ZonePipeline<D> {
    /// Create a new pipeline with default zone configuration and a monotonic clock.
    pub fn with_default_config(detector: D) -> Self {
        Self {
            detector,
            clock: MonotonicClock::new(),
            tracker: ZoneTracker::with_default_config(),
        }
    }
}

impl<D: DetectionSource, C: Clock> ZonePipeline<D, C> {
    pub fn new(detector: D, clock: C, config: ZoneConfig) -> Result<Self, ZoneError> {
        Ok(Self {
            detector,
            clock,
            tracker: ZoneTracker::new(config)?,
        })
    }

    /// Process a single frame and return its draw instructions.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameOutput, PipelineError<D::Error>> {
        let detections = self
            .detector
            .detect(input, width, height)
            .map_err(PipelineError::Detection)?;
        let now = self.clock.now();
        Ok(self.tracker.process_frame(&detections, now)?)
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Get a reference to the underlying zone tracker.
    pub fn tracker(&self) -> &ZoneTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying zone tracker.
    pub fn tracker_mut(&mut self) -> &mut ZoneTracker {
        &mut self.tracker
    }
}
