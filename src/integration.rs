//! Integration module for connecting detector/tracker feeds with the zone tracker.
//!
//! This module provides traits and utilities for plugging any inference
//! backend that already assigns track ids into a [`ZoneTracker`](crate::ZoneTracker).

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::{PipelineError, ZonePipeline};
