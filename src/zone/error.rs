//! Error types for zone tracking.

use thiserror::Error;

use crate::zone::registry::TrackId;

/// Errors raised by the geometry layer, the track registry and the zone tracker.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ZoneError {
    /// A rectangle has non-finite or inverted coordinates.
    #[error("invalid geometry: ({x1}, {y1}, {x2}, {y2})")]
    InvalidGeometry { x1: f32, y1: f32, x2: f32, y2: f32 },

    /// A zone was assigned to a track that already has one. Zones are write-once.
    #[error("track {track_id} already has a fixed zone")]
    DuplicateZoneAssignment { track_id: TrackId },

    /// An update referenced a track that is not in the registry.
    #[error("unknown track {track_id}")]
    UnknownTrackReference { track_id: TrackId },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ZoneError {
    /// Whether the error is a broken internal invariant rather than bad input.
    pub fn is_defect(&self) -> bool {
        matches!(
            self,
            Self::DuplicateZoneAssignment { .. } | Self::UnknownTrackReference { .. }
        )
    }
}
