/// Zone lifecycle state of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Created on this frame, no zone
    #[default]
    New,
    /// Seen again, dwell timer still running
    Pending,
    /// Zone frozen; occupancy is re-evaluated every frame
    Zoned,
}

impl TrackState {
    pub fn has_zone(&self) -> bool {
        matches!(self, Self::Zoned)
    }
}
