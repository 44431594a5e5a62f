//! Per-subject tracking state.

use std::time::Duration;

use crate::zone::rect::Rect;
use crate::zone::registry::TrackId;
use crate::zone::track_state::TrackState;

/// A subject reported by the external tracker.
///
/// Fields are read through accessors; only the registry mutates a track.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub(crate) id: TrackId,
    pub(crate) state: TrackState,
    pub(crate) current_box: Rect,
    pub(crate) first_seen_at: Duration,
    pub(crate) last_seen_at: Duration,
    pub(crate) fixed_zone: Option<Rect>,
}

impl Track {
    pub(crate) fn new(id: TrackId, bbox: Rect, now: Duration) -> Self {
        Self {
            id,
            state: TrackState::New,
            current_box: bbox,
            first_seen_at: now,
            last_seen_at: now,
            fixed_zone: None,
        }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn state(&self) -> TrackState {
        self.state
    }

    /// Most recently observed bounding box.
    pub fn current_box(&self) -> Rect {
        self.current_box
    }

    pub fn first_seen_at(&self) -> Duration {
        self.first_seen_at
    }

    pub fn last_seen_at(&self) -> Duration {
        self.last_seen_at
    }

    /// The frozen zone, if the dwell threshold has elapsed.
    pub fn fixed_zone(&self) -> Option<Rect> {
        self.fixed_zone
    }

    /// Time since the first observation. Zero if `now` precedes it.
    pub fn dwell(&self, now: Duration) -> Duration {
        now.saturating_sub(self.first_seen_at)
    }

    /// Whether the current box lies inside the frozen zone. `None` before a zone exists.
    pub fn in_zone(&self) -> Option<bool> {
        self.fixed_zone.map(|zone| self.current_box.is_inside(&zone))
    }
}
