//! Ownership of all per-track state for one tracking session.

use std::collections::BTreeMap;
use std::time::Duration;

use log::debug;

use crate::zone::error::ZoneError;
use crate::zone::rect::Rect;
use crate::zone::track::Track;
use crate::zone::track_state::TrackState;

/// Identifier assigned by the external tracker.
pub type TrackId = u64;

/// Map from track id to [`Track`].
///
/// Entries are only added by [`get_or_create`](Self::get_or_create) and never
/// removed implicitly; see [`evict_idle`](Self::evict_idle).
#[derive(Debug, Clone, Default)]
pub struct TrackRegistry {
    tracks: BTreeMap<TrackId, Track>,
}

impl TrackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `id`, creating a fresh track at `now` if it is absent.
    ///
    /// The boolean is `true` when the track was created by this call. An
    /// existing track is returned unmodified.
    pub fn get_or_create(&mut self, id: TrackId, bbox: Rect, now: Duration) -> (&Track, bool) {
        let mut is_new = false;
        let track = self.tracks.entry(id).or_insert_with(|| {
            is_new = true;
            Track::new(id, bbox, now)
        });
        if is_new {
            debug!("track {} created at {:?}", id, now);
        }
        (track, is_new)
    }

    /// Freeze the zone of an existing track. Zones are write-once.
    pub fn set_zone(&mut self, id: TrackId, zone: Rect) -> Result<(), ZoneError> {
        let track = self.get_mut(id)?;
        if track.fixed_zone.is_some() {
            return Err(ZoneError::DuplicateZoneAssignment { track_id: id });
        }
        track.fixed_zone = Some(zone);
        track.state = TrackState::Zoned;
        debug!("track {} zone fixed at {:?}", id, zone.to_tlbr());
        Ok(())
    }

    /// Record a new observation of an existing track.
    ///
    /// A track seen again without a zone moves from `New` to `Pending`.
    pub fn update_box(&mut self, id: TrackId, bbox: Rect, now: Duration) -> Result<(), ZoneError> {
        let track = self.get_mut(id)?;
        track.current_box = bbox;
        track.last_seen_at = now;
        if track.state == TrackState::New {
            track.state = TrackState::Pending;
        }
        Ok(())
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.tracks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tracks in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn remove(&mut self, id: TrackId) -> Option<Track> {
        self.tracks.remove(&id)
    }

    /// Drop every track not observed for longer than `ttl` and return their ids.
    pub fn evict_idle(&mut self, now: Duration, ttl: Duration) -> Vec<TrackId> {
        let mut evicted = Vec::new();
        self.tracks.retain(|id, track| {
            let keep = now.saturating_sub(track.last_seen_at) <= ttl;
            if !keep {
                evicted.push(*id);
            }
            keep
        });
        if !evicted.is_empty() {
            debug!("evicted idle tracks {:?}", evicted);
        }
        evicted
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    fn get_mut(&mut self, id: TrackId) -> Result<&mut Track, ZoneError> {
        self.tracks
            .get_mut(&id)
            .ok_or(ZoneError::UnknownTrackReference { track_id: id })
    }
}
