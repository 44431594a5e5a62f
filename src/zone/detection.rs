//! Detection input for the zone tracker.

use crate::zone::rect::Rect;
use crate::zone::registry::TrackId;

/// COCO class index for "person".
pub const PERSON_CLASS: u32 = 0;

/// One tracked object reported by the external detector/tracker for a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Identifier from the external tracker, `None` until it assigns one
    pub track_id: Option<TrackId>,
    /// Bounding box in TLBR format (x1, y1, x2, y2)
    pub bbox: Rect,
    /// Detector class index
    pub class_id: u32,
    /// Detection confidence score
    pub score: f32,
}

impl Detection {
    /// A tracked person detection with full confidence.
    pub fn new(track_id: TrackId, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::from_rect(Some(track_id), Rect::new(x1, y1, x2, y2))
    }

    pub fn from_rect(track_id: Option<TrackId>, bbox: Rect) -> Self {
        Self {
            track_id,
            bbox,
            class_id: PERSON_CLASS,
            score: 1.0,
        }
    }

    pub fn with_class(mut self, class_id: u32) -> Self {
        self.class_id = class_id;
        self
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }
}
