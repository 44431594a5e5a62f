//! Dwell-time presence zones for tracked subjects.
//!
//! An external detector/tracker reports `(track_id, bbox)` pairs every frame.
//! Once a track has been observed for the configured dwell time, a zone is
//! frozen around its box; from then on every frame says whether the subject is
//! still inside that zone. The crate only produces [`DrawInstruction`]s, it
//! never touches pixels.

pub mod integration;
pub mod zone;

pub use integration::{DetectionBuilder, DetectionSource, IntoDetections, PipelineError, ZonePipeline};
pub use zone::{
    Clock, Color, Detection, DrawInstruction, FrameOutput, ManualClock, MonotonicClock,
    OutlineKind, Rect, Track, TrackId, TrackRegistry, TrackState, ZoneConfig, ZoneError,
    ZoneTracker,
};
