mod clock;
mod detection;
mod draw;
mod error;
mod rect;
mod registry;
mod track;
mod track_state;
mod zone_tracker;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use detection::{Detection, PERSON_CLASS};
pub use draw::{Color, DrawInstruction, OutlineKind};
pub use error::ZoneError;
pub use rect::{DEFAULT_ZONE_MARGIN, Rect, containment_matrix, contains, expand};
pub use registry::{TrackId, TrackRegistry};
pub use track::Track;
pub use track_state::TrackState;
pub use zone_tracker::{FrameOutput, RejectedDetection, ZoneConfig, ZoneTracker};
