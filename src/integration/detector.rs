//! Trait for detection and tracking backends.

use crate::zone::{Detection, TrackId};

/// Trait for detection backends that feed the zone tracker.
///
/// Implementations must report a stable `track_id` per subject across frames;
/// the zone tracker does no association of its own.
///
/// # Example
///
/// ```ignore
/// use presence_zone::{Detection, DetectionSource};
///
/// struct MyTracker {
///     // Your detector and tracker here
/// }
///
/// impl DetectionSource for MyTracker {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<Detection>, Self::Error> {
///         // Run inference and association, return tracked detections
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Run inference on raw image data and return tracked detections.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}

/// Helper trait for converting model-specific outputs to `Detection`.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

/// `(track_id, [x1, y1, x2, y2])` tuples, as emitted by most tracker bindings.
impl IntoDetections for &[(TrackId, [f32; 4])] {
    fn into_detections(self) -> Vec<Detection> {
        self.iter()
            .map(|&(id, [x1, y1, x2, y2])| Detection::new(id, x1, y1, x2, y2))
            .collect()
    }
}
