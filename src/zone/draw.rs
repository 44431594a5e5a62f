//! Draw instructions handed to the renderer.

use crate::zone::rect::Rect;
use crate::zone::registry::TrackId;

/// Semantic outline color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Newly tracked, no zone yet. Rendered like `InZone`.
    Neutral,
    InZone,
    OutOfZone,
}

impl Color {
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            Self::Neutral | Self::InZone => [0, 255, 0],
            Self::OutOfZone => [255, 0, 0],
        }
    }

    /// Channel order used by OpenCV-style frame buffers.
    pub fn bgr(&self) -> [u8; 3] {
        let [r, g, b] = self.rgb();
        [b, g, r]
    }
}

/// What an outline is drawn around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutlineKind {
    /// The detection box of the current frame
    Detection,
    /// The frozen presence zone
    Zone,
}

/// A rectangle outline to draw on the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawInstruction {
    pub track_id: TrackId,
    pub kind: OutlineKind,
    pub shape: Rect,
    pub color: Color,
}

impl DrawInstruction {
    pub fn detection(track_id: TrackId, shape: Rect, color: Color) -> Self {
        Self {
            track_id,
            kind: OutlineKind::Detection,
            shape,
            color,
        }
    }

    pub fn zone(track_id: TrackId, shape: Rect, color: Color) -> Self {
        Self {
            track_id,
            kind: OutlineKind::Zone,
            shape,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_channels() {
        assert_eq!(Color::Neutral.rgb(), Color::InZone.rgb());
        assert_eq!(Color::InZone.bgr(), [0, 255, 0]);
        assert_eq!(Color::OutOfZone.rgb(), [255, 0, 0]);
        assert_eq!(Color::OutOfZone.bgr(), [0, 0, 255]);
    }
}
