use ndarray::Array2;

use crate::zone::error::ZoneError;

/// Axis-aligned bounding box in corner form.
///
/// Coordinates are pixels with `(x1, y1)` the top-left and `(x2, y2)` the
/// bottom-right corner. Conversions from and to TLWH (top-left x, top-left y,
/// width, height) are provided for detectors that report that layout.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
    /// Right edge
    pub x2: f32,
    /// Bottom edge
    pub y2: f32,
}

/// Fraction of width/height added on each side when a zone is frozen.
pub const DEFAULT_ZONE_MARGIN: f32 = 0.05;

impl Rect {
    /// Create a Rect from TLBR format (x1, y1, x2, y2).
    #[inline]
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a Rect from TLWH format (top-left x, top-left y, width, height).
    #[inline]
    pub fn from_tlwh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.x1, self.y1, self.width(), self.height()]
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Check that all coordinates are finite and the corners are not inverted.
    pub fn validate(&self) -> Result<(), ZoneError> {
        let finite = self.to_tlbr().iter().all(|v| v.is_finite());
        if finite && self.x1 <= self.x2 && self.y1 <= self.y2 {
            Ok(())
        } else {
            Err(ZoneError::InvalidGeometry {
                x1: self.x1,
                y1: self.y1,
                x2: self.x2,
                y2: self.y2,
            })
        }
    }

    /// Grow the box outward by `margin_ratio` of its width and height on every side.
    ///
    /// A zero-area box stays zero-area.
    pub fn expand(&self, margin_ratio: f32) -> Rect {
        let margin_x = self.width() * margin_ratio;
        let margin_y = self.height() * margin_ratio;
        Rect {
            x1: self.x1 - margin_x,
            y1: self.y1 - margin_y,
            x2: self.x2 + margin_x,
            y2: self.y2 + margin_y,
        }
    }

    /// True iff both corners of `self` lie inside the closed rectangle `zone`.
    ///
    /// This is corner containment, not intersection: a box that only partly
    /// overlaps the zone is outside.
    pub fn is_inside(&self, zone: &Rect) -> bool {
        let corner_in =
            |x: f32, y: f32| zone.x1 <= x && x <= zone.x2 && zone.y1 <= y && y <= zone.y2;
        corner_in(self.x1, self.y1) && corner_in(self.x2, self.y2)
    }
}

/// Expand `rect` by `margin_ratio` of its size on every side.
#[inline]
pub fn expand(rect: &Rect, margin_ratio: f32) -> Rect {
    rect.expand(margin_ratio)
}

/// True iff `rect` lies entirely within `zone`, bounds inclusive.
#[inline]
pub fn contains(rect: &Rect, zone: &Rect) -> bool {
    rect.is_inside(zone)
}

/// Calculate the containment matrix between boxes and zones.
///
/// Returns a matrix of shape (M, N) where M is the length of `boxes`
/// and N is the length of `zones`; entry `[i, j]` is `contains(boxes[i], zones[j])`.
pub fn containment_matrix(boxes: &[Rect], zones: &[Rect]) -> Array2<bool> {
    let mut inside = Array2::from_elem((boxes.len(), zones.len()), false);
    for (i, b) in boxes.iter().enumerate() {
        for (j, z) in zones.iter().enumerate() {
            inside[[i, j]] = contains(b, z);
        }
    }
    inside
}
