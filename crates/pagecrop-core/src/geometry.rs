//! Page geometry in native PDF coordinates.
//!
//! Provides [`BBox`] for page boxes (MediaBox, CropBox) with a bottom-left
//! origin, and [`Rotation`] for the page `/Rotate` attribute.

/// Axis-aligned box in native PDF space (origin bottom-left).
///
/// Field order follows the PDF box array `[left bottom right top]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl BBox {
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Build a box from a PDF box array, normalizing swapped corners.
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
    }

    /// Width of the box.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the box.
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Returns `true` if every coordinate is a finite number.
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.bottom.is_finite()
            && self.right.is_finite()
            && self.top.is_finite()
    }

    /// Intersection of two boxes, or `None` if they do not overlap.
    ///
    /// Boxes that only touch along an edge produce a zero-area intersection.
    pub fn intersect(&self, other: &BBox) -> Option<BBox> {
        let left = self.left.max(other.left);
        let bottom = self.bottom.max(other.bottom);
        let right = self.right.min(other.right);
        let top = self.top.min(other.top);
        if left > right || bottom > top {
            return None;
        }
        Some(BBox::new(left, bottom, right, top))
    }

    /// Clamp every edge of this box into `bounds`.
    ///
    /// Unlike [`BBox::intersect`] this always yields a box; a box lying fully
    /// outside `bounds` collapses onto its nearest edge.
    pub fn clamp_to(&self, bounds: &BBox) -> BBox {
        let clamp_x = |v: f64| v.clamp(bounds.left, bounds.right);
        let clamp_y = |v: f64| v.clamp(bounds.bottom, bounds.top);
        BBox::from_corners(
            clamp_x(self.left),
            clamp_y(self.bottom),
            clamp_x(self.right),
            clamp_y(self.top),
        )
    }

    /// The box as a PDF array `[left, bottom, right, top]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.left, self.bottom, self.right, self.top]
    }
}

/// Page rotation as stored in the `/Rotate` entry (clockwise, in degrees).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Normalize a raw `/Rotate` value.
    ///
    /// Negative values wrap around (`-90` is `270`). Values that are not a
    /// multiple of 90 are invalid in PDF and fall back to [`Rotation::Deg0`].
    pub fn from_degrees(degrees: i64) -> Self {
        match degrees.rem_euclid(360) {
            90 => Rotation::Deg90,
            180 => Rotation::Deg180,
            270 => Rotation::Deg270,
            _ => Rotation::Deg0,
        }
    }

    pub fn degrees(self) -> i64 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Whether the on-screen width corresponds to the native height.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// On-screen `(width, height)` of a box once `rotation` is applied.
pub fn visual_size(bbox: &BBox, rotation: Rotation) -> (f64, f64) {
    if rotation.swaps_axes() {
        (bbox.height(), bbox.width())
    } else {
        (bbox.width(), bbox.height())
    }
}
