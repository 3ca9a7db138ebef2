//! Rectangle resolution: crop ratio + page boxes + rotation → absolute box.
//!
//! Ratios are measured on the page as displayed, after the clockwise
//! `/Rotate` is applied. The resolved box lives in the page's native
//! (stored, unrotated) coordinate space, so each visual inset has to be
//! mapped onto the native edge it ends up on:
//!
//! | Rotation | native left | native bottom | native right | native top |
//! |----------|-------------|---------------|--------------|------------|
//! | 0°       | left        | bottom        | right        | top        |
//! | 90°      | top         | left          | bottom       | right      |
//! | 180°     | right       | top           | left         | bottom     |
//! | 270°     | bottom      | right         | top          | left       |

use crate::error::CropError;
use crate::geometry::{BBox, Rotation};
use crate::ratio::CropRatio;

/// The reference boxes of one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBoxes {
    pub media_box: BBox,
    /// Explicit CropBox, if the page has one.
    pub crop_box: Option<BBox>,
    pub rotation: Rotation,
}

impl PageBoxes {
    pub fn new(media_box: BBox, crop_box: Option<BBox>, rotation: Rotation) -> Self {
        Self {
            media_box,
            crop_box,
            rotation,
        }
    }

    /// The box the ratios are applied to.
    ///
    /// This is the smaller of MediaBox and CropBox, limited to the MediaBox.
    /// A CropBox that does not overlap the MediaBox is ignored.
    pub fn reference_box(&self) -> BBox {
        let media = self.media_box;
        match self.crop_box.and_then(|crop| crop.intersect(&media)) {
            Some(crop) if crop.area() < media.area() => crop,
            _ => media,
        }
    }
}

/// Converts a ratio into an absolute box for a given page.
///
/// Implementations must be pure and must keep the result inside the
/// page's MediaBox.
pub trait RectangleResolver {
    /// Resolve `ratio` against the page described by `boxes`.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::InvalidRatio`] for ratios that cannot describe a
    /// rectangle (NaN, infinite, or inverted).
    fn resolve(&self, boxes: &PageBoxes, ratio: &CropRatio) -> Result<BBox, CropError>;
}

/// Default resolver implementing the rotation table in the module docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatioResolver;

impl RectangleResolver for RatioResolver {
    fn resolve(&self, boxes: &PageBoxes, ratio: &CropRatio) -> Result<BBox, CropError> {
        let ratio = ratio.validate()?;
        let native = native_insets(&ratio, boxes.rotation);
        let base = boxes.reference_box();
        let width = base.width();
        let height = base.height();

        let resolved = BBox::new(
            base.left + width * native.left,
            base.bottom + height * native.bottom,
            base.right - width * native.right,
            base.top - height * native.top,
        );
        Ok(resolved.clamp_to(&boxes.media_box))
    }
}

/// Re-express visual insets as insets from the native box edges.
pub fn native_insets(ratio: &CropRatio, rotation: Rotation) -> CropRatio {
    let CropRatio {
        left,
        bottom,
        right,
        top,
    } = *ratio;
    match rotation {
        Rotation::Deg0 => CropRatio::new(left, bottom, right, top),
        Rotation::Deg90 => CropRatio::new(top, left, bottom, right),
        Rotation::Deg180 => CropRatio::new(right, top, left, bottom),
        Rotation::Deg270 => CropRatio::new(bottom, right, top, left),
    }
}
