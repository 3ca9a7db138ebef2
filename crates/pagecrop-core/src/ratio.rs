//! Crop ratio tuples.
//!
//! A [`CropRatio`] describes a crop rectangle as four insets measured from
//! the edges of the page as it appears on screen, each a fraction of the
//! visual page width or height. [`RatioSet`] holds the ratios assigned to a
//! cluster.

use crate::error::CropError;

/// Four fractional insets `(left, bottom, right, top)`, origin bottom-left.
///
/// `left` is the distance from the left page edge to the left edge of the
/// crop rectangle, `bottom` from the lower page edge, `right` from the right
/// page edge and `top` from the upper page edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[f64; 4]", into = "[f64; 4]"))]
pub struct CropRatio {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl CropRatio {
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Ratio that keeps the whole page.
    pub fn full_page() -> Self {
        Self::default()
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.left, self.bottom, self.right, self.top]
    }

    /// Check the ratio and clamp loose values into range.
    ///
    /// Each inset is clamped to `[0, 1]`. NaN or infinite values, and
    /// opposing insets that still sum above 1 after clamping, cannot describe
    /// a rectangle and are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::InvalidRatio`] for non-finite or inverted ratios.
    pub fn validate(&self) -> Result<CropRatio, CropError> {
        if self.to_array().iter().any(|v| !v.is_finite()) {
            return Err(CropError::InvalidRatio(format!(
                "non-finite inset in {:?}",
                self.to_array()
            )));
        }
        let clamped = CropRatio::new(
            self.left.clamp(0.0, 1.0),
            self.bottom.clamp(0.0, 1.0),
            self.right.clamp(0.0, 1.0),
            self.top.clamp(0.0, 1.0),
        );
        if clamped.left + clamped.right > 1.0 {
            return Err(CropError::InvalidRatio(format!(
                "left and right insets overlap ({} + {} > 1)",
                clamped.left, clamped.right
            )));
        }
        if clamped.bottom + clamped.top > 1.0 {
            return Err(CropError::InvalidRatio(format!(
                "bottom and top insets overlap ({} + {} > 1)",
                clamped.bottom, clamped.top
            )));
        }
        Ok(clamped)
    }
}

impl From<[f64; 4]> for CropRatio {
    fn from(values: [f64; 4]) -> Self {
        CropRatio::new(values[0], values[1], values[2], values[3])
    }
}

impl From<CropRatio> for [f64; 4] {
    fn from(ratio: CropRatio) -> Self {
        ratio.to_array()
    }
}

/// Ordered collection of distinct crop ratios.
///
/// Adding a ratio that is already present (by value) is a no-op. Iteration
/// yields ratios in insertion order, which is the order pages are
/// multiplied in; equality ignores that order.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<CropRatio>", into = "Vec<CropRatio>")
)]
pub struct RatioSet {
    ratios: Vec<CropRatio>,
}

impl RatioSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ratio unless an equal one is already stored.
    ///
    /// Returns `true` if the ratio was inserted.
    pub fn add(&mut self, ratio: CropRatio) -> bool {
        if self.ratios.contains(&ratio) {
            return false;
        }
        self.ratios.push(ratio);
        true
    }

    /// Replace the contents by clearing and adding each ratio in turn.
    pub fn set_all(&mut self, ratios: impl IntoIterator<Item = CropRatio>) {
        self.clear();
        for ratio in ratios {
            self.add(ratio);
        }
    }

    pub fn clear(&mut self) {
        self.ratios.clear();
    }

    pub fn contains(&self, ratio: &CropRatio) -> bool {
        self.ratios.contains(ratio)
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CropRatio> {
        self.ratios.iter()
    }

    pub fn as_slice(&self) -> &[CropRatio] {
        &self.ratios
    }
}

impl PartialEq for RatioSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.ratios.iter().all(|r| other.contains(r))
    }
}

impl FromIterator<CropRatio> for RatioSet {
    fn from_iter<I: IntoIterator<Item = CropRatio>>(iter: I) -> Self {
        let mut set = RatioSet::new();
        set.set_all(iter);
        set
    }
}

impl From<Vec<CropRatio>> for RatioSet {
    fn from(ratios: Vec<CropRatio>) -> Self {
        ratios.into_iter().collect()
    }
}

impl From<RatioSet> for Vec<CropRatio> {
    fn from(set: RatioSet) -> Self {
        set.ratios
    }
}

impl<'a> IntoIterator for &'a RatioSet {
    type Item = &'a CropRatio;
    type IntoIter = std::slice::Iter<'a, CropRatio>;

    fn into_iter(self) -> Self::IntoIter {
        self.ratios.iter()
    }
}
