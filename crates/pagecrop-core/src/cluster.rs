//! Page clusters: groups of pages that share one set of crop rectangles.
//!
//! Pages whose visual size falls into the same [`MERGE_VARIABILITY`] band
//! (and, optionally, share even/odd parity) are grouped into a
//! [`PageCluster`]. A bounded subset of each cluster's pages is chosen for
//! preview rendering. [`ClusterDefinition`] builds the cluster list for a
//! whole document.

use crate::ratio::{CropRatio, RatioSet};

#[cfg(feature = "serde")]
use crate::error::CropError;

/// Width of the rounding band used when comparing page sizes.
pub const MERGE_VARIABILITY: i64 = 20;

/// Upper bound on the number of pages chosen for a cluster preview.
pub const MAX_MERGE_PAGES: usize = 15;

/// A set of pages considered geometrically equivalent.
///
/// Lists are stale until recomputed: [`PageCluster::merge`] does not refresh
/// [`pages_to_merge`](PageCluster::pages_to_merge); call
/// [`PageCluster::choose_pages_to_merge`] afterwards.
///
/// A deserialized cluster must list at least one page, each page once. Its
/// preview subset is recomputed from the page list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPageCluster"))]
pub struct PageCluster {
    is_even_page: bool,
    page_width: i64,
    page_height: i64,
    excluded: bool,
    all_pages: Vec<usize>,
    pages_to_merge: Vec<usize>,
    ratios: RatioSet,
}

impl PageCluster {
    /// Create a cluster seeded with a single 1-based page number.
    pub fn new(
        is_even_page: bool,
        page_width: i64,
        page_height: i64,
        excluded: bool,
        page_number: usize,
    ) -> Self {
        Self {
            is_even_page,
            page_width,
            page_height,
            excluded,
            all_pages: vec![page_number],
            pages_to_merge: Vec::new(),
            ratios: RatioSet::new(),
        }
    }

    pub fn is_even_page(&self) -> bool {
        self.is_even_page
    }

    pub fn page_width(&self) -> i64 {
        self.page_width
    }

    pub fn page_height(&self) -> i64 {
        self.page_height
    }

    pub fn is_excluded(&self) -> bool {
        self.excluded
    }

    /// Width rounded down to the nearest multiple of [`MERGE_VARIABILITY`].
    pub fn rounded_page_width(&self) -> i64 {
        round_to_band(self.page_width)
    }

    /// Height rounded down to the nearest multiple of [`MERGE_VARIABILITY`].
    pub fn rounded_page_height(&self) -> i64 {
        round_to_band(self.page_height)
    }

    /// Every page in the cluster, in the order pages were added.
    pub fn all_pages(&self) -> &[usize] {
        &self.all_pages
    }

    /// Preview subset chosen by the last [`choose_pages_to_merge`](Self::choose_pages_to_merge).
    pub fn pages_to_merge(&self) -> &[usize] {
        &self.pages_to_merge
    }

    /// Smallest page number in the cluster.
    pub fn first_page(&self) -> usize {
        self.all_pages.iter().copied().min().unwrap_or(usize::MAX)
    }

    /// Whether two clusters may be merged.
    ///
    /// Excluded clusters never match. With `consider_parity`, even and odd
    /// pages never match. Otherwise the rounded widths and heights decide.
    pub fn is_nearly_equal(&self, other: &PageCluster, consider_parity: bool) -> bool {
        if self.excluded || other.excluded {
            return false;
        }
        if consider_parity && self.is_even_page != other.is_even_page {
            return false;
        }
        self.rounded_page_width() == other.rounded_page_width()
            && self.rounded_page_height() == other.rounded_page_height()
    }

    /// Absorb the pages of `other`.
    ///
    /// Pages are appended without deduplication, so a cluster must not be
    /// merged twice. Dimensions, ratios and the preview subset are left
    /// as they are.
    pub fn merge(&mut self, other: &PageCluster) {
        self.all_pages.extend_from_slice(&other.all_pages);
    }

    /// Recompute the preview subset from [`all_pages`](Self::all_pages).
    ///
    /// Fewer than [`MAX_MERGE_PAGES`] pages are all used. Otherwise exactly
    /// [`MAX_MERGE_PAGES`] pages are sampled at an even stride. The result is
    /// in ascending page order and depends only on the page list.
    pub fn choose_pages_to_merge(&mut self) {
        let mut pages = self.all_pages.clone();
        pages.sort_unstable();

        if pages.len() < MAX_MERGE_PAGES {
            self.pages_to_merge = pages;
            return;
        }

        let step = pages.len() as f64 / MAX_MERGE_PAGES as f64;
        let mut position = 0.0_f64;
        let mut chosen = Vec::with_capacity(MAX_MERGE_PAGES);
        for _ in 0..MAX_MERGE_PAGES {
            let index = (position.floor() as usize).min(pages.len() - 1);
            chosen.push(pages[index]);
            position += step;
        }
        self.pages_to_merge = chosen;
    }

    /// Crop ratios assigned to this cluster.
    pub fn ratios(&self) -> &RatioSet {
        &self.ratios
    }

    pub fn clear_ratios(&mut self) {
        self.ratios.clear();
    }

    /// Add a ratio unless an equal one is already assigned.
    pub fn add_ratios(&mut self, ratio: CropRatio) {
        self.ratios.add(ratio);
    }

    /// Replace every assigned ratio.
    pub fn set_ratios(&mut self, ratios: impl IntoIterator<Item = CropRatio>) {
        self.ratios.set_all(ratios);
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPageCluster {
    is_even_page: bool,
    page_width: i64,
    page_height: i64,
    #[serde(default)]
    excluded: bool,
    all_pages: Vec<usize>,
    #[serde(default)]
    ratios: RatioSet,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPageCluster> for PageCluster {
    type Error = CropError;

    fn try_from(raw: RawPageCluster) -> Result<Self, Self::Error> {
        if raw.all_pages.is_empty() {
            return Err(CropError::ParseError("cluster has no pages".to_string()));
        }
        if raw.all_pages.contains(&0) {
            return Err(CropError::ParseError(
                "cluster page numbers start at 1".to_string(),
            ));
        }
        let mut sorted = raw.all_pages.clone();
        sorted.sort_unstable();
        if let Some(pair) = sorted.windows(2).find(|w| w[0] == w[1]) {
            return Err(CropError::ParseError(format!(
                "page {} listed twice in one cluster",
                pair[0]
            )));
        }

        let mut cluster = PageCluster {
            is_even_page: raw.is_even_page,
            page_width: raw.page_width,
            page_height: raw.page_height,
            excluded: raw.excluded,
            all_pages: raw.all_pages,
            pages_to_merge: Vec::new(),
            ratios: raw.ratios,
        };
        cluster.choose_pages_to_merge();
        Ok(cluster)
    }
}

fn round_to_band(value: i64) -> i64 {
    value.div_euclid(MERGE_VARIABILITY) * MERGE_VARIABILITY
}

/// Visual size of one page, the input to clustering.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSummary {
    /// 1-based page number.
    pub page_number: usize,
    /// On-screen width in points.
    pub width: f64,
    /// On-screen height in points.
    pub height: f64,
}

/// Options controlling how pages are grouped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterOptions {
    /// Keep even and odd pages in separate clusters (default: false).
    pub split_odd_even: bool,
    /// 1-based page numbers that must not be cropped. Each one ends up in a
    /// cluster of its own (default: empty).
    pub excluded_pages: Vec<usize>,
}

/// All clusters of a document, ordered by their first page.
///
/// No page belongs to two clusters.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawClusterDefinition"))]
pub struct ClusterDefinition {
    clusters: Vec<PageCluster>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawClusterDefinition {
    clusters: Vec<PageCluster>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawClusterDefinition> for ClusterDefinition {
    type Error = CropError;

    fn try_from(raw: RawClusterDefinition) -> Result<Self, Self::Error> {
        let mut seen = std::collections::BTreeSet::new();
        for page in raw.clusters.iter().flat_map(|c| c.all_pages()) {
            if !seen.insert(*page) {
                return Err(CropError::ParseError(format!(
                    "page {page} belongs to more than one cluster"
                )));
            }
        }
        let mut clusters = raw.clusters;
        clusters.sort_by_key(PageCluster::first_page);
        Ok(Self { clusters })
    }
}

impl ClusterDefinition {
    /// Group pages into clusters.
    ///
    /// Each page seeds a cluster and is merged into the first existing
    /// cluster that accepts it. Preview subsets are chosen once all pages
    /// are placed.
    pub fn from_pages(pages: &[PageSummary], options: &ClusterOptions) -> Self {
        let mut clusters: Vec<PageCluster> = Vec::new();

        for page in pages {
            let candidate = PageCluster::new(
                page.page_number % 2 == 0,
                page.width as i64,
                page.height as i64,
                options.excluded_pages.contains(&page.page_number),
                page.page_number,
            );
            match clusters
                .iter_mut()
                .find(|c| c.is_nearly_equal(&candidate, options.split_odd_even))
            {
                Some(existing) => existing.merge(&candidate),
                None => clusters.push(candidate),
            }
        }

        for cluster in &mut clusters {
            cluster.choose_pages_to_merge();
        }
        clusters.sort_by_key(PageCluster::first_page);

        Self { clusters }
    }

    pub fn clusters(&self) -> &[PageCluster] {
        &self.clusters
    }

    pub fn clusters_mut(&mut self) -> &mut [PageCluster] {
        &mut self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// The cluster containing a 1-based page number.
    pub fn cluster_for_page(&self, page_number: usize) -> Option<&PageCluster> {
        self.clusters
            .iter()
            .find(|c| c.all_pages().contains(&page_number))
    }

    /// Assign the same ratios to every cluster that is not excluded.
    pub fn assign_ratios_to_all(&mut self, ratios: &[CropRatio]) {
        for cluster in self.clusters.iter_mut().filter(|c| !c.is_excluded()) {
            cluster.set_ratios(ratios.iter().copied());
        }
    }
}
