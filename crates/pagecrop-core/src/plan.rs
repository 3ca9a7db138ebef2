//! Crop plans: the per-page input to the document rewriter.

use crate::cluster::ClusterDefinition;
use crate::error::CropError;
use crate::ratio::CropRatio;

/// Mapping from every 1-based page number to its ordered crop ratios.
///
/// Pages are contiguous from 1 to [`page_count`](CropPlan::page_count). An
/// empty list means the page is copied unmodified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CropPlan {
    pages: Vec<Vec<CropRatio>>,
}

impl CropPlan {
    /// A plan covering `page_count` pages, none of them cropped.
    pub fn new(page_count: usize) -> Self {
        Self {
            pages: vec![Vec::new(); page_count],
        }
    }

    /// Flatten cluster ratio assignments into a plan.
    ///
    /// Every page of a cluster that is not excluded receives the cluster's
    /// ratios. Pages of excluded clusters, and pages no cluster covers, keep
    /// an empty list. Cluster pages beyond `page_count` are ignored.
    pub fn from_clusters(clusters: &ClusterDefinition, page_count: usize) -> Self {
        let mut plan = CropPlan::new(page_count);
        for cluster in clusters.clusters().iter().filter(|c| !c.is_excluded()) {
            for &page in cluster.all_pages() {
                if (1..=page_count).contains(&page) {
                    plan.pages[page - 1] = cluster.ratios().as_slice().to_vec();
                }
            }
        }
        plan
    }

    /// Number of source pages covered.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Replace the ratios of a 1-based page.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::PageOutOfRange`] if `page` is 0 or beyond the plan.
    pub fn set_ratios(&mut self, page: usize, ratios: Vec<CropRatio>) -> Result<(), CropError> {
        let page_count = self.page_count();
        let slot = page
            .checked_sub(1)
            .and_then(|index| self.pages.get_mut(index))
            .ok_or(CropError::PageOutOfRange { page, page_count })?;
        *slot = ratios;
        Ok(())
    }

    /// Ratios for a 1-based page. Pages outside the plan have none.
    pub fn ratios_for_page(&self, page: usize) -> &[CropRatio] {
        page.checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of pages the rewritten document will have.
    pub fn output_page_count(&self) -> usize {
        self.pages.iter().map(|r| r.len().max(1)).sum()
    }

    /// Iterate `(page_number, ratios)` in page order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[CropRatio])> + '_ {
        self.pages
            .iter()
            .enumerate()
            .map(|(index, ratios)| (index + 1, ratios.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{ClusterOptions, PageSummary};

    fn ratio(v: f64) -> CropRatio {
        CropRatio::new(v, v, v, v)
    }

    #[test]
    fn new_plan_copies_every_page() {
        let plan = CropPlan::new(3);
        assert_eq!(plan.page_count(), 3);
        assert!(plan.iter().all(|(_, r)| r.is_empty()));
        assert_eq!(plan.output_page_count(), 3);
    }

    #[test]
    fn set_ratios_rejects_page_zero_and_overflow() {
        let mut plan = CropPlan::new(2);
        assert_eq!(
            plan.set_ratios(0, vec![ratio(0.1)]),
            Err(CropError::PageOutOfRange {
                page: 0,
                page_count: 2
            })
        );
        assert!(plan.set_ratios(3, vec![ratio(0.1)]).is_err());
        assert!(plan.set_ratios(2, vec![ratio(0.1)]).is_ok());
        assert_eq!(plan.ratios_for_page(2), &[ratio(0.1)]);
    }

    #[test]
    fn output_page_count_counts_empty_pages_once() {
        let mut plan = CropPlan::new(3);
        plan.set_ratios(1, vec![ratio(0.1)]).unwrap();
        plan.set_ratios(3, vec![ratio(0.0), ratio(0.2)]).unwrap();
        assert_eq!(plan.output_page_count(), 4);
    }

    #[test]
    fn ratios_for_unknown_page_is_empty() {
        let plan = CropPlan::new(1);
        assert!(plan.ratios_for_page(0).is_empty());
        assert!(plan.ratios_for_page(5).is_empty());
    }

    #[test]
    fn from_clusters_flattens_non_excluded_clusters() {
        let pages: Vec<PageSummary> = [(600.0, 800.0), (800.0, 600.0), (600.0, 800.0)]
            .iter()
            .enumerate()
            .map(|(i, &(width, height))| PageSummary {
                page_number: i + 1,
                width,
                height,
            })
            .collect();
        let mut clusters = ClusterDefinition::from_pages(&pages, &ClusterOptions::default());
        clusters.clusters_mut()[0].set_ratios([ratio(0.1), ratio(0.2)]);
        clusters.clusters_mut()[1].set_ratios([ratio(0.3)]);

        let plan = CropPlan::from_clusters(&clusters, 3);
        assert_eq!(plan.ratios_for_page(1), &[ratio(0.1), ratio(0.2)]);
        assert_eq!(plan.ratios_for_page(2), &[ratio(0.3)]);
        assert_eq!(plan.ratios_for_page(3), &[ratio(0.1), ratio(0.2)]);
        assert_eq!(plan.output_page_count(), 5);
    }

    #[test]
    fn from_clusters_leaves_excluded_pages_empty() {
        let pages: Vec<PageSummary> = (1..=2)
            .map(|page_number| PageSummary {
                page_number,
                width: 600.0,
                height: 800.0,
            })
            .collect();
        let options = ClusterOptions {
            excluded_pages: vec![1],
            ..ClusterOptions::default()
        };
        let mut clusters = ClusterDefinition::from_pages(&pages, &options);
        for cluster in clusters.clusters_mut() {
            cluster.set_ratios([ratio(0.1)]);
        }
        let plan = CropPlan::from_clusters(&clusters, 2);
        assert!(plan.ratios_for_page(1).is_empty());
        assert_eq!(plan.ratios_for_page(2), &[ratio(0.1)]);
    }
}
