//! pagecrop: crop the pages of PDF documents.
//!
//! This is the public API facade crate for pagecrop. It re-exports types from
//! pagecrop-core and uses pagecrop-parse for document access.
//!
//! # Architecture
//!
//! - **pagecrop-core**: Backend-independent data types and algorithms
//! - **pagecrop-parse**: Document backend trait and the lopdf implementation
//! - **pagecrop** (this crate): Cluster analysis and the document cropper
//!
//! # Example
//!
//! ```ignore
//! use pagecrop::{ClusterOptions, CropDefinition, CropPlan, CropRatio, analyze_clusters, crop_file};
//!
//! let mut clusters = analyze_clusters("in.pdf", &ClusterOptions::default())?;
//! clusters.assign_ratios_to_all(&[CropRatio::new(0.1, 0.1, 0.1, 0.1)]);
//! let plan = CropPlan::from_clusters(&clusters, page_count);
//! crop_file(&CropDefinition::new("in.pdf", "out.pdf", plan))?;
//! ```

// Log macros compile to nothing unless the `tracing` feature is on.
#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! info {
    ($($arg:tt)*) => {};
}

mod analysis;
mod cropper;
#[cfg(test)]
mod testing;

pub use analysis::{
    DocumentInfo, PageInfo, analyze_bytes, analyze_clusters, inspect_document, inspect_file,
    page_summaries,
};
pub use cropper::{CropDefinition, CropOptions, DocumentCropper, crop_file};

pub use pagecrop_core;
pub use pagecrop_core::{
    BBox, Bookmark, ClusterDefinition, ClusterOptions, CropError, CropPlan, CropRatio,
    DocumentMetadata, MAX_MERGE_PAGES, MERGE_VARIABILITY, PageBoxes, PageCluster, PageLayout,
    PageSummary, RatioResolver, RatioSet, RectangleResolver, Rotation,
};
pub use pagecrop_parse;
pub use pagecrop_parse::{CropBackend, LopdfBackend};
