//! pagecrop-core: Backend-independent data types and algorithms.
//!
//! This crate provides the page geometry types, page clustering, crop plans,
//! rectangle resolution and the output page layout used by pagecrop. It does
//! no I/O; reading and writing documents is left to `pagecrop-parse`.

pub mod bookmark;
pub mod cluster;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod metadata;
pub mod plan;
pub mod ratio;
pub mod resolver;

pub use bookmark::Bookmark;
pub use cluster::{
    ClusterDefinition, ClusterOptions, MAX_MERGE_PAGES, MERGE_VARIABILITY, PageCluster,
    PageSummary,
};
pub use error::CropError;
pub use geometry::{BBox, Rotation, visual_size};
pub use layout::{LayoutCursor, PageLayout, ShiftWindow, SourcePlacement};
pub use metadata::DocumentMetadata;
pub use plan::CropPlan;
pub use ratio::{CropRatio, RatioSet};
pub use resolver::{PageBoxes, RatioResolver, RectangleResolver, native_insets};
