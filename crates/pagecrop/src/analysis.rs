//! Page geometry inspection and cluster analysis.

use std::path::Path;

use pagecrop_core::{
    BBox, Bookmark, ClusterDefinition, ClusterOptions, CropError, DocumentMetadata, PageSummary,
    Rotation, visual_size,
};
use pagecrop_parse::{CropBackend, LopdfBackend};
#[cfg(feature = "tracing")]
use tracing::debug;

/// Geometry of one page as stored in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct PageInfo {
    /// 1-based page number.
    pub page_number: usize,
    pub media_box: BBox,
    pub crop_box: Option<BBox>,
    pub rotation: Rotation,
    /// On-screen width of the visible area.
    pub width: f64,
    /// On-screen height of the visible area.
    pub height: f64,
}

impl PageInfo {
    pub fn summary(&self) -> PageSummary {
        PageSummary {
            page_number: self.page_number,
            width: self.width,
            height: self.height,
        }
    }
}

/// Everything the cropper reads from a source document before rewriting it.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInfo {
    pub pages: Vec<PageInfo>,
    pub metadata: DocumentMetadata,
    pub bookmarks: Vec<Bookmark>,
}

impl DocumentInfo {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page_summaries(&self) -> Vec<PageSummary> {
        self.pages.iter().map(PageInfo::summary).collect()
    }
}

pub(crate) fn read_source(path: &Path) -> Result<Vec<u8>, CropError> {
    std::fs::read(path)
        .map_err(|e| CropError::IoError(format!("failed to read {}: {e}", path.display())))
}

/// Visual size of every page of an open document, in page order.
pub fn page_summaries<B: CropBackend>(doc: &B::Document) -> Result<Vec<PageSummary>, CropError> {
    (0..B::page_count(doc))
        .map(|index| B::page_summary(doc, index).map_err(Into::into))
        .collect()
}

/// Cluster the pages of a document held in memory.
///
/// # Errors
///
/// Returns [`CropError`] if the bytes cannot be parsed or a page has no
/// readable MediaBox.
pub fn analyze_bytes<B: CropBackend>(
    bytes: &[u8],
    options: &ClusterOptions,
) -> Result<ClusterDefinition, CropError> {
    let doc = B::open(bytes).map_err(Into::into)?;
    let summaries = page_summaries::<B>(&doc)?;
    let clusters = ClusterDefinition::from_pages(&summaries, options);
    debug!(
        pages = summaries.len(),
        clusters = clusters.len(),
        split_odd_even = options.split_odd_even,
        "clustered pages"
    );
    Ok(clusters)
}

/// Cluster the pages of a PDF file.
///
/// # Errors
///
/// Returns [`CropError::IoError`] if the file cannot be read, or any error
/// from [`analyze_bytes`].
pub fn analyze_clusters(
    path: impl AsRef<Path>,
    options: &ClusterOptions,
) -> Result<ClusterDefinition, CropError> {
    let bytes = read_source(path.as_ref())?;
    analyze_bytes::<LopdfBackend>(&bytes, options)
}

/// Read page boxes, metadata and outline from a document held in memory.
pub fn inspect_document<B: CropBackend>(bytes: &[u8]) -> Result<DocumentInfo, CropError> {
    let doc = B::open(bytes).map_err(Into::into)?;
    let pages = (0..B::page_count(&doc))
        .map(|index| {
            let boxes = B::page_boxes(&doc, index).map_err(Into::into)?;
            let visible = boxes.crop_box.unwrap_or(boxes.media_box);
            let (width, height) = visual_size(&visible, boxes.rotation);
            Ok(PageInfo {
                page_number: index + 1,
                media_box: boxes.media_box,
                crop_box: boxes.crop_box,
                rotation: boxes.rotation,
                width,
                height,
            })
        })
        .collect::<Result<Vec<_>, CropError>>()?;

    Ok(DocumentInfo {
        pages,
        metadata: B::document_metadata(&doc).map_err(Into::into)?,
        bookmarks: B::bookmarks(&doc).map_err(Into::into)?,
    })
}

/// Read page boxes, metadata and outline from a PDF file.
pub fn inspect_file(path: impl AsRef<Path>) -> Result<DocumentInfo, CropError> {
    let bytes = read_source(path.as_ref())?;
    inspect_document::<LopdfBackend>(&bytes)
}
