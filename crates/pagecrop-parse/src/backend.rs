//! Document backend trait.
//!
//! Defines the [`CropBackend`] trait that abstracts the document operations
//! the cropper needs. The lopdf implementation lives in
//! [`lopdf_backend`](crate::lopdf_backend); tests can plug in an in-memory
//! document instead.

use std::io::Write;

use pagecrop_core::{
    BBox, Bookmark, CropError, DocumentMetadata, PageBoxes, PageSummary, Rotation, visual_size,
};

/// Trait abstracting document reading and page-box rewriting.
///
/// Pages are addressed by 0-based index.
///
/// # Usage
///
/// ```ignore
/// let doc = MyBackend::open(pdf_bytes)?;
/// let copies = vec![1, 2, 1];
/// let mut multiplied = MyBackend::multiply_pages(&doc, &copies)?;
/// MyBackend::set_page_boxes(&mut multiplied, 1, bbox)?;
/// MyBackend::save(&mut multiplied, &mut file)?;
/// ```
pub trait CropBackend {
    /// The parsed document type.
    type Document;

    /// Backend-specific error type, convertible to [`CropError`].
    type Error: std::error::Error + Into<CropError>;

    /// Parse document bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a readable document.
    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error>;

    /// Return the number of pages in the document.
    fn page_count(doc: &Self::Document) -> usize;

    /// Get the MediaBox of a page, following inheritance.
    fn page_media_box(doc: &Self::Document, index: usize) -> Result<BBox, Self::Error>;

    /// Get the CropBox of a page, if one is set.
    fn page_crop_box(doc: &Self::Document, index: usize) -> Result<Option<BBox>, Self::Error>;

    /// Get the page rotation. Defaults to [`Rotation::Deg0`].
    fn page_rotation(doc: &Self::Document, index: usize) -> Result<Rotation, Self::Error>;

    /// Read the document information dictionary.
    fn document_metadata(doc: &Self::Document) -> Result<DocumentMetadata, Self::Error>;

    /// Read the outline in traversal order.
    fn bookmarks(doc: &Self::Document) -> Result<Vec<Bookmark>, Self::Error>;

    /// Build a new document in which page `i` appears `copies[i]` times in a
    /// row.
    ///
    /// Every duplicate owns an independent copy of the page content. Boxes
    /// are not modified. Missing or zero entries count as one copy.
    fn multiply_pages(doc: &Self::Document, copies: &[usize])
    -> Result<Self::Document, Self::Error>;

    /// Overwrite both MediaBox and CropBox of a page.
    fn set_page_boxes(doc: &mut Self::Document, index: usize, bbox: BBox)
    -> Result<(), Self::Error>;

    /// Point the outline entries at new pages.
    ///
    /// `bookmarks` must be in the order returned by [`CropBackend::bookmarks`].
    fn set_bookmarks(doc: &mut Self::Document, bookmarks: &[Bookmark]) -> Result<(), Self::Error>;

    /// Write the document information dictionary.
    fn set_document_metadata(
        doc: &mut Self::Document,
        metadata: &DocumentMetadata,
    ) -> Result<(), Self::Error>;

    /// Serialize the document.
    fn save(doc: &mut Self::Document, writer: &mut dyn Write) -> Result<(), Self::Error>;

    /// MediaBox, CropBox and rotation of a page in one call.
    fn page_boxes(doc: &Self::Document, index: usize) -> Result<PageBoxes, Self::Error> {
        Ok(PageBoxes::new(
            Self::page_media_box(doc, index)?,
            Self::page_crop_box(doc, index)?,
            Self::page_rotation(doc, index)?,
        ))
    }

    /// Visual size of a page (CropBox, else MediaBox, after rotation).
    fn page_summary(doc: &Self::Document, index: usize) -> Result<PageSummary, Self::Error> {
        let boxes = Self::page_boxes(doc, index)?;
        let visible = boxes.crop_box.unwrap_or(boxes.media_box);
        let (width, height) = visual_size(&visible, boxes.rotation);
        Ok(PageSummary {
            page_number: index + 1,
            width,
            height,
        })
    }
}
