//! The document cropper.
//!
//! Rewrites a source document in two phases. Phase 1 multiplies every page
//! once per crop rectangle. Phase 2 walks the [`PageLayout`] in source order,
//! resolves each rectangle against the copy it belongs to and overwrites that
//! copy's MediaBox and CropBox. Outline targets are shifted afterwards and
//! the info dictionary is carried over.
//!
//! Output goes to a temporary file next to the destination, which is only
//! renamed into place once the document has been written and synced.

use std::io::{BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use pagecrop_core::{CropError, CropPlan, PageLayout, RatioResolver, RectangleResolver};
use pagecrop_parse::{CropBackend, LopdfBackend};
use tempfile::NamedTempFile;
#[cfg(feature = "tracing")]
use tracing::{debug, info};

use crate::analysis::read_source;

/// Source, destination and plan of one crop run.
#[derive(Debug, Clone, PartialEq)]
pub struct CropDefinition {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub plan: CropPlan,
}

impl CropDefinition {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>, plan: CropPlan) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            plan,
        }
    }
}

/// Options for a crop run.
#[derive(Debug, Clone, Default)]
pub struct CropOptions {
    /// When set to `true` by another thread, the run stops before the next
    /// source page and returns [`CropError::Cancelled`] (default: None).
    pub cancel: Option<Arc<AtomicBool>>,
}

impl CropOptions {
    /// Options observing the given cancellation flag.
    pub fn with_cancel_flag(flag: Arc<AtomicBool>) -> Self {
        Self { cancel: Some(flag) }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Applies a [`CropPlan`] to documents read through backend `B`.
pub struct DocumentCropper<B: CropBackend, R: RectangleResolver = RatioResolver> {
    resolver: R,
    _backend: PhantomData<B>,
}

impl<B: CropBackend> DocumentCropper<B> {
    pub fn new() -> Self {
        Self::with_resolver(RatioResolver)
    }
}

impl<B: CropBackend> Default for DocumentCropper<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: CropBackend, R: RectangleResolver> DocumentCropper<B, R> {
    /// A cropper using a custom rectangle resolver.
    pub fn with_resolver(resolver: R) -> Self {
        Self {
            resolver,
            _backend: PhantomData,
        }
    }

    /// Crop `definition.source` into `definition.destination`.
    ///
    /// The destination is checked and a temporary sibling file is created
    /// before the source is read. On failure the temporary file is removed
    /// and an existing destination is left as it was.
    ///
    /// # Errors
    ///
    /// - [`CropError::InvalidDestination`] if the destination is a directory,
    ///   its parent directory does not exist, or it is read-only.
    /// - [`CropError::IoError`] if reading, writing or renaming fails.
    /// - [`CropError::ParseError`] if the source cannot be parsed.
    /// - [`CropError::PlanMismatch`] if the plan does not cover the source.
    /// - [`CropError::Cancelled`] if the cancel flag was raised.
    pub fn crop(
        &self,
        definition: &CropDefinition,
        options: &CropOptions,
    ) -> Result<PathBuf, CropError> {
        let mut output = prepare_destination(&definition.destination)?;

        let bytes = read_source(&definition.source)?;
        let mut doc = self.rewrite(&bytes, &definition.plan, options)?;

        {
            let mut writer = BufWriter::new(output.as_file_mut());
            B::save(&mut doc, &mut writer).map_err(Into::into)?;
            writer.flush()?;
        }
        output.as_file().sync_all()?;
        output.persist(&definition.destination).map_err(|e| {
            CropError::IoError(format!(
                "failed to write {}: {}",
                definition.destination.display(),
                e.error
            ))
        })?;

        info!(
            source = %definition.source.display(),
            destination = %definition.destination.display(),
            pages = B::page_count(&doc),
            "cropped document"
        );
        Ok(definition.destination.clone())
    }

    /// Apply `plan` to a document held in memory and return the rewritten
    /// document without saving it.
    pub fn rewrite(
        &self,
        source: &[u8],
        plan: &CropPlan,
        options: &CropOptions,
    ) -> Result<B::Document, CropError> {
        let source = B::open(source).map_err(Into::into)?;
        let page_count = B::page_count(&source);
        if plan.page_count() != page_count {
            return Err(CropError::PlanMismatch {
                plan_pages: plan.page_count(),
                document_pages: page_count,
            });
        }
        let metadata = B::document_metadata(&source).map_err(Into::into)?;
        let mut bookmarks = B::bookmarks(&source).map_err(Into::into)?;

        let layout = PageLayout::from_plan(plan);
        let mut doc = B::multiply_pages(&source, &layout.copies()).map_err(Into::into)?;
        drop(source);
        if B::page_count(&doc) != layout.output_page_count() {
            return Err(CropError::Other(format!(
                "page multiplication produced {} pages, expected {}",
                B::page_count(&doc),
                layout.output_page_count()
            )));
        }
        debug!(
            source_pages = page_count,
            output_pages = layout.output_page_count(),
            "multiplied pages"
        );

        for placement in layout.placements() {
            if options.is_cancelled() {
                info!(page = placement.source_page, "crop cancelled");
                return Err(CropError::Cancelled);
            }
            for (output_page, ratio) in placement.cropped_pages() {
                let index = output_page - 1;
                let boxes = B::page_boxes(&doc, index).map_err(Into::into)?;
                let bbox = self.resolver.resolve(&boxes, ratio)?;
                debug!(
                    source_page = placement.source_page,
                    output_page,
                    ?bbox,
                    "replaced page boxes"
                );
                B::set_page_boxes(&mut doc, index, bbox).map_err(Into::into)?;
            }
        }

        if !bookmarks.is_empty() {
            layout.shift_bookmarks(&mut bookmarks);
            B::set_bookmarks(&mut doc, &bookmarks).map_err(Into::into)?;
        }
        B::set_document_metadata(&mut doc, &metadata).map_err(Into::into)?;
        Ok(doc)
    }
}

/// Crop a PDF file with the default backend and options.
pub fn crop_file(definition: &CropDefinition) -> Result<PathBuf, CropError> {
    DocumentCropper::<LopdfBackend>::new().crop(definition, &CropOptions::default())
}

/// Check the destination and open a temporary file in its directory.
fn prepare_destination(destination: &Path) -> Result<NamedTempFile, CropError> {
    if destination.as_os_str().is_empty() {
        return Err(CropError::InvalidDestination("empty path".to_string()));
    }
    if destination.is_dir() {
        return Err(CropError::InvalidDestination(format!(
            "{} is a directory",
            destination.display()
        )));
    }

    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(CropError::InvalidDestination(format!(
            "directory {} does not exist",
            parent.display()
        )));
    }
    if let Ok(metadata) = std::fs::metadata(destination) {
        if metadata.permissions().readonly() {
            return Err(CropError::InvalidDestination(format!(
                "{} is read-only",
                destination.display()
            )));
        }
    }

    tempfile::Builder::new()
        .prefix(".pagecrop-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| {
            CropError::IoError(format!("cannot create output in {}: {e}", parent.display()))
        })
}
