//! Error types for the backend layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps backend-specific errors and converts them to [`CropError`].

use pagecrop_core::CropError;
use thiserror::Error;

/// Error type for document backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from PDF parsing (structure, syntax, object resolution).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading or writing PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A page index outside the document was requested.
    #[error("page index {index} out of range (0..{page_count})")]
    PageIndex { index: usize, page_count: usize },

    /// A core library error.
    #[error(transparent)]
    Core(#[from] CropError),
}

impl From<BackendError> for CropError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => CropError::ParseError(msg),
            BackendError::Io(e) => CropError::IoError(e.to_string()),
            BackendError::PageIndex { index, page_count } => CropError::PageOutOfRange {
                page: index + 1,
                page_count,
            },
            BackendError::Core(e) => e,
        }
    }
}

impl From<lopdf::Error> for BackendError {
    fn from(err: lopdf::Error) -> Self {
        BackendError::Parse(err.to_string())
    }
}
