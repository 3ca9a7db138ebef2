//! Error type for pagecrop.
//!
//! Provides [`CropError`] for fatal errors that stop a crop run. None of
//! these are retried internally; retrying is up to the caller.

use std::fmt;

/// Fatal error types for clustering and cropping.
#[derive(Debug, Clone, PartialEq)]
pub enum CropError {
    /// I/O error reading the source or writing the destination.
    IoError(String),
    /// The source document could not be parsed or has a malformed structure.
    ParseError(String),
    /// The destination path cannot be used for output.
    InvalidDestination(String),
    /// A page number outside `1..=page_count` was used.
    PageOutOfRange {
        /// The offending 1-based page number.
        page: usize,
        /// Number of pages in the document or plan.
        page_count: usize,
    },
    /// The crop plan does not cover the source document's pages.
    PlanMismatch {
        /// Pages covered by the plan.
        plan_pages: usize,
        /// Pages in the source document.
        document_pages: usize,
    },
    /// A ratio tuple is NaN, infinite, or inverted beyond clamping.
    InvalidRatio(String),
    /// The source document is encrypted.
    PasswordRequired,
    /// The caller cancelled the run between two pages.
    Cancelled,
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for CropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropError::IoError(msg) => write!(f, "I/O error: {msg}"),
            CropError::ParseError(msg) => write!(f, "parse error: {msg}"),
            CropError::InvalidDestination(msg) => write!(f, "invalid destination: {msg}"),
            CropError::PageOutOfRange { page, page_count } => {
                write!(f, "page {page} out of range (1..={page_count})")
            }
            CropError::PlanMismatch {
                plan_pages,
                document_pages,
            } => write!(
                f,
                "crop plan covers {plan_pages} pages but the document has {document_pages}"
            ),
            CropError::InvalidRatio(msg) => write!(f, "invalid crop ratio: {msg}"),
            CropError::PasswordRequired => write!(f, "PDF is encrypted and requires a password"),
            CropError::Cancelled => write!(f, "crop cancelled"),
            CropError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CropError {}

impl From<std::io::Error> for CropError {
    fn from(err: std::io::Error) -> Self {
        CropError::IoError(err.to_string())
    }
}
