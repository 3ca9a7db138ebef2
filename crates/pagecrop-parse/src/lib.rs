//! pagecrop-parse: document access for pagecrop.
//!
//! Defines the [`CropBackend`] capability interface (read page boxes and
//! outline, multiply pages, write boxes, save) and implements it on top of
//! lopdf. Depends on pagecrop-core for shared data types.

// Log macros compile to nothing unless the `tracing` feature is on.
#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

pub mod backend;
pub mod error;
pub mod lopdf_backend;

pub use backend::CropBackend;
pub use error::BackendError;
pub use lopdf_backend::{LopdfBackend, LopdfDocument};
pub use pagecrop_core;
