//! unblack - remove black edges from binary bitmaps
//!
//! Every black region that touches the image border is erased (whitened) by an
//! iterative 4-connected flood fill seeded from the border; interior black
//! regions are left untouched. Typical use is scan cleanup before further
//! image analysis.
//!
//! ```
//! use unblack::{BitMatrix, remove_black_edges};
//!
//! let mut matrix = BitMatrix::new(3, 3);
//! matrix.put(0, 0, true); // touches the border
//! matrix.put(1, 1, true); // interior
//! remove_black_edges(&mut matrix);
//! assert!(!matrix.get(0, 0));
//! assert!(matrix.get(1, 1));
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Environment-driven defaults
pub mod config;
/// Crate error type
pub mod error;
/// Border seeding and the flood fill engine
pub mod fill;
/// PBM and raster image sources and sinks
pub mod io;
/// Core data structures (BitMatrix, Pixel)
pub mod models;
/// Decode, clean and encode in one step
pub mod pipeline;
/// Statistics, input discovery and parallel batch cleaning
pub mod tools;
/// Utility functions (binarization)
pub mod utils;

pub use error::{Error, Result};
pub use fill::{FillStats, FloodFill, remove_black_edges};
pub use io::PbmFormat;
pub use models::{BitMatrix, Pixel};
pub use pipeline::{CleanOptions, Cleaner, clean_path, clean_reader};
pub use utils::binarization::Threshold;
