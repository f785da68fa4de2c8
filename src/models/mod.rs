//! Core data structures
//!
//! - `BitMatrix`: packed width x height grid of single-bit cells
//! - `Pixel`: grid coordinate, the flood fill's work item

/// Packed bit matrix with row- and column-major traversal
pub mod matrix;
/// Grid coordinates and 4-connected neighbours
pub mod pixel;

pub use matrix::{BitMatrix, Cells};
pub use pixel::Pixel;
