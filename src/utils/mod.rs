//! Utility functions for image preparation
//!
//! - Binarization (Otsu's method and threshold-based) of 8-bit grayscale

/// Grayscale to bit matrix conversion
pub mod binarization;
