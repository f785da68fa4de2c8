//! Bitmap sources and sinks
//!
//! - PBM (`P1`/`P4`) reading and writing, bit-exact
//! - Other raster formats via `image`, binarized on load

pub mod pbm;
pub mod raster;

pub use pbm::{PbmFormat, read_pbm, write_pbm};
pub use raster::{load_binary, save_binary};
