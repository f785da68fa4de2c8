//! Black-edge removal
//!
//! - Border seeding (every edge pixel exactly once, fixed scan order)
//! - Iterative 4-connected flood fill over an explicit work-stack

/// Border scan order used to seed the fill
pub mod border;
/// Work-stack flood fill engine
pub mod engine;

pub use border::border_pixels;
pub use engine::{FillStats, FloodFill, remove_black_edges};
