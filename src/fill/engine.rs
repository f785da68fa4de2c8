use super::border::border_pixels;
use crate::models::{BitMatrix, Pixel};

/// Counters describing one black-edge removal run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Black border pixels that seeded the work-stack
    pub seeded: usize,
    /// Work items pushed in total, seeds included
    pub pushed: usize,
    /// Pixels turned from black to white
    pub whitened: usize,
    /// Largest work-stack length observed
    pub max_stack_depth: usize,
}

/// Iterative border flood fill
///
/// Erases every black pixel 4-connected to the image border using an explicit
/// LIFO work-stack instead of recursion. A pixel is whitened the moment it is
/// pushed, so the white value doubles as the visited marker and no pixel is
/// pushed twice. The stack allocation is kept between runs; its contents never
/// outlive a single [`FloodFill::run`].
#[derive(Debug, Default)]
pub struct FloodFill {
    stack: Vec<Pixel>,
}

impl FloodFill {
    /// Create an engine with an empty work-stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine whose work-stack starts with room for `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stack: Vec::with_capacity(capacity),
        }
    }

    /// Create an engine sized from `UNBLACK_STACK_CAPACITY`
    pub fn from_env() -> Self {
        Self::with_capacity(crate::config::stack_capacity())
    }

    /// Current work-stack allocation
    pub fn capacity(&self) -> usize {
        self.stack.capacity()
    }

    /// Whiten every border-connected black pixel of `matrix` in place
    pub fn run(&mut self, matrix: &mut BitMatrix) -> FillStats {
        self.stack.clear();
        let mut stats = FillStats::default();

        self.seed(matrix, &mut stats);
        log::trace!(
            "seeded {} black border pixels of {}x{}",
            stats.seeded,
            matrix.width(),
            matrix.height()
        );
        self.drain(matrix, &mut stats);

        debug_assert!(self.stack.is_empty());
        debug_assert!(stats.pushed <= matrix.width() * matrix.height());
        log::debug!(
            "black edges removed: {}x{} whitened={} max_stack={}",
            matrix.width(),
            matrix.height(),
            stats.whitened,
            stats.max_stack_depth
        );
        stats
    }

    fn seed(&mut self, matrix: &mut BitMatrix, stats: &mut FillStats) {
        for pixel in border_pixels(matrix.width(), matrix.height()) {
            if self.push_if_black(matrix, pixel, stats) {
                stats.seeded += 1;
            }
        }
    }

    fn drain(&mut self, matrix: &mut BitMatrix, stats: &mut FillStats) {
        let (width, height) = (matrix.width(), matrix.height());
        while let Some(pixel) = self.stack.pop() {
            // No-op for pushed pixels, which are whitened on push
            matrix.put(pixel.col, pixel.row, false);

            for neighbor in pixel.neighbors(width, height) {
                self.push_if_black(matrix, neighbor, stats);
            }
        }
    }

    /// Test-and-clear: whiten `pixel` and push it if it was black
    #[inline]
    fn push_if_black(
        &mut self,
        matrix: &mut BitMatrix,
        pixel: Pixel,
        stats: &mut FillStats,
    ) -> bool {
        if !matrix.put(pixel.col, pixel.row, false) {
            return false;
        }
        self.stack.push(pixel);
        stats.pushed += 1;
        stats.whitened += 1;
        stats.max_stack_depth = stats.max_stack_depth.max(self.stack.len());
        true
    }
}

/// Remove black edges from `matrix` with a fresh engine
pub fn remove_black_edges(matrix: &mut BitMatrix) -> FillStats {
    FloodFill::from_env().run(matrix)
}
