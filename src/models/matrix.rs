const WORD_BITS: usize = 64;

/// Packed two-dimensional bit matrix for binary images
///
/// Bits are grouped by column: every column owns a run of `u64` words indexed
/// by row, so a cell costs one bit and `get`/`put` are O(1).
/// `true` is black, `false` is white.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    /// Words per column
    stride: usize,
    words: Vec<u64>,
}

impl BitMatrix {
    /// Create a new all-white bit matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let stride = height.div_ceil(WORD_BITS);
        let len = stride
            .checked_mul(width)
            .expect("bit matrix dimensions overflow");
        Self {
            width,
            height,
            stride,
            words: vec![0; len],
        }
    }

    /// Build a matrix from `width * height` bits delivered in row-major order
    ///
    /// Missing trailing bits are left white; surplus bits are ignored.
    pub fn from_row_major<I>(width: usize, height: usize, bits: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut matrix = Self::new(width, height);
        let mut bits = bits.into_iter();
        matrix.map_row_major(|col, row, m, _| {
            if let Some(bit) = bits.next() {
                m.put(col, row, bit);
            }
        });
        matrix
    }

    /// Get matrix width (number of columns)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height (number of rows)
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn locate(&self, col: usize, row: usize) -> (usize, u64) {
        assert!(
            col < self.width && row < self.height,
            "cell ({col}, {row}) outside {}x{} bit matrix",
            self.width,
            self.height
        );
        (
            col * self.stride + row / WORD_BITS,
            1u64 << (row % WORD_BITS),
        )
    }

    /// Get bit at (col, row)
    ///
    /// # Panics
    /// Panics if the cell lies outside the matrix.
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> bool {
        let (word, mask) = self.locate(col, row);
        self.words[word] & mask != 0
    }

    /// Checked variant of [`BitMatrix::get`]
    pub fn try_get(&self, col: usize, row: usize) -> Option<bool> {
        if col < self.width && row < self.height {
            Some(self.get(col, row))
        } else {
            None
        }
    }

    /// Set bit at (col, row), returning the bit stored before the call
    ///
    /// # Panics
    /// Panics if the cell lies outside the matrix.
    #[inline]
    pub fn put(&mut self, col: usize, row: usize, value: bool) -> bool {
        let (word, mask) = self.locate(col, row);
        let slot = &mut self.words[word];
        let previous = *slot & mask != 0;
        if value {
            *slot |= mask;
        } else {
            *slot &= !mask;
        }
        previous
    }

    /// Visit every cell, rows outermost: row 0 left to right, then row 1, ...
    ///
    /// The callback receives the matrix itself so it can write cells while
    /// the traversal runs.
    pub fn map_row_major<F>(&mut self, mut visit: F)
    where
        F: FnMut(usize, usize, &mut BitMatrix, bool),
    {
        for row in 0..self.height {
            for col in 0..self.width {
                let value = self.get(col, row);
                visit(col, row, self, value);
            }
        }
    }

    /// Visit every cell, columns outermost: column 0 top to bottom, then column 1, ...
    pub fn map_col_major<F>(&mut self, mut visit: F)
    where
        F: FnMut(usize, usize, &mut BitMatrix, bool),
    {
        for col in 0..self.width {
            for row in 0..self.height {
                let value = self.get(col, row);
                visit(col, row, self, value);
            }
        }
    }

    /// Iterate `(col, row, bit)` in row-major order
    pub fn iter_row_major(&self) -> Cells<'_> {
        Cells::new(self, Order::RowMajor)
    }

    /// Iterate `(col, row, bit)` in column-major order
    pub fn iter_col_major(&self) -> Cells<'_> {
        Cells::new(self, Order::ColMajor)
    }

    /// Count black cells
    pub fn count_black(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// True when no cell is black
    pub fn is_blank(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Clear all bits to white
    pub fn clear(&mut self) {
        self.words.fill(0);
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[derive(Debug, Clone, Copy)]
enum Order {
    RowMajor,
    ColMajor,
}

/// Lazy cell iterator returned by [`BitMatrix::iter_row_major`] and
/// [`BitMatrix::iter_col_major`]
#[derive(Debug, Clone)]
pub struct Cells<'a> {
    matrix: &'a BitMatrix,
    order: Order,
    next: usize,
    total: usize,
}

impl<'a> Cells<'a> {
    fn new(matrix: &'a BitMatrix, order: Order) -> Self {
        Self {
            matrix,
            order,
            next: 0,
            total: matrix.width * matrix.height,
        }
    }
}

impl Iterator for Cells<'_> {
    type Item = (usize, usize, bool);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }
        let i = self.next;
        self.next += 1;
        let (col, row) = match self.order {
            Order::RowMajor => (i % self.matrix.width, i / self.matrix.width),
            Order::ColMajor => (i / self.matrix.height, i % self.matrix.height),
        };
        Some((col, row, self.matrix.get(col, row)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Cells<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_matrix() {
        let mut matrix = BitMatrix::new(8, 8);
        assert_eq!(matrix.width(), 8);
        assert_eq!(matrix.height(), 8);

        assert!(!matrix.put(3, 4, true));
        assert!(matrix.get(3, 4));
        assert!(!matrix.get(3, 3));
        assert!(!matrix.get(4, 3));

        assert!(matrix.put(3, 4, false));
        assert!(!matrix.get(3, 4));

        matrix.put(7, 7, true);
        matrix.clear();
        assert!(matrix.is_blank());
    }

    #[test]
    fn test_put_returns_previous_value() {
        let mut matrix = BitMatrix::new(3, 70);
        for col in 0..3 {
            for row in 0..70 {
                let value = (col + row) % 3 == 0;
                assert!(!matrix.put(col, row, value));
                assert_eq!(matrix.put(col, row, value), value);
                assert_eq!(matrix.get(col, row), value);
            }
        }
        assert_eq!(matrix.count_black(), 70);
    }

    #[test]
    fn test_tall_columns_do_not_alias() {
        // 130 rows spans three words per column
        let mut matrix = BitMatrix::new(2, 130);
        matrix.put(0, 129, true);
        assert!(!matrix.get(1, 1));
        assert!(!matrix.get(1, 129));
        matrix.put(1, 64, true);
        assert!(!matrix.get(0, 64));
        assert_eq!(matrix.count_black(), 2);
    }

    #[test]
    fn test_dimensions_are_kept() {
        for (w, h) in [(0, 0), (0, 5), (5, 0), (1, 1), (17, 3), (3, 200)] {
            let matrix = BitMatrix::new(w, h);
            assert_eq!(matrix.width(), w);
            assert_eq!(matrix.height(), h);
            assert_eq!(matrix.count_black(), 0);
        }
    }

    #[test]
    #[should_panic(expected = "outside 4x3 bit matrix")]
    fn test_get_out_of_bounds_panics() {
        let matrix = BitMatrix::new(4, 3);
        matrix.get(4, 0);
    }

    #[test]
    #[should_panic]
    fn test_put_out_of_bounds_panics() {
        let mut matrix = BitMatrix::new(4, 3);
        matrix.put(0, 3, true);
    }

    #[test]
    fn test_try_get() {
        let mut matrix = BitMatrix::new(2, 2);
        matrix.put(1, 1, true);
        assert_eq!(matrix.try_get(1, 1), Some(true));
        assert_eq!(matrix.try_get(0, 1), Some(false));
        assert_eq!(matrix.try_get(2, 0), None);
        assert_eq!(BitMatrix::default().try_get(0, 0), None);
    }

    #[test]
    fn test_map_row_major_order() {
        let mut matrix = BitMatrix::new(3, 2);
        let mut visited = Vec::new();
        matrix.map_row_major(|col, row, _, _| visited.push((col, row)));
        assert_eq!(
            visited,
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
        );
    }

    #[test]
    fn test_map_col_major_order() {
        let mut matrix = BitMatrix::new(3, 2);
        let mut visited = Vec::new();
        matrix.map_col_major(|col, row, _, _| visited.push((col, row)));
        assert_eq!(
            visited,
            vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]
        );
    }

    #[test]
    fn test_map_sees_current_values_and_can_write() {
        let mut matrix = BitMatrix::new(2, 2);
        matrix.put(1, 0, true);
        let mut seen = Vec::new();
        matrix.map_row_major(|col, row, m, value| {
            seen.push(value);
            m.put(col, row, !value);
        });
        assert_eq!(seen, vec![false, true, false, false]);
        assert_eq!(matrix.count_black(), 3);
        assert!(!matrix.get(1, 0));
    }

    #[test]
    fn test_from_row_major() {
        let bits = [true, false, false, false, true, true];
        let matrix = BitMatrix::from_row_major(3, 2, bits);
        assert!(matrix.get(0, 0));
        assert!(!matrix.get(1, 0));
        assert!(!matrix.get(2, 0));
        assert!(!matrix.get(0, 1));
        assert!(matrix.get(1, 1));
        assert!(matrix.get(2, 1));
    }

    #[test]
    fn test_iterators_match_callbacks() {
        let mut matrix = BitMatrix::from_row_major(4, 3, (0..12).map(|i| i % 5 == 0));

        let mut row_major = Vec::new();
        matrix.map_row_major(|c, r, _, v| row_major.push((c, r, v)));
        assert_eq!(matrix.iter_row_major().collect::<Vec<_>>(), row_major);

        let mut col_major = Vec::new();
        matrix.map_col_major(|c, r, _, v| col_major.push((c, r, v)));
        assert_eq!(matrix.iter_col_major().collect::<Vec<_>>(), col_major);

        assert_eq!(matrix.iter_row_major().len(), 12);
    }

    #[test]
    fn test_iterators_on_empty_matrix() {
        let matrix = BitMatrix::new(0, 5);
        assert_eq!(matrix.iter_row_major().count(), 0);
        assert_eq!(matrix.iter_col_major().count(), 0);
    }
}
