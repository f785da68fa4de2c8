/// Grid coordinate of a single cell in a [`BitMatrix`](super::BitMatrix)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    /// Column index
    pub col: usize,
    /// Row index
    pub row: usize,
}

impl Pixel {
    /// Create a new pixel coordinate
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// 4-connected neighbours inside a `width` x `height` grid,
    /// in the order up, right, down, left
    pub fn neighbors(self, width: usize, height: usize) -> Neighbors {
        let Pixel { col, row } = self;
        Neighbors {
            cells: [
                (row > 0).then(|| Pixel::new(col, row - 1)),
                (col + 1 < width).then(|| Pixel::new(col + 1, row)),
                (row + 1 < height).then(|| Pixel::new(col, row + 1)),
                (col > 0).then(|| Pixel::new(col - 1, row)),
            ],
            next: 0,
        }
    }
}

impl From<(usize, usize)> for Pixel {
    fn from((col, row): (usize, usize)) -> Self {
        Self::new(col, row)
    }
}

/// Iterator over the in-bounds neighbours of a pixel
#[derive(Debug, Clone)]
pub struct Neighbors {
    cells: [Option<Pixel>; 4],
    next: usize,
}

impl Iterator for Neighbors {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        while self.next < self.cells.len() {
            let cell = self.cells[self.next];
            self.next += 1;
            if cell.is_some() {
                return cell;
            }
        }
        None
    }
}
