use crate::models::Pixel;

/// Every border pixel of a `width` x `height` grid, each exactly once
///
/// Edges are scanned top (left to right), right (top to bottom), bottom
/// (left to right), left (top to bottom). Corner ownership: top-left goes to
/// the top scan, top-right to the right scan, both bottom corners to the
/// bottom scan. A grid that is a single row or a single column is produced by
/// one scan only.
pub fn border_pixels(width: usize, height: usize) -> impl Iterator<Item = Pixel> {
    let empty = width == 0 || height == 0;
    let tall = !empty && height >= 2;

    let top = match (empty, height) {
        (true, _) => 0..0,
        (false, 1) => 0..width,
        (false, _) => 0..width - 1,
    };
    let right = if tall { 0..height - 1 } else { 0..0 };
    let bottom = if tall { 0..width } else { 0..0 };
    let left = if tall && width >= 2 { 1..height - 1 } else { 0..0 };

    top.map(|col| Pixel::new(col, 0))
        .chain(right.map(move |row| Pixel::new(width - 1, row)))
        .chain(bottom.map(move |col| Pixel::new(col, height - 1)))
        .chain(left.map(|row| Pixel::new(0, row)))
}

/// Number of pixels [`border_pixels`] yields
pub fn border_len(width: usize, height: usize) -> usize {
    match (width, height) {
        (0, _) | (_, 0) => 0,
        (1, h) => h,
        (w, 1) => w,
        (w, h) => 2 * w + 2 * h - 4,
    }
}
