//! Raster images decoded and encoded through the `image` crate

use super::pbm::{self, PbmFormat};
use crate::error::{Error, Result};
use crate::models::BitMatrix;
use crate::utils::binarization::{Threshold, binarize};
use image::{GrayImage, Luma};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

fn is_pbm(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pbm"))
}

/// Load any supported image file as a bit matrix
///
/// `.pbm` files are read bit-exact; every other format is converted to
/// 8-bit luma and binarized with `threshold`.
pub fn load_binary<P: AsRef<Path>>(path: P, threshold: Threshold) -> Result<BitMatrix> {
    let path = path.as_ref();
    if is_pbm(path) {
        return pbm::read_pbm(BufReader::new(File::open(path)?));
    }
    let gray = image::open(path)?.to_luma8();
    log::debug!(
        "{}: {}x{} luma, threshold {:?}",
        path.display(),
        gray.width(),
        gray.height(),
        threshold
    );
    Ok(binarize(&gray, threshold))
}

/// Render a bit matrix as a grayscale image (black = 0, white = 255)
///
/// Fails with [`Error::TooLarge`] when a side does not fit in `u32`.
pub fn to_gray_image(matrix: &BitMatrix) -> Result<GrayImage> {
    let too_large = || Error::TooLarge(matrix.width(), matrix.height());
    let width = u32::try_from(matrix.width()).map_err(|_| too_large())?;
    let height = u32::try_from(matrix.height()).map_err(|_| too_large())?;
    Ok(GrayImage::from_fn(width, height, |x, y| {
        if matrix.get(x as usize, y as usize) {
            Luma([0])
        } else {
            Luma([255])
        }
    }))
}

/// Save a bit matrix to `path`
///
/// `.pbm` paths are written as PBM in `format`; other extensions go through
/// the `image` encoder selected by the extension.
pub fn save_binary<P: AsRef<Path>>(
    matrix: &BitMatrix,
    path: P,
    format: PbmFormat,
) -> Result<()> {
    let path = path.as_ref();
    if is_pbm(path) {
        return pbm::write_pbm(matrix, BufWriter::new(File::create(path)?), format);
    }
    to_gray_image(matrix)?.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_image_colours() {
        let mut matrix = BitMatrix::new(2, 1);
        matrix.put(1, 0, true);
        let image = to_gray_image(&matrix).unwrap();
        assert_eq!(image.get_pixel(0, 0), &Luma([255]));
        assert_eq!(image.get_pixel(1, 0), &Luma([0]));
    }

    #[test]
    fn test_gray_image_binarizes_back() {
        let matrix = BitMatrix::from_row_major(3, 2, [true, false, true, false, true, false]);
        let back = binarize(&to_gray_image(&matrix).unwrap(), Threshold::Otsu);
        assert_eq!(back, matrix);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_matrix_is_rejected() {
        // Zero rows keep the matrix itself empty
        let wide = BitMatrix::new(u32::MAX as usize + 1, 0);
        assert!(matches!(
            to_gray_image(&wide),
            Err(Error::TooLarge(w, 0)) if w == u32::MAX as usize + 1
        ));
        assert!(to_gray_image(&BitMatrix::new(u32::MAX as usize, 0)).is_ok());
    }

    #[test]
    fn test_extension_dispatch() {
        assert!(is_pbm(Path::new("scan.PBM")));
        assert!(is_pbm(Path::new("dir/scan.pbm")));
        assert!(!is_pbm(Path::new("scan.png")));
        assert!(!is_pbm(Path::new("pbm")));
    }
}
