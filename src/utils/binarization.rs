use crate::models::BitMatrix;
use image::GrayImage;

/// How grayscale input is split into black and white
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Threshold {
    /// Pick the threshold with Otsu's method
    #[default]
    Otsu,
    /// Pixels darker than this value are black
    Fixed(u8),
}

impl Threshold {
    /// `Fixed` when `UNBLACK_THRESHOLD` is set, `Otsu` otherwise
    pub fn from_env() -> Self {
        crate::config::threshold_override().map_or(Threshold::Otsu, Threshold::Fixed)
    }
}

/// Binarize a grayscale image with the given policy
/// Returns a BitMatrix where true = black, false = white
pub fn binarize(gray: &GrayImage, threshold: Threshold) -> BitMatrix {
    let level = match threshold {
        Threshold::Otsu => otsu_threshold(gray.as_raw()),
        Threshold::Fixed(level) => level,
    };
    threshold_binarize(gray, level)
}

/// Binarize using Otsu's optimal threshold
pub fn otsu_binarize(gray: &GrayImage) -> BitMatrix {
    binarize(gray, Threshold::Otsu)
}

/// Simple global threshold binarization: values below `level` become black
pub fn threshold_binarize(gray: &GrayImage, level: u8) -> BitMatrix {
    let (width, height) = gray.dimensions();
    BitMatrix::from_row_major(
        width as usize,
        height as usize,
        gray.as_raw().iter().map(|&v| v < level),
    )
}

/// Otsu's threshold: maximizes between-class variance of the histogram
///
/// Pixels strictly below the returned level form the dark class. Uniform
/// input returns 128.
pub fn otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total = gray.len() as f64;
    let total_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(v, &n)| v as f64 * n as f64)
        .sum();

    let mut dark_pixels = 0u64;
    let mut dark_sum = 0.0f64;
    let mut best_variance = 0.0f64;
    let mut best = 128u8;

    // Candidate level t puts intensities 0..t in the dark class
    for t in 1..=255usize {
        dark_pixels += histogram[t - 1];
        dark_sum += (t - 1) as f64 * histogram[t - 1] as f64;
        let light_pixels = gray.len() as u64 - dark_pixels;
        if dark_pixels == 0 || light_pixels == 0 {
            continue;
        }

        let dark_mean = dark_sum / dark_pixels as f64;
        let light_mean = (total_sum - dark_sum) / light_pixels as f64;
        let w_dark = dark_pixels as f64 / total;
        let w_light = light_pixels as f64 / total;
        let variance = w_dark * w_light * (dark_mean - light_mean).powi(2);

        if variance > best_variance {
            best_variance = variance;
            best = t as u8;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32, data: Vec<u8>) -> GrayImage {
        GrayImage::from_raw(width, height, data).expect("buffer matches dimensions")
    }

    #[test]
    fn test_threshold_binarize() {
        let image = gray(2, 2, vec![100, 150, 200, 50]);
        let binary = threshold_binarize(&image, 128);

        // Pixels < 128 should be black (true)
        assert!(binary.get(0, 0)); // 100 < 128
        assert!(!binary.get(1, 0)); // 150 >= 128
        assert!(!binary.get(0, 1)); // 200 >= 128
        assert!(binary.get(1, 1)); // 50 < 128
    }

    #[test]
    fn test_otsu_binarize() {
        // Top half dark, bottom half light
        let mut data = vec![50u8; 50];
        data.extend(vec![200u8; 50]);
        let binary = otsu_binarize(&gray(10, 10, data));

        assert!(binary.get(0, 0));
        assert!(binary.get(9, 4));
        assert!(!binary.get(0, 5));
        assert!(!binary.get(9, 9));
    }

    #[test]
    fn test_otsu_threshold_separates_classes() {
        let mut data = vec![20u8; 30];
        data.extend(vec![220u8; 70]);
        let level = otsu_threshold(&data);
        assert!(level > 20 && level <= 220);
    }

    #[test]
    fn test_otsu_threshold_uniform_input() {
        assert_eq!(otsu_threshold(&[128u8; 64]), 128);
        assert_eq!(otsu_threshold(&[]), 128);
    }

    #[test]
    fn test_fixed_policy() {
        let image = gray(3, 1, vec![10, 99, 100]);
        let binary = binarize(&image, Threshold::Fixed(100));
        assert_eq!(binary.count_black(), 2);
        assert!(!binary.get(2, 0));
    }
}
