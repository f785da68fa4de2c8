use crate::error::Result;
use crate::fill::FillStats;
use crate::models::BitMatrix;
use crate::pipeline::{CleanOptions, Cleaner};
use rayon::prelude::*;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions picked up when a directory is given as input
const IMAGE_EXTENSIONS: [&str; 7] = ["pbm", "png", "jpg", "jpeg", "gif", "bmp", "tif"];

/// Summary statistics for a binary matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryStats {
    /// Count of black pixels.
    pub black_pixels: usize,
    /// Total pixels in the matrix.
    pub total_pixels: usize,
    /// Ratio of black pixels to total pixels.
    pub black_ratio: f64,
}

/// Compute black pixel stats for a binary matrix.
pub fn binary_stats(binary: &BitMatrix) -> BinaryStats {
    let black = binary.count_black();
    let total = binary.width() * binary.height();
    let ratio = if total == 0 {
        0.0
    } else {
        black as f64 / total as f64
    };
    BinaryStats {
        black_pixels: black,
        total_pixels: total,
        black_ratio: ratio,
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Expand input paths: files are kept as given, directories are searched
/// recursively for images. The result is sorted.
pub fn collect_inputs<P: AsRef<Path>>(inputs: &[P]) -> Vec<PathBuf> {
    let mut stack: Vec<PathBuf> = Vec::new();
    let mut images = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        if input.is_dir() {
            stack.push(input.to_path_buf());
        } else {
            images.push(input.to_path_buf());
        }
    }

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("skipping {}: {}", dir.display(), err);
                continue;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if has_image_extension(&path) {
                images.push(path);
            }
        }
    }

    images.sort();
    images
}

fn output_stem(input: &Path) -> OsString {
    input.file_stem().unwrap_or(input.as_os_str()).to_os_string()
}

/// Output location for `input` inside `out_dir`: same stem, `.pbm` extension
pub fn output_path_for(input: &Path, out_dir: &Path) -> PathBuf {
    let mut name = output_stem(input);
    name.push(".pbm");
    out_dir.join(name)
}

/// Distinct output locations for a batch, one per input and in input order
///
/// The first input with a given stem gets `<stem>.pbm`; later ones get
/// `<stem>-1.pbm`, `<stem>-2.pbm` and so on, skipping names already taken.
pub fn plan_outputs(inputs: &[PathBuf], out_dir: &Path) -> Vec<PathBuf> {
    let mut taken = HashSet::with_capacity(inputs.len());
    inputs
        .iter()
        .map(|input| {
            let mut output = output_path_for(input, out_dir);
            let mut suffix = 0usize;
            while !taken.insert(output.clone()) {
                suffix += 1;
                let mut name = output_stem(input);
                name.push(format!("-{suffix}.pbm"));
                output = out_dir.join(name);
            }
            if suffix > 0 {
                log::warn!(
                    "{}: output name taken, writing {}",
                    input.display(),
                    output.display()
                );
            }
            output
        })
        .collect()
}

/// Result of cleaning one batch input
#[derive(Debug)]
pub struct BatchOutcome {
    /// Input file
    pub input: PathBuf,
    /// Where the cleaned bitmap was written
    pub output: PathBuf,
    /// Fill counters, or the reason the input was skipped
    pub result: Result<FillStats>,
}

/// Clean many files in parallel, writing `<stem>.pbm` files into `out_dir`
///
/// Output names are assigned by [`plan_outputs`] before any work starts, so no
/// two inputs write the same file. Each worker thread owns its own
/// [`Cleaner`]; every individual fill is sequential. Outcomes are returned in
/// input order.
pub fn batch_clean(inputs: &[PathBuf], out_dir: &Path, options: CleanOptions) -> Vec<BatchOutcome> {
    let outputs = plan_outputs(inputs, out_dir);
    inputs
        .par_iter()
        .zip(outputs)
        .map_init(
            || Cleaner::new(options),
            |cleaner, (input, output)| {
                let result = cleaner.clean_file(input, &output);
                if let Err(err) = &result {
                    log::warn!("{err}");
                }
                BatchOutcome {
                    input: input.clone(),
                    output,
                    result,
                }
            },
        )
        .collect()
}
