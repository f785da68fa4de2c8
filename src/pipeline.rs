use crate::error::Result;
use crate::fill::{FillStats, FloodFill};
use crate::io::{PbmFormat, load_binary, read_pbm, save_binary, write_pbm};
use crate::models::BitMatrix;
use crate::utils::binarization::Threshold;
use std::io::{Read, Write};
use std::path::Path;

/// Input and output policy for a [`Cleaner`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanOptions {
    /// Binarization policy for non-PBM input
    pub threshold: Threshold,
    /// PBM variant written to `.pbm` outputs and streams
    pub format: PbmFormat,
}

impl CleanOptions {
    /// Options seeded from the environment
    pub fn from_env() -> Self {
        Self {
            threshold: Threshold::from_env(),
            format: PbmFormat::Plain,
        }
    }
}

/// Decode -> remove black edges -> encode, reusing one fill engine
#[derive(Debug)]
pub struct Cleaner {
    engine: FloodFill,
    options: CleanOptions,
}

impl Cleaner {
    /// Create a cleaner with the given options
    pub fn new(options: CleanOptions) -> Self {
        Self {
            engine: FloodFill::from_env(),
            options,
        }
    }

    /// Options in effect
    pub fn options(&self) -> CleanOptions {
        self.options
    }

    /// Remove black edges from an already decoded matrix
    pub fn clean(&mut self, matrix: &mut BitMatrix) -> FillStats {
        self.engine.run(matrix)
    }

    /// Decode an image file with the configured threshold
    pub fn load<P: AsRef<Path>>(&self, input: P) -> Result<BitMatrix> {
        let input = input.as_ref();
        load_binary(input, self.options.threshold).map_err(|e| e.for_path(input))
    }

    /// Save `matrix` to `output`, as PBM in the configured format for `.pbm`
    pub fn save<P: AsRef<Path>>(&self, matrix: &BitMatrix, output: P) -> Result<()> {
        let output = output.as_ref();
        save_binary(matrix, output, self.options.format).map_err(|e| e.for_path(output))
    }

    /// Encode `matrix` as PBM in the configured format
    pub fn write<W: Write>(&self, matrix: &BitMatrix, writer: W) -> Result<()> {
        write_pbm(matrix, writer, self.options.format)
    }

    /// Read a PBM stream, clean it and write PBM to `writer`
    pub fn clean_stream<R: Read, W: Write>(&mut self, reader: R, writer: W) -> Result<FillStats> {
        let mut matrix = read_pbm(reader)?;
        let stats = self.clean(&mut matrix);
        self.write(&matrix, writer)?;
        Ok(stats)
    }

    /// Load an image file and return the cleaned matrix
    pub fn clean_path<P: AsRef<Path>>(&mut self, input: P) -> Result<(BitMatrix, FillStats)> {
        let mut matrix = self.load(input)?;
        let stats = self.clean(&mut matrix);
        Ok((matrix, stats))
    }

    /// Clean `input` and save the result to `output`
    pub fn clean_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &mut self,
        input: P,
        output: Q,
    ) -> Result<FillStats> {
        let (matrix, stats) = self.clean_path(input)?;
        self.save(&matrix, output)?;
        Ok(stats)
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new(CleanOptions::default())
    }
}

/// Clean a PBM stream with options from the environment
pub fn clean_reader<R: Read, W: Write>(reader: R, writer: W) -> Result<FillStats> {
    Cleaner::new(CleanOptions::from_env()).clean_stream(reader, writer)
}

/// Load and clean an image file with options from the environment
pub fn clean_path<P: AsRef<Path>>(input: P) -> Result<(BitMatrix, FillStats)> {
    Cleaner::new(CleanOptions::from_env()).clean_path(input)
}
