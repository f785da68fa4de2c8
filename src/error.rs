use std::path::PathBuf;

/// Errors raised while reading, cleaning or writing bitmaps
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Error reading or writing a stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error decoding or encoding a raster image.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The stream does not start with a supported PBM magic number.
    #[error("unsupported magic number {0:?}, expected P1 or P4")]
    BadMagic(String),

    /// A header field is missing or not a number.
    #[error("invalid PBM header: {0}")]
    InvalidHeader(&'static str),

    /// Width or height is zero.
    #[error("empty image ({0}x{1})")]
    EmptyImage(usize, usize),

    /// A plain PBM pixel token is neither `0` nor `1`.
    #[error("invalid pixel {0:?} at index {1}")]
    InvalidPixel(char, usize),

    /// The pixel data ended early.
    #[error("pixel data truncated: got {0} of {1} pixels")]
    Truncated(usize, usize),

    /// The matrix is wider or taller than a raster image can be.
    #[error("{0}x{1} bitmap exceeds the raster size limit")]
    TooLarge(usize, usize),

    /// An input path could not be processed.
    #[error("{}: {source}", .path.display())]
    Input {
        /// The offending path.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the input path to an error
    pub fn for_path(self, path: impl Into<PathBuf>) -> Self {
        Error::Input {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

/// Crate result alias
pub type Result<T> = std::result::Result<T, Error>;
