//! Netpbm bitmap (PBM) reader and writers
//!
//! Plain (`P1`) and raw (`P4`) variants are supported. In both, 1 is black.

use crate::error::{Error, Result};
use crate::models::BitMatrix;
use std::io::{Read, Write};

/// PBM encoding variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PbmFormat {
    /// `P1`: ASCII `0`/`1` tokens
    #[default]
    Plain,
    /// `P4`: packed bits, rows padded to whole bytes
    Raw,
}

/// Byte cursor over a PBM header and body
struct Scanner<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Skip whitespace and `#` comments
    fn skip_blank(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'#' {
                while let Some(c) = self.peek() {
                    self.pos += 1;
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn magic(&mut self) -> Result<PbmFormat> {
        let magic = self.data.get(..2).unwrap_or(self.data);
        self.pos = magic.len();
        let format = match magic {
            b"P1" => PbmFormat::Plain,
            b"P4" => PbmFormat::Raw,
            other => return Err(Error::BadMagic(String::from_utf8_lossy(other).into_owned())),
        };
        // The magic number is a token of its own: `P13` is not `P1` + `3`
        match self.peek() {
            Some(b) if b.is_ascii_whitespace() || b == b'#' => Ok(format),
            Some(_) => {
                let end = self.data[self.pos..]
                    .iter()
                    .position(|b| b.is_ascii_whitespace())
                    .map_or(self.data.len(), |n| self.pos + n);
                Err(Error::BadMagic(
                    String::from_utf8_lossy(&self.data[..end]).into_owned(),
                ))
            }
            None => Err(Error::InvalidHeader("width")),
        }
    }

    fn dimension(&mut self, field: &'static str) -> Result<usize> {
        self.skip_blank();
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or(Error::InvalidHeader(field))
    }
}

/// Decode a PBM image into a bit matrix
///
/// Pixels are delivered to the matrix in row-major order.
pub fn read_pbm<R: Read>(mut reader: R) -> Result<BitMatrix> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    parse_pbm(&data)
}

/// Decode an in-memory PBM image
pub fn parse_pbm(data: &[u8]) -> Result<BitMatrix> {
    let mut scanner = Scanner::new(data);
    let format = scanner.magic()?;
    let width = scanner.dimension("width")?;
    let height = scanner.dimension("height")?;
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage(width, height));
    }
    let total = width
        .checked_mul(height)
        .ok_or(Error::InvalidHeader("dimensions overflow"))?;

    let bits = match format {
        PbmFormat::Plain => plain_bits(&mut scanner, total)?,
        PbmFormat::Raw => {
            // Exactly one whitespace byte separates the header from the raster
            if !scanner.peek().is_some_and(|b| b.is_ascii_whitespace()) {
                return Err(Error::InvalidHeader("missing raster separator"));
            }
            raw_bits(&data[scanner.pos + 1..], width, height)?
        }
    };

    Ok(BitMatrix::from_row_major(width, height, bits))
}

fn plain_bits(scanner: &mut Scanner<'_>, total: usize) -> Result<Vec<bool>> {
    // Every plain pixel takes at least one byte, so the header cannot make
    // us reserve more than the input holds
    let mut bits = Vec::with_capacity(total.min(scanner.data.len() - scanner.pos));
    while bits.len() < total {
        scanner.skip_blank();
        match scanner.peek() {
            Some(b'0') => bits.push(false),
            Some(b'1') => bits.push(true),
            Some(other) => return Err(Error::InvalidPixel(other as char, bits.len())),
            None => return Err(Error::Truncated(bits.len(), total)),
        }
        scanner.pos += 1;
    }
    Ok(bits)
}

fn raw_bits(raster: &[u8], width: usize, height: usize) -> Result<Vec<bool>> {
    let row_bytes = width.div_ceil(8);
    let needed = row_bytes
        .checked_mul(height)
        .ok_or(Error::InvalidHeader("dimensions overflow"))?;
    if raster.len() < needed {
        let got_rows = raster.len() / row_bytes;
        return Err(Error::Truncated(got_rows * width, width * height));
    }

    let mut bits = Vec::with_capacity(width * height);
    for row in raster[..needed].chunks_exact(row_bytes) {
        bits.extend((0..width).map(|col| row[col / 8] & (0x80 >> (col % 8)) != 0));
    }
    Ok(bits)
}

/// Encode a bit matrix as PBM in the requested format
pub fn write_pbm<W: Write>(matrix: &BitMatrix, writer: W, format: PbmFormat) -> Result<()> {
    match format {
        PbmFormat::Plain => write_pbm_plain(matrix, writer),
        PbmFormat::Raw => write_pbm_raw(matrix, writer),
    }
}

/// Encode as plain PBM: one line per row, space-separated `0`/`1` tokens
pub fn write_pbm_plain<W: Write>(matrix: &BitMatrix, mut writer: W) -> Result<()> {
    writeln!(writer, "P1")?;
    writeln!(writer, "{} {}", matrix.width(), matrix.height())?;

    let mut line = String::with_capacity(matrix.width() * 2);
    for row in 0..matrix.height() {
        line.clear();
        for col in 0..matrix.width() {
            if col > 0 {
                line.push(' ');
            }
            line.push(if matrix.get(col, row) { '1' } else { '0' });
        }
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Encode as raw PBM
pub fn write_pbm_raw<W: Write>(matrix: &BitMatrix, mut writer: W) -> Result<()> {
    write!(writer, "P4\n{} {}\n", matrix.width(), matrix.height())?;

    let mut packed = vec![0u8; matrix.width().div_ceil(8)];
    for row in 0..matrix.height() {
        packed.fill(0);
        for col in 0..matrix.width() {
            if matrix.get(col, row) {
                packed[col / 8] |= 0x80 >> (col % 8);
            }
        }
        writer.write_all(&packed)?;
    }
    writer.flush()?;
    Ok(())
}
