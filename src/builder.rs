use log::debug;

use crate::ecc::{self, MAX_LEVEL};
use crate::error::{Pdf417Error, Result};
use crate::generators::PDF417Row;
use crate::high_level::{encode_high_level, CW_PADDING};
use crate::tables::{COLUMN_SEPARATOR, ROW_BREAK};

/// Minimum number of rows in a PDF417 barcode.
pub const MIN_ROWS: u8 = 3;
/// Maximum number of rows in a PDF417 barcode.
pub const MAX_ROWS: u8 = 90;
/// Minimum number of data columns in a PDF417 barcode.
pub const MIN_COLS: u8 = 1;
/// Maximum number of data columns in a PDF417 barcode.
pub const MAX_COLS: u8 = 30;
/// Maximum number of codewords (length descriptor, data, padding and error
/// correction) in a PDF417 barcode.
pub const MAX_CODEWORDS: usize = 928;

/// Encoding settings: the number of data columns and the error correction
/// level, picked from the data length when left unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoder {
    columns: u8,
    level: Option<u8>,
}

impl Encoder {
    pub const fn new(columns: u8) -> Self {
        Self { columns, level: None }
    }

    /// Requests a specific error correction level. The level can still be
    /// lowered if the symbol would not fit otherwise.
    pub const fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    /// Lets the encoder pick the level from the data length.
    pub const fn with_auto_level(mut self) -> Self {
        self.level = None;
        self
    }

    #[inline]
    pub const fn columns(&self) -> u8 {
        self.columns
    }

    #[inline]
    pub const fn level(&self) -> Option<u8> {
        self.level
    }

    fn validate(&self) -> Result<()> {
        if !(MIN_COLS..=MAX_COLS).contains(&self.columns) {
            return Err(Pdf417Error::InvalidColumnCount(self.columns));
        }
        match self.level {
            Some(level) if level > MAX_LEVEL => Err(Pdf417Error::InvalidErrorLevel(level)),
            _ => Ok(()),
        }
    }

    /// Encodes `data` to a PDF417 symbol and renders it.
    pub fn encode(&self, data: &str) -> Result<EncodingResult> {
        let symbol = self.seal(encode_high_level(data))?;
        Ok(EncodingResult::new(symbol))
    }

    /// Turns data codewords into a complete symbol: picks the level, pads the
    /// data, prepends the length descriptor and appends the error correction
    /// codewords.
    pub fn seal(&self, mut data: Vec<u16>) -> Result<PDF417> {
        self.validate()?;
        let cols = self.columns as usize;
        let (level, total) = self.fit(data.len())?;

        let padding = total - 1 - data.len() - ecc::ecc_count(level);
        data.resize(data.len() + padding, CW_PADDING);
        data.insert(0, data.len() as u16 + 1);
        ecc::generate_ecc(&mut data, level);

        let rows = (total / cols) as u8;
        debug!("symbol: {rows} rows, {cols} columns, level {level}, {padding} padding codewords");

        Ok(PDF417 { codewords: data, dimensions: (rows, self.columns), level, padding })
    }

    /// Finds the level to use and the resulting codeword count (whole rows,
    /// at least `MIN_ROWS`). Lowers the level until the symbol fits.
    fn fit(&self, data_len: usize) -> Result<(u8, usize)> {
        let cols = self.columns as usize;
        let mut level = self.level.unwrap_or_else(|| ecc::auto_level(data_len));
        debug!("{data_len} data codewords, starting at level {level}");

        loop {
            let used = 1 + data_len + ecc::ecc_count(level);
            let total = used.div_ceil(cols).max(MIN_ROWS as usize) * cols;

            if total <= MAX_CODEWORDS && total / cols <= MAX_ROWS as usize {
                return Ok((level, total));
            }
            if level == 0 {
                return Err(Pdf417Error::DataTooLong { columns: self.columns });
            }

            debug!("{total} codewords do not fit, lowering level {level}");
            level -= 1;
        }
    }
}

/// A sealed PDF417 symbol: length descriptor, data, padding and error
/// correction codewords laid out in rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PDF417 {
    codewords: Vec<u16>,
    dimensions: (u8, u8),
    level: u8,
    padding: usize,
}

impl PDF417 {
    /// Get the number of rows of the PDF417.
    #[inline]
    pub const fn rows(&self) -> u8 {
        self.dimensions.0
    }

    /// Get the number of data columns of the PDF417 (row indicators
    /// excluded).
    #[inline]
    pub const fn cols(&self) -> u8 {
        self.dimensions.1
    }

    #[inline]
    pub const fn level(&self) -> u8 {
        self.level
    }

    /// Number of padding codewords inserted after the data.
    #[inline]
    pub const fn padding(&self) -> usize {
        self.padding
    }

    pub fn codewords(&self) -> &[u16] {
        &self.codewords
    }

    pub fn iter(&self) -> impl Iterator<Item = PDF417Row<'_>> + '_ {
        let infos = PDF417Row::prepare(self.dimensions, self.level);
        self.codewords.chunks_exact(self.cols() as usize)
            .enumerate()
            .map(move |(row, codewords)| PDF417Row::new(codewords, row as u8, infos))
    }

    /// Renders the rows as glyph text, one line per row.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, row) in self.iter().enumerate() {
            if i > 0 {
                out.push(ROW_BREAK);
            }
            for (j, glyph) in row.enumerate() {
                if j > 0 {
                    out.push(COLUMN_SEPARATOR);
                }
                out.push_str(&glyph.to_string());
            }
        }
        out
    }
}

/// Result of [Encoder::encode]: the rendered glyph text and the symbol it
/// was rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingResult {
    text: String,
    symbol: PDF417,
}

impl EncodingResult {
    fn new(symbol: PDF417) -> Self {
        Self { text: symbol.render(), symbol }
    }

    /// The glyph text, rows separated by `'\n'`.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rows(&self) -> usize {
        self.symbol.rows() as usize
    }

    pub fn columns(&self) -> usize {
        self.symbol.cols() as usize
    }

    pub fn padding(&self) -> usize {
        self.symbol.padding()
    }

    /// Column count that would leave fewer padding codewords.
    pub fn suggested_columns(&self) -> usize {
        self.columns() - self.padding() / self.rows()
    }

    /// The error correction level used, after any lowering.
    pub fn level(&self) -> u8 {
        self.symbol.level()
    }

    /// All codewords, row by row: length descriptor, data, padding and error
    /// correction.
    pub fn codewords(&self) -> &[u16] {
        self.symbol.codewords()
    }

    pub fn symbol(&self) -> &PDF417 {
        &self.symbol
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
