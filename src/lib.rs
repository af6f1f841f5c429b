//! PDF417 encoder producing glyph text.
//!
//! The input text is split into text, numeric and byte blocks, short blocks
//! are merged into their neighbours, each block is compacted to codewords,
//! then the symbol is padded, protected with error correction codewords and
//! rendered row by row.
//!
//! ```
//! let result = pdf417_text::encode("Hello, PDF417!", 4, None).unwrap();
//! assert_eq!(pdf417_text::count_rows(result.text()), result.rows());
//! ```

mod tables;
pub mod blocks;
pub mod builder;
pub mod ecc;
pub mod error;
pub mod generators;
pub mod high_level;

pub use builder::{Encoder, EncodingResult, PDF417, MAX_CODEWORDS, MAX_COLS, MAX_ROWS, MIN_COLS, MIN_ROWS};
pub use error::{Pdf417Error, Result};
pub use high_level::{encode_high_level, PDF417Encoder};

use tables::ROW_BREAK;

/// Encodes `data` on `columns` data columns. Pass `None` as `level` to pick
/// the error correction level from the data length.
pub fn encode(data: &str, columns: u8, level: Option<u8>) -> Result<EncodingResult> {
    let encoder = match level {
        Some(level) => Encoder::new(columns).with_level(level),
        None => Encoder::new(columns),
    };
    encoder.encode(data)
}

/// Number of rows in a rendered glyph text.
pub fn count_rows(text: &str) -> usize {
    text.matches(ROW_BREAK).count() + 1
}
