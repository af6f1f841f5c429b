//! Error type returned by the encoder.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Pdf417Error {
    /// No error correction level keeps the symbol within 928 codewords and
    /// 90 rows. Retry with more columns.
    #[error("data too long for {columns} columns, try a larger column count")]
    DataTooLong { columns: u8 },

    #[error("invalid column count {0}, expected 1 to 30")]
    InvalidColumnCount(u8),

    #[error("invalid error correction level {0}, expected 0 to 8")]
    InvalidErrorLevel(u8),
}

pub type Result<T> = core::result::Result<T, Pdf417Error>;
