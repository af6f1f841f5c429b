use core::fmt;

use crate::tables::{CLUSTER_GLYPHS, START_GLYPH, STOP_GLYPH};

/// One element of a rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Start,
    /// A codeword drawn with the alphabet of the given cluster (0, 1 or 2).
    Codeword { cluster: u8, value: u16 },
    Stop,
}

impl Glyph {
    pub const fn codeword(cluster: u8, value: u16) -> Self {
        debug_assert!(cluster < 3 && value < 929);
        Glyph::Codeword { cluster, value }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Glyph::Start => f.write_str(START_GLYPH),
            Glyph::Stop => f.write_str(STOP_GLYPH),
            Glyph::Codeword { cluster, value } => {
                let alphabet = &CLUSTER_GLYPHS[cluster as usize];
                let value = value as usize;
                for digit in [value / 100, value / 10 % 10, value % 10] {
                    fmt::Write::write_char(f, alphabet[digit])?;
                }
                Ok(())
            }
        }
    }
}
