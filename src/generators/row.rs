use core::iter;

use crate::generators::glyph::Glyph;

#[derive(Clone)]
#[repr(u8)]
enum RowPattern {
    Start,
    Left,
    Data,
    Right,
    End,
    None,
}

/// Values shared by the row indicators of a symbol: `(rows, cols, level)`
/// as encoded in the left and right indicator codewords.
pub type Indicators = (u8, u8, u8);

/// Iterator over the glyphs of a single row: start pattern, left row
/// indicator, data codewords, right row indicator and stop pattern.
#[derive(Clone)]
pub struct PDF417Row<'a> {
    codewords: &'a [u16],
    next_pat: RowPattern,
    cluster: u8,
    /// (left, right)
    markers: (u16, u16)
}

impl<'a> PDF417Row<'a> {
    pub fn new(codewords: &'a [u16], row: u8, infos: Indicators) -> Self {
        let (rows_val, cols_val, level_val) = infos;
        let cluster = row % 3;
        let row_id = (row / 3) as u16 * 30;

        let (left, right) = match cluster {
            0 => (rows_val, cols_val),
            1 => (level_val, rows_val),
            2 => (cols_val, level_val),
            _ => unreachable!()
        };
        Self {
            codewords,
            cluster,
            markers: (left as u16 + row_id, right as u16 + row_id),
            next_pat: RowPattern::Start
        }
    }

    pub const fn prepare((rows, cols): (u8, u8), level: u8) -> Indicators {
        let rows_val = (rows - 1) / 3;
        let cols_val = cols - 1;
        let level_val = level * 3 + (rows - 1) % 3;
        (rows_val, cols_val, level_val)
    }

    /// Left and right row indicator codewords.
    pub const fn markers(&self) -> (u16, u16) {
        self.markers
    }
}

impl<'a> iter::Iterator for PDF417Row<'a> {
    type Item = Glyph;

    fn next(&mut self) -> Option<Self::Item> {
        let (item, next) = match self.next_pat {
            RowPattern::Start => (Some(Glyph::Start), RowPattern::Left),
            RowPattern::Left => {
                let next = if self.codewords.is_empty() { RowPattern::Right } else { RowPattern::Data };
                (Some(Glyph::codeword(self.cluster, self.markers.0)), next)
            },
            RowPattern::Data => {
                let cw = self.codewords[0];
                self.codewords = &self.codewords[1..];

                let next = if self.codewords.is_empty() { RowPattern::Right } else { RowPattern::Data };

                (Some(Glyph::codeword(self.cluster, cw)), next)
            },
            RowPattern::Right => (Some(Glyph::codeword(self.cluster, self.markers.1)), RowPattern::End),
            RowPattern::End => (Some(Glyph::Stop), RowPattern::None),
            RowPattern::None => (None, RowPattern::None)
        };

        self.next_pat = next;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.codewords.len() + match self.next_pat {
            RowPattern::Start => 4,
            RowPattern::Left  => 3,
            RowPattern::Data  => 2,
            RowPattern::Right => 2,
            RowPattern::End   => 1,
            RowPattern::None  => 0,
        };
        (count, Some(count))
    }
}

impl<'a> ExactSizeIterator for PDF417Row<'a> {}
impl<'a> iter::FusedIterator for PDF417Row<'a> {}
