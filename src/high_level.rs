//! User data to high level encoding conversion functions

use log::trace;

use crate::blocks::{Mode, Payload};
use crate::tables::{TB_LOWER, TB_MIXED, TB_PUNC, TB_UPPER, TEXT_TABLE};

use awint_core::{InlAwi, Bits};
type U160 = InlAwi<160, { Bits::unstable_raw_digits(160) }>;

/// Codeword used to latch to text mode
pub const M_LATCH_TEXT: u16 = 900;
/// Codeword used to latch to byte mode (if length is multiple of 6 use
/// M_LATCH_BYTE_M6).
pub const M_LATCH_BYTE: u16 = 901;
/// Codeword used to latch to numeric mode
pub const M_LATCH_NUMERIC: u16 = 902;

// 903 to 912: reserved for future use

/// Codeword used to switch to byte mode for next codedword (usable only if
/// the current mode is text).
pub const M_SHIFT_BYTE: u16 = 913;

/// Codeword used to latch to byte mode when the byte count is a multiple of 6.
pub const M_LATCH_BYTE_M6: u16 = 924;

/// Codeword used as padding at the end of the data section
pub const CW_PADDING: u16 = M_LATCH_TEXT;

/// Maximum number of digits converted to base 900 at once.
pub const NUMERIC_CHUNK: usize = 44;

// Text sub-table switches
const SW_LOWER: u8 = 27; // ll from upper and mixed, as (shift upper) from lower
const SW_MIXED: u8 = 28; // ml from upper and lower, al from mixed
const SW_PUNC: u8 = 25; // pl from mixed
const SW_SHIFT_PUNC: u8 = 29; // ps from upper, lower and mixed, al from punc
const SW_PAD: u8 = 29;

/// Encodes `data` to data codewords: blocks are classified, optimized then
/// compacted. The length descriptor and padding are not included.
pub fn encode_high_level(data: &str) -> Vec<u16> {
    let payload = Payload::new(data);
    let mut encoder = PDF417Encoder::new();

    for (i, (block, bytes)) in payload.segments().enumerate() {
        encoder = match block.mode {
            // text is the initial mode, only latch back to it
            Mode::Text if i == 0 => encoder.append_text(bytes),
            Mode::Text => encoder.append_codeword(M_LATCH_TEXT).append_text(bytes),
            Mode::Numeric => encoder.append_numeric(bytes),
            Mode::Binary => encoder.append_bytes(bytes),
        };
    }

    let codewords = encoder.finish();
    trace!("data codewords: {codewords:?}");
    codewords
}

/// Use a PDF417Encoder to encode your data segments to a list of codewords.
#[derive(Debug, Clone)]
pub struct PDF417Encoder {
    storage: Vec<u16>,
    /// Compaction mode the reader is in after the last segment.
    last_mode: Mode,
}

impl Default for PDF417Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PDF417Encoder {
    pub fn new() -> Self {
        Self { storage: Vec::new(), last_mode: Mode::Text }
    }

    /// Appends a numeric segment. `digits` must only contain ASCII digits.
    /// The digits are cut in chunks of 44, each prefixed with a `1` and
    /// converted to base 900, most significant codeword first.
    pub fn append_numeric(mut self, digits: &[u8]) -> Self {
        debug_assert!(digits.iter().all(u8::is_ascii_digit));
        self.storage.push(M_LATCH_NUMERIC);
        self.last_mode = Mode::Numeric;

        let mut chunk = Vec::with_capacity(NUMERIC_CHUNK + 1);
        for part in digits.chunks(NUMERIC_CHUNK) {
            chunk.clear();
            chunk.push(b'1');
            chunk.extend_from_slice(part);

            let mut b = U160::zero();
            let mut p0 = U160::zero();
            let mut p1 = U160::zero();
            b.bytes_radix_(None, &chunk, 10, &mut p0, &mut p1)
                .expect("45 digits base 10 should fit in 160 bits");

            let start = self.storage.len();
            while !b.is_zero() {
                let r = b.digit_udivide_inplace_(900).expect("900 > 0");
                self.storage.push(r as u16);
            }
            self.storage[start..].reverse();
        }

        self
    }

    /// Appends a bytes segment. A single byte is shifted to from text mode,
    /// otherwise the segment latches to byte mode: six bytes become five
    /// codewords, the trailing ones are appended as is.
    pub fn append_bytes(mut self, bytes: &[u8]) -> Self {
        // the byte shift is only valid in text mode
        if bytes.len() == 1 && self.last_mode == Mode::Text {
            self.storage.push(M_SHIFT_BYTE);
            self.storage.push(bytes[0] as u16);
            return self;
        }

        self.last_mode = Mode::Binary;
        self.storage.push(if bytes.len() % 6 == 0 { M_LATCH_BYTE_M6 } else { M_LATCH_BYTE });

        let mut groups = bytes.chunks_exact(6);
        for group in &mut groups {
            // pack six bytes
            let mut s: u64 = 0;
            for &b in group {
                s = (s << 8) + b as u64;
            }
            // append five codewords
            let mut cws = [0u16; 5];
            for n in 0..5 {
                cws[4 - n] = (s % 900) as u16;
                s /= 900;
            }
            self.storage.extend_from_slice(&cws);
        }

        // remaining
        self.storage.extend(groups.remainder().iter().map(|&b| b as u16));
        self
    }

    /// Appends a text segment using the sub-table based compaction. Every
    /// byte must be in the text compaction set (tab, CR, LF and printable
    /// ASCII). The segment always starts in the upper case sub-table.
    pub fn append_text(mut self, s: &[u8]) -> Self {
        let chars: Vec<(u8, u8)> = s.iter().map(|&c| TEXT_TABLE[c as usize & 0x7F]).collect();
        debug_assert!(chars.iter().all(|&(tables, _)| tables != 0), "not a text segment");
        self.last_mode = Mode::Text;

        let mut codes: Vec<u8> = Vec::with_capacity(s.len() * 2);
        let mut table = TB_UPPER;

        for (k, &(tables, value)) in chars.iter().enumerate() {
            if tables & table != 0 {
                codes.push(value);
                continue;
            }

            // tables shared with the next char, if any
            let common = chars.get(k + 1).map_or(0, |&(next, _)| tables & next);

            if common == 0 {
                // the switch only serves this char, shift if possible
                if tables & TB_UPPER != 0 && table == TB_LOWER {
                    codes.extend_from_slice(&[SW_LOWER, value]);
                    continue;
                } else if tables & TB_PUNC != 0 {
                    codes.extend_from_slice(&[SW_SHIFT_PUNC, value]);
                    continue;
                }
            }

            let candidates = if common == 0 { tables } else { common };
            // keep the first table when several are possible
            let next = candidates & candidates.wrapping_neg();

            codes.extend_from_slice(latch(table, next));
            table = next;
            codes.push(value);
        }

        if codes.len() % 2 != 0 {
            codes.push(SW_PAD);
        }

        self.storage.extend(codes.chunks_exact(2).map(|p| p[0] as u16 * 30 + p[1] as u16));
        self
    }

    /// Append a single codeword.
    pub fn append_codeword(mut self, codeword: u16) -> Self {
        self.storage.push(codeword);
        self
    }

    /// Returns the data codewords.
    pub fn finish(self) -> Vec<u16> {
        self.storage
    }
}

/// Codes latching from sub-table `from` to sub-table `to`.
const fn latch(from: u8, to: u8) -> &'static [u8] {
    match (from, to) {
        (TB_UPPER, TB_LOWER) | (TB_MIXED, TB_LOWER) => &[SW_LOWER],
        (TB_UPPER, TB_PUNC) | (TB_LOWER, TB_PUNC) => &[SW_MIXED, SW_PUNC],
        (TB_LOWER, TB_UPPER) => &[SW_MIXED, SW_MIXED],
        (TB_MIXED, TB_PUNC) => &[SW_PUNC],
        (TB_PUNC, TB_UPPER) => &[SW_SHIFT_PUNC],
        (TB_PUNC, TB_LOWER) => &[SW_SHIFT_PUNC, SW_LOWER],
        (TB_PUNC, TB_MIXED) => &[SW_SHIFT_PUNC, SW_MIXED],
        _ => &[SW_MIXED],
    }
}

#[cfg(test)]
mod tests {
    use super::{encode_high_level, PDF417Encoder};

    #[test]
    fn test_encode_text_simple() {
        let cws = PDF417Encoder::new().append_text(b"Test").finish();
        assert_eq!(cws, [19 * 30 + 27, 4 * 30 + 18, 19 * 30 + 29]);
    }

    #[test]
    fn test_encode_text_shift_upper() {
        // a lone upper case char in lower case is shifted
        let cws = PDF417Encoder::new().append_text(b"abCd").finish();
        assert_eq!(cws, [27 * 30 + 0, 1 * 30 + 27, 2 * 30 + 3]);
    }

    #[test]
    fn test_encode_text_latch_back_upper() {
        let cws = PDF417Encoder::new().append_text(b"aBC").finish();
        assert_eq!(cws, [27 * 30 + 0, 28 * 30 + 28, 1 * 30 + 2]);
    }

    #[test]
    fn test_encode_text_mixed() {
        // digits and '&' live in the mixed table, space is shared
        let cws = PDF417Encoder::new().append_text(b"A1 2&").finish();
        assert_eq!(cws, [0 * 30 + 28, 1 * 30 + 26, 2 * 30 + 10]);
    }

    #[test]
    fn test_encode_text_punc_shift_and_latch() {
        let cws = PDF417Encoder::new().append_text(b"A!B").finish();
        assert_eq!(cws, [0 * 30 + 29, 10 * 30 + 1]);

        let cws = PDF417Encoder::new().append_text(b"A!?B").finish();
        assert_eq!(cws, [0 * 30 + 28, 25 * 30 + 10, 25 * 30 + 29, 1 * 30 + 29]);
    }

    #[test]
    fn test_encode_text_control_chars() {
        let cws = PDF417Encoder::new().append_text(b"\t\r\n").finish();
        // tab and CR: mixed, LF: punctuation only
        assert_eq!(cws, [28 * 30 + 12, 11 * 30 + 29, 15 * 30 + 29]);
    }

    #[test]
    fn test_encode_numeric() {
        let cws = PDF417Encoder::new().append_numeric(b"12345678987654321").finish();
        assert_eq!(cws, [902, 190, 232, 499, 20, 504, 721]);
    }

    #[test]
    fn test_encode_numeric_big() {
        let cws = PDF417Encoder::new()
            //               [                        p1                 ][ p2 ]
            .append_numeric(b"123456789876543211234567898765432112345678987654321")
            .finish();
        assert_eq!(cws, [902, 491, 81, 137, 725, 651, 455, 511, 858, 135, 138, 488, 568, 447, 553, 198, /* p2 */ 21, 715, 821]);
    }

    #[test]
    fn test_encode_numeric_single_latch() {
        let digits = [b'7'; 100];
        let cws = PDF417Encoder::new().append_numeric(&digits).finish();
        assert_eq!(cws.iter().filter(|&&cw| cw == 902).count(), 1);
        // chunks of 44, 44 and 12 digits
        assert_eq!(cws.len(), 1 + 15 + 15 + 5);
    }

    #[test]
    fn test_encode_bytes_multiple() {
        let cws = PDF417Encoder::new().append_bytes(b"alcool").finish();
        assert_eq!(cws, [924, 163, 238, 432, 766, 244]);
    }

    #[test]
    fn test_encode_bytes_not_multiple() {
        let cws = PDF417Encoder::new().append_bytes(b"encode bin").finish();
        assert_eq!(cws, [901, 169, 883, 224, 680, 517, 32, 98, 105, 110]);
    }

    #[test]
    fn test_encode_single_byte() {
        let cws = PDF417Encoder::new().append_bytes(&[0x1B]).finish();
        assert_eq!(cws, [913, 0x1B]);
    }

    #[test]
    fn test_high_level_single_binary_char() {
        assert_eq!(encode_high_level("\x1B"), [913, 0x1B]);
        assert_eq!(encode_high_level("\u{00E9}"), [913, 0xE9]);
    }

    #[test]
    fn test_single_byte_after_numeric() {
        // no byte shift out of numeric mode, latch instead
        assert_eq!(encode_high_level("12\x01"), [902, 112, 901, 1]);
        let cws = PDF417Encoder::new().append_numeric(b"12").append_bytes(&[1]).finish();
        assert_eq!(cws, [902, 112, 901, 1]);
        // back in text mode the shift is used again
        let cws = PDF417Encoder::new().append_numeric(b"12").append_codeword(900).append_text(b"A").append_bytes(&[1]).finish();
        assert_eq!(cws, [902, 112, 900, 0 * 30 + 29, 913, 1]);
    }

    #[test]
    fn test_high_level_digit_after_binary() {
        // the lone digit joins the byte block
        assert_eq!(encode_high_level("\x01\x021AB"), [901, 1, 2, b'1' as u16, 900, 0 * 30 + 1]);
    }

    #[test]
    fn test_high_level_merged_text() {
        assert_eq!(encode_high_level("AB12CD"), PDF417Encoder::new().append_text(b"AB12CD").finish());
    }

    #[test]
    fn test_high_level_latches() {
        let cws = encode_high_level("Test12345678\x01\x02num");
        let expected = PDF417Encoder::new()
            .append_text(b"Test")
            .append_numeric(b"12345678")
            .append_bytes(&[1, 2])
            .append_codeword(900)
            .append_text(b"num")
            .finish();
        assert_eq!(cws, expected);
        assert_eq!(&cws[..4], [19 * 30 + 27, 4 * 30 + 18, 19 * 30 + 29, 902]);
    }

    #[test]
    fn test_high_level_empty() {
        assert!(encode_high_level("").is_empty());
    }
}
