//! Constant tables: error correction factors, the text compaction character
//! table and the glyph alphabets used to render codewords.

/// Computes the coefficients of the generator polynomial
/// `(x - 3)(x - 3^2)...(x - 3^N)` modulo 929, lowest degree first. The leading
/// coefficient (always 1) is not stored.
const fn ecc_factors<const N: usize>() -> [u16; N] {
    let mut poly = [0u32; N];
    let mut root = 1u32;
    let mut degree = 0;

    while degree < N {
        root = root * 3 % 929;
        poly[degree] = 1;

        let mut j = degree + 1;
        while j > 0 {
            j -= 1;
            let prev = if j > 0 { poly[j - 1] } else { 0 };
            poly[j] = (prev + 929 - root * poly[j] % 929) % 929;
        }
        degree += 1;
    }

    let mut factors = [0u16; N];
    let mut i = 0;
    while i < N {
        factors[i] = poly[i] as u16;
        i += 1;
    }
    factors
}

pub const ECC_L0: [u16; 2] = ecc_factors::<2>();
pub const ECC_L1: [u16; 4] = ecc_factors::<4>();
pub const ECC_L2: [u16; 8] = ecc_factors::<8>();
pub const ECC_L3: [u16; 16] = ecc_factors::<16>();
pub const ECC_L4: [u16; 32] = ecc_factors::<32>();
pub const ECC_L5: [u16; 64] = ecc_factors::<64>();
pub const ECC_L6: [u16; 128] = ecc_factors::<128>();
pub const ECC_L7: [u16; 256] = ecc_factors::<256>();
pub const ECC_L8: [u16; 512] = ecc_factors::<512>();

/// Text compaction sub-tables, used as bit flags.
pub const TB_UPPER: u8 = 1;
pub const TB_LOWER: u8 = 2;
pub const TB_MIXED: u8 = 4;
pub const TB_PUNC: u8 = 8;

/// Mixed sub-table entries from value 10 onwards (0-9 are the digits).
const MIXED_CHAR_SET: [u8; 15] = [
    b'&', b'\r', b'\t', b',', b':', b'#', b'-', b'.', b'$', b'/', b'+', b'%', b'*', b'=', b'^'
];
const PUNC_CHAR_SET: [u8; 29] = [
    b';', b'<', b'>', b'@', b'[', b'\\', b']', b'_', b'`', b'~', b'!', b'\r', b'\t',
    b',', b':', b'\n', b'-', b'.', b'$', b'/', b'"', b'|', b'*', b'(', b')', b'?',
    b'{', b'}', b'\''
];

/// Characters shared by the mixed and punctuation sub-tables sit at the same
/// value in both, so a single value per character is enough.
const fn text_table() -> [(u8, u8); 128] {
    let mut table = [(0u8, 0u8); 128];

    let mut c = 0;
    while c < 26 {
        table[b'A' as usize + c] = (TB_UPPER, c as u8);
        table[b'a' as usize + c] = (TB_LOWER, c as u8);
        c += 1;
    }

    let mut d = 0;
    while d < 10 {
        table[b'0' as usize + d] = (TB_MIXED, d as u8);
        d += 1;
    }

    table[b' ' as usize] = (TB_UPPER | TB_LOWER | TB_MIXED, 26);

    let mut p = 0;
    while p < MIXED_CHAR_SET.len() {
        table[MIXED_CHAR_SET[p] as usize] = (TB_MIXED, p as u8 + 10);
        p += 1;
    }

    p = 0;
    while p < PUNC_CHAR_SET.len() {
        let c = PUNC_CHAR_SET[p] as usize;
        table[c].0 |= TB_PUNC;
        table[c].1 = p as u8;
        p += 1;
    }

    table
}

/// `(sub-table flags, value)` for every 7-bit character. Characters outside
/// the text compaction set have no flag set.
pub const TEXT_TABLE: [(u8, u8); 128] = text_table();

/// Per cluster alphabet. A codeword is written as its three decimal digits
/// mapped through the alphabet of the cluster of its row.
pub const CLUSTER_GLYPHS: [[char; 10]; 3] = [
    ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'],
    ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J'],
    ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j'],
];

pub const START_GLYPH: &str = "<<<";
pub const STOP_GLYPH: &str = ">>>";
pub const COLUMN_SEPARATOR: char = ' ';
pub const ROW_BREAK: char = '\n';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ecc_factors_low_levels() {
        assert_eq!(ECC_L0, [27, 917]);
        assert_eq!(ECC_L1, [522, 568, 723, 809]);
        assert_eq!(ECC_L2, [237, 308, 436, 284, 646, 653, 428, 379]);
    }

    #[test]
    fn test_ecc_factors_high_levels() {
        assert_eq!(ECC_L5[..8], [539, 422, 6, 93, 862, 771, 453, 106]);
        assert_eq!(ECC_L5[56..], [840, 629, 4, 381, 843, 623, 264, 543]);
        assert_eq!(ECC_L6[..8], [521, 310, 864, 547, 858, 580, 296, 379]);
        assert_eq!(ECC_L6[120..], [834, 315, 550, 86, 801, 4, 108, 539]);
        assert_eq!(ECC_L7[..8], [524, 894, 75, 766, 882, 857, 74, 204]);
        assert_eq!(ECC_L7[248..], [307, 159, 924, 558, 648, 55, 497, 10]);
        assert_eq!(ECC_L8[..8], [352, 77, 373, 504, 35, 599, 428, 207]);
        assert_eq!(ECC_L8[504..], [675, 410, 389, 244, 31, 121, 303, 263]);
    }

    #[test]
    fn test_ecc_factors_in_range() {
        assert!(ECC_L8.iter().all(|&f| f < 929));
        assert!(ECC_L5.iter().all(|&f| f < 929));
    }

    #[test]
    fn test_text_table_shared_entries() {
        assert_eq!(TEXT_TABLE[b'\t' as usize], (TB_MIXED | TB_PUNC, 12));
        assert_eq!(TEXT_TABLE[b'\r' as usize], (TB_MIXED | TB_PUNC, 11));
        assert_eq!(TEXT_TABLE[b'\n' as usize], (TB_PUNC, 15));
        assert_eq!(TEXT_TABLE[b'*' as usize], (TB_MIXED | TB_PUNC, 22));
        assert_eq!(TEXT_TABLE[b'#' as usize], (TB_MIXED, 15));
        assert_eq!(TEXT_TABLE[b' ' as usize], (TB_UPPER | TB_LOWER | TB_MIXED, 26));
        assert_eq!(TEXT_TABLE[b'\'' as usize], (TB_PUNC, 28));
    }

    #[test]
    fn test_text_table_covers_printable() {
        for c in 32..127 {
            assert_ne!(TEXT_TABLE[c].0, 0, "char {c} has no sub-table");
        }
        assert_eq!(TEXT_TABLE[0x1B].0, 0);
    }
}
