use crate::tables::*;

/// Highest error correction level.
pub const MAX_LEVEL: u8 = 8;

/// Data codeword count up to which each level is picked automatically.
const LEVEL_THRESHOLDS: [usize; 9] = [0, 2, 6, 14, 30, 62, 126, 254, 510];

pub const fn ecc_count(level: u8) -> usize {
    assert!(level <= MAX_LEVEL, "ECC level must be between 0 and 8 inclusive");
    1 << (level as usize + 1)
}

/// Lowest level whose threshold covers `data_len` data codewords, the highest
/// level past the last threshold.
pub fn auto_level(data_len: usize) -> u8 {
    LEVEL_THRESHOLDS.iter()
        .position(|&threshold| data_len <= threshold)
        .map_or(MAX_LEVEL, |level| level as u8)
}

pub const fn factors(level: u8) -> &'static [u16] {
    match level {
        0 => &ECC_L0,
        1 => &ECC_L1,
        2 => &ECC_L2,
        3 => &ECC_L3,
        4 => &ECC_L4,
        5 => &ECC_L5,
        6 => &ECC_L6,
        7 => &ECC_L7,
        8 => &ECC_L8,
        _ => panic!("ECC level must be between 0 and 8 inclusive"),
    }
}

/// Computes the error correction codewords of `data` (length descriptor
/// included) and appends them.
pub fn generate_ecc(codewords: &mut Vec<u16>, level: u8) {
    let factors = factors(level);
    let k = factors.len();
    let mut ecc = vec![0u16; k];

    for &cw in codewords.iter() {
        let t = (cw as usize + ecc[0] as usize) % 929;

        for i in (0..k).rev() {
            let factor = ((t * factors[i] as usize) % 929) as u16;
            let d = if i > 0 { ecc[k - i] } else { 0 };
            ecc[k - 1 - i] = (d + 929 - factor) % 929;
        }
    }

    for e in ecc.iter_mut() {
        if *e != 0 {
            *e = 929 - *e;
        }
    }

    codewords.extend_from_slice(&ecc);
}
