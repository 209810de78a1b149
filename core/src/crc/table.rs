//! crc/table.rs
//! Compile-time lookup tables for the portable CRC backend and the
//! exponentiation-by-squaring power table.

use crate::constants::crc_params::POLY;
use crate::crc::algebra::multiply;

/// The polynomial `x` in reflected bit order.
pub const X: u32 = 0x4000_0000;

/// Byte-at-a-time remainder table for the reflected polynomial.
pub const CRC_TABLE: [u32; 256] = build_crc_table();

/// `X_POW_2K[k] = x^(2^k) mod P`.
///
/// 32 entries suffice because exponents are reduced modulo the order of `x`
/// (`2^32 - 1`) before use.
pub const X_POW_2K: [u32; 32] = build_power_table();

const fn build_crc_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut c = i as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 { (c >> 1) ^ POLY } else { c >> 1 };
            k += 1;
        }
        table[i] = c;
        i += 1;
    }
    table
}

const fn build_power_table() -> [u32; 32] {
    let mut powers = [0u32; 32];
    powers[0] = X;
    let mut k = 1;
    while k < 32 {
        powers[k] = multiply(powers[k - 1], powers[k - 1]);
        k += 1;
    }
    powers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_reference_entries() {
        assert_eq!(CRC_TABLE[0], 0x0000_0000);
        assert_eq!(CRC_TABLE[1], 0x7707_3096);
        assert_eq!(CRC_TABLE[128], POLY);
        assert_eq!(CRC_TABLE[255], 0x2D02_EF8D);
    }

    #[test]
    fn low_powers_are_plain_shifts() {
        // x, x^2, x^4, x^8, x^16 need no reduction; x^32 reduces to P.
        assert_eq!(X_POW_2K[0], 0x4000_0000);
        assert_eq!(X_POW_2K[1], 0x2000_0000);
        assert_eq!(X_POW_2K[2], 0x0800_0000);
        assert_eq!(X_POW_2K[3], 0x0080_0000);
        assert_eq!(X_POW_2K[4], 0x0000_8000);
        assert_eq!(X_POW_2K[5], POLY);
    }
}
