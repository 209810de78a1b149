//! crc/compute.rs
//! CRC-32 over byte slices. Both backends continue from a previous CRC value:
//! `crc(b"", init) == init`.

use crate::crc::table::CRC_TABLE;

/// Portable table-driven backend.
pub fn crc32_table(init: u32, data: &[u8]) -> u32 {
    let mut crc = !init;
    for &b in data {
        crc = CRC_TABLE[((crc ^ b as u32) & 0xFF) as usize] ^ (crc >> 8);
    }
    !crc
}

/// Hardware-assisted backend (PCLMULQDQ on x86, CRC32 instructions on ARMv8),
/// falling back to crc32fast's own portable path when unavailable.
pub fn crc32_accelerated(init: u32, data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new_with_initial(init);
    hasher.update(data);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_value() {
        assert_eq!(crc32_table(0, b"123456789"), 0xCBF4_3926);
        assert_eq!(crc32_accelerated(0, b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn empty_input_returns_seed() {
        assert_eq!(crc32_table(0xABCD_EF01, b""), 0xABCD_EF01);
        assert_eq!(crc32_accelerated(0xABCD_EF01, b""), 0xABCD_EF01);
    }

    #[test]
    fn seed_continues_computation() {
        let data = b"hello world";
        let first = crc32_table(0, &data[..5]);
        assert_eq!(crc32_table(first, &data[5..]), crc32_table(0, data));
    }
}
