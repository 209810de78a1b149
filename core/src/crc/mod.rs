//! crc/mod.rs
//! CRC-32 (IEEE 802.3, reflected, poly 0xEDB88320) engine and algebra.
//!
//! Industry notes:
//! - `combine` lets a downloader verify a multi-part file from per-part CRCs
//!   without touching the payload again (zlib `crc32_combine` semantics).
//! - `zeros`/`unzero` move a CRC across runs of zero bytes, useful for sparse
//!   or pre-allocated regions.
//! - `two_pow`/`two_fifty_six_pow` expose the multipliers so callers combining
//!   many fixed-size blocks can compute them once and reuse via `multiply`.

pub mod algebra;
pub mod compute;
pub mod engine;
pub mod table;
pub mod types;
pub mod verify;

pub use algebra::{combine, multiply, two_fifty_six_pow, two_pow, unzero, zeros};
pub use engine::CrcEngine;
pub use types::CrcError;
pub use verify::FileCrcVerifier;

/// CRC-32 of `data`, continuing from `init` (`0` starts a fresh checksum).
#[inline]
pub fn crc32(data: &[u8], init: u32) -> u32 {
    if data.is_empty() {
        return init;
    }
    compute::crc32_accelerated(init, data)
}

/// Lowercase, zero-padded 8-digit rendering used on the `=yend` line.
#[inline]
pub fn to_hex(crc: u32) -> String {
    format!("{:08x}", crc)
}
