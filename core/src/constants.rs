//! constants.rs
//! Wire-level constants shared by the encoder, decoder, CRC engine and article framing.

/// Default encoded line length (characters before the CRLF).
pub const DEFAULT_LINE_SIZE: usize = 128;
/// Upper bound on the line length accepted by the article layer (yEnc 1.3).
pub const MAX_LINE_SIZE: usize = 997;
/// Default raw bytes per part when splitting a file into multi-part articles.
pub const DEFAULT_PART_SIZE: usize = 716_800;

/// Escape marker (`=`).
pub const ESCAPE: u8 = b'=';
/// Offset added to every raw byte.
pub const OFFSET: u8 = 42;
/// Extra offset applied to an escaped byte.
pub const ESCAPE_OFFSET: u8 = 64;

pub const NUL: u8 = 0x00;
pub const LF: u8 = b'\n';
pub const CR: u8 = b'\r';
pub const DOT: u8 = b'.';
pub const TAB: u8 = b'\t';
pub const SPACE: u8 = b' ';

/// Bytes that must never appear unescaped in the encoded stream.
pub const CRITICAL: [u8; 4] = [NUL, LF, CR, ESCAPE];

/// Line terminator used for every emitted line.
pub const CRLF: &[u8; 2] = b"\r\n";

/// Keywords of the framing lines.
pub mod keywords {
    pub const YBEGIN: &str = "=ybegin";
    pub const YPART: &str = "=ypart";
    pub const YEND: &str = "=yend";
}

/// CRC-32 (IEEE 802.3), reflected.
pub mod crc_params {
    /// Reflected generator polynomial.
    pub const POLY: u32 = 0xEDB8_8320;
    /// Multiplicative order of `x` modulo the generator.
    pub const X_ORDER: u64 = 0xFFFF_FFFF;
    /// The polynomial `1` in reflected bit order.
    pub const ONE: u32 = 0x8000_0000;
}
