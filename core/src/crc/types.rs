use thiserror::Error;

/// Checksum verification and CRC composition errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrcError {
    /// Declared and computed CRC differ.
    #[error("crc32 mismatch: expected {expected:08x}, computed {actual:08x}")]
    Mismatch {
        /// CRC declared by the sender.
        expected: u32,
        /// CRC computed over the received bytes.
        actual: u32,
    },

    /// Not every byte of the file has been accounted for.
    #[error("incomplete coverage: {covered} of {total} bytes")]
    Incomplete {
        covered: u64,
        total: u64,
    },

    /// A part claims bytes already claimed by another part.
    #[error("part at offset {offset} (len {length}) overlaps an existing part")]
    Overlap {
        offset: u64,
        length: u64,
    },

    /// A part extends past the end of the file.
    #[error("part at offset {offset} (len {length}) exceeds total size {total}")]
    OutOfRange {
        offset: u64,
        length: u64,
        total: u64,
    },
}
