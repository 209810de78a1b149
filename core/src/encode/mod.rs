//! encode/mod.rs
//! yEnc encoding: escaped, line-wrapped text from raw bytes.
//!
//! The column is the only cross-chunk state; thread it through successive
//! calls of one stream to get output identical to a single whole-input call.

pub mod types;
pub mod scalar;
pub mod encoder;

pub use types::*;
pub use encoder::{Encoder, EncodeStream};

use crate::constants::DEFAULT_LINE_SIZE;
use crate::encode::scalar::{encode_scalar, EncodeParams};

/// Encode a complete buffer with the default line size.
pub fn encode(data: &[u8]) -> Vec<u8> {
    encode_ex(data, DEFAULT_LINE_SIZE, 0, true).data
}

/// Encode one chunk of a stream resuming at `column`.
pub fn encode_ex(data: &[u8], line_size: usize, column: usize, is_end: bool) -> EncodeResult {
    let params = EncodeParams { line_size, escape_whitespace: false };
    let mut out = Vec::new();
    let column = encode_scalar(data, &mut out, &params, column, is_end);
    EncodeResult { data: out, column }
}

/// Safe output buffer capacity for `length` input bytes. Not tight.
#[inline]
pub fn encode_max_length(length: usize, line_size: usize) -> usize {
    scalar::max_length(length, line_size)
}
