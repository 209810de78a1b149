//! decode/mod.rs
//! yEnc decoding and terminator detection.
//!
//! The decoder state is the only cross-chunk context. It is a plain value
//! (`DecoderState`), so it can be stored, compared and restored freely.

pub mod types;
pub mod scalar;
pub mod decoder;

pub use types::*;
pub use decoder::{Decoder, DecodeStream};

use crate::decode::scalar::{decode_scalar, DecodeMode};

/// Decode a complete, dot-stuffed buffer from line start.
pub fn decode(data: &[u8]) -> Vec<u8> {
    decode_ex(data, false, DecoderState::Crlf).data
}

/// Bounded decode resuming from `state`. `is_raw` disables dot-unstuffing.
pub fn decode_ex(data: &[u8], is_raw: bool, state: DecoderState) -> DecodeResult {
    let mut out = Vec::new();
    let step = decode_scalar(data, &mut out, state, DecodeMode::bounded(is_raw));
    DecodeResult { data: out, state: step.state }
}

/// Decode until the end of `data` or the first `\r\n.\r\n` / `\r\n=y`.
pub fn decode_incremental(data: &[u8], state: DecoderState) -> IncrementalDecodeResult {
    let mut out = Vec::new();
    let step = decode_scalar(data, &mut out, state, DecodeMode::incremental());
    IncrementalDecodeResult {
        data: out,
        end: step.end,
        state: step.state,
        bytes_consumed: step.consumed,
    }
}
