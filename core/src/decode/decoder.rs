//! decode/decoder.rs
//! Decoder bound to a resolved backend, plus a stream wrapper that carries the
//! decoder state and running CRC between chunks.

use crate::crc::CrcEngine;
use crate::decode::scalar::DecodeMode;
use crate::decode::types::{DecodeResult, DecoderEnd, DecoderState, IncrementalDecodeResult};
use crate::kernel::{DecodeFn, Kernel, KernelContext};
use crate::recovery::DecodeCheckpoint;

#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    ctx: KernelContext,
    decode_fn: DecodeFn,
}

impl Decoder {
    pub fn new(ctx: &KernelContext) -> Self {
        Self {
            ctx: *ctx,
            decode_fn: ctx.decode_fn(),
        }
    }

    #[inline]
    pub fn kernel(&self) -> Kernel {
        self.ctx.decode_kernel()
    }

    /// Decode a whole buffer. `is_raw` disables dot-unstuffing.
    pub fn decode(&self, data: &[u8], is_raw: bool, state: DecoderState) -> DecodeResult {
        let mut out = Vec::new();
        let step = (self.decode_fn)(data, &mut out, state, DecodeMode::bounded(is_raw));
        DecodeResult { data: out, state: step.state }
    }

    /// Decode until the end of `data` or the first terminator.
    pub fn decode_incremental(&self, data: &[u8], state: DecoderState) -> IncrementalDecodeResult {
        let mut out = Vec::new();
        let step = (self.decode_fn)(data, &mut out, state, DecodeMode::incremental());
        if step.end.is_end() {
            tracing::trace!(end = %step.end, consumed = step.consumed, "yenc terminator");
        }
        IncrementalDecodeResult {
            data: out,
            end: step.end,
            state: step.state,
            bytes_consumed: step.consumed,
        }
    }

    /// Fresh stream at line start.
    pub fn stream(&self) -> DecodeStream {
        DecodeStream {
            decoder: *self,
            crc: CrcEngine::new(&self.ctx),
            state: DecoderState::Crlf,
            end: DecoderEnd::None,
            bytes_in: 0,
            bytes_out: 0,
            crc_value: 0,
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(&KernelContext::default())
    }
}

/// Single logical decode stream over a dot-stuffed body.
///
/// Once a terminator has been seen, further pushes consume nothing.
#[derive(Debug, Clone)]
pub struct DecodeStream {
    decoder: Decoder,
    crc: CrcEngine,
    state: DecoderState,
    end: DecoderEnd,
    bytes_in: u64,
    bytes_out: u64,
    crc_value: u32,
}

impl DecodeStream {
    pub fn push(&mut self, chunk: &[u8]) -> IncrementalDecodeResult {
        if self.end.is_end() {
            return IncrementalDecodeResult {
                data: Vec::new(),
                end: self.end,
                state: self.state,
                bytes_consumed: 0,
            };
        }

        let res = self.decoder.decode_incremental(chunk, self.state);
        self.state = res.state;
        self.end = res.end;
        self.bytes_in += res.bytes_consumed as u64;
        self.bytes_out += res.data.len() as u64;
        self.crc_value = self.crc.crc(&res.data, self.crc_value);
        res
    }

    #[inline]
    pub fn state(&self) -> DecoderState {
        self.state
    }

    #[inline]
    pub fn end(&self) -> DecoderEnd {
        self.end
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.end.is_end()
    }

    /// Encoded bytes consumed so far.
    #[inline]
    pub fn bytes_in(&self) -> u64 {
        self.bytes_in
    }

    /// Decoded bytes produced so far.
    #[inline]
    pub fn bytes_out(&self) -> u64 {
        self.bytes_out
    }

    /// CRC-32 of the decoded bytes so far.
    #[inline]
    pub fn crc32(&self) -> u32 {
        self.crc_value
    }

    pub fn checkpoint(&self) -> DecodeCheckpoint {
        DecodeCheckpoint {
            state: self.state,
            end: self.end,
            bytes_in: self.bytes_in,
            bytes_out: self.bytes_out,
            crc: self.crc_value,
        }
    }

    pub fn resume(decoder: &Decoder, checkpoint: &DecodeCheckpoint) -> Self {
        let mut stream = decoder.stream();
        stream.state = checkpoint.state;
        stream.end = checkpoint.end;
        stream.bytes_in = checkpoint.bytes_in;
        stream.bytes_out = checkpoint.bytes_out;
        stream.crc_value = checkpoint.crc;
        stream
    }
}
