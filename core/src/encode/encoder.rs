//! encode/encoder.rs
//! Encoder bound to a resolved backend, plus a stream wrapper that carries the
//! column and running CRC between chunks.

use crate::crc::CrcEngine;
use crate::encode::scalar::max_length;
use crate::encode::types::{EncodeResult, EncoderConfig};
use crate::kernel::{EncodeFn, Kernel, KernelContext};
use crate::recovery::EncodeCheckpoint;

#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    ctx: KernelContext,
    config: EncoderConfig,
    encode_fn: EncodeFn,
}

impl Encoder {
    pub fn new(ctx: &KernelContext, config: EncoderConfig) -> Self {
        Self {
            ctx: *ctx,
            config,
            encode_fn: ctx.encode_fn(),
        }
    }

    #[inline]
    pub fn kernel(&self) -> Kernel {
        self.ctx.encode_kernel()
    }

    #[inline]
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode one chunk of a stream, resuming at `column`.
    pub fn encode(&self, data: &[u8], column: usize, is_end: bool) -> EncodeResult {
        let mut out = Vec::new();
        let column = self.encode_into(data, &mut out, column, is_end);
        EncodeResult { data: out, column }
    }

    /// Append the encoding of `data` to `dst`; returns the new column.
    pub fn encode_into(&self, data: &[u8], dst: &mut Vec<u8>, column: usize, is_end: bool) -> usize {
        (self.encode_fn)(data, dst, &self.config.params(), column, is_end)
    }

    /// Safe output capacity for `len` input bytes at this encoder's line size.
    #[inline]
    pub fn max_length(&self, len: usize) -> usize {
        max_length(len, self.config.line_size)
    }

    /// Fresh stream at column 0.
    pub fn stream(&self) -> EncodeStream {
        EncodeStream {
            encoder: *self,
            crc: CrcEngine::new(&self.ctx),
            column: 0,
            bytes_in: 0,
            bytes_out: 0,
            crc_value: 0,
        }
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(&KernelContext::default(), EncoderConfig::default())
    }
}

/// Single logical encode stream. Chunks must be pushed in order.
#[derive(Debug, Clone)]
pub struct EncodeStream {
    encoder: Encoder,
    crc: CrcEngine,
    column: usize,
    bytes_in: u64,
    bytes_out: u64,
    crc_value: u32,
}

impl EncodeStream {
    /// Encode a chunk that is not the last one.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<u8> {
        self.step(chunk, false)
    }

    /// Encode the final chunk (may be empty).
    pub fn finish(&mut self, chunk: &[u8]) -> Vec<u8> {
        self.step(chunk, true)
    }

    fn step(&mut self, chunk: &[u8], is_end: bool) -> Vec<u8> {
        let out = self.encoder.encode(chunk, self.column, is_end);
        self.column = out.column;
        self.crc_value = self.crc.crc(chunk, self.crc_value);
        self.bytes_in += chunk.len() as u64;
        self.bytes_out += out.data.len() as u64;
        out.data
    }

    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Raw bytes consumed so far.
    #[inline]
    pub fn bytes_in(&self) -> u64 {
        self.bytes_in
    }

    /// Encoded bytes produced so far.
    #[inline]
    pub fn bytes_out(&self) -> u64 {
        self.bytes_out
    }

    /// CRC-32 of the raw bytes consumed so far.
    #[inline]
    pub fn crc32(&self) -> u32 {
        self.crc_value
    }

    pub fn checkpoint(&self) -> EncodeCheckpoint {
        EncodeCheckpoint {
            column: self.column as u64,
            bytes_in: self.bytes_in,
            bytes_out: self.bytes_out,
            crc: self.crc_value,
        }
    }

    /// Continue a stream from a checkpoint taken with the same encoder settings.
    pub fn resume(encoder: &Encoder, checkpoint: &EncodeCheckpoint) -> Self {
        let mut stream = encoder.stream();
        stream.column = checkpoint.column as usize;
        stream.bytes_in = checkpoint.bytes_in;
        stream.bytes_out = checkpoint.bytes_out;
        stream.crc_value = checkpoint.crc;
        stream
    }
}
