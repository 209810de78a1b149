//! kernel/context.rs
//! One-time backend resolution.
//!
//! Notes:
//! - `KernelContext` is built once (usually at process start) and handed to
//!   `Encoder::new`, `Decoder::new` and `CrcEngine::new`. It is `Copy`, holds
//!   no mutable state and needs no locking.
//! - Each backend is a free function; CRC selection is a plain `match` on the
//!   resolved `Kernel`.
//! - `shared()` is the process-wide context behind the free functions.

use std::sync::OnceLock;

use crate::crc::compute::{crc32_accelerated, crc32_table};
use crate::decode::scalar::{decode_scalar, DecodeMode, DecodeStep};
use crate::decode::DecoderState;
use crate::encode::scalar::{encode_scalar, EncodeParams};
use crate::kernel::types::{CpuFeatures, Kernel};

/// Encode backend: appends to `dst`, returns the new column.
pub type EncodeFn = fn(&[u8], &mut Vec<u8>, &EncodeParams, usize, bool) -> usize;
/// Decode backend: appends to `dst`, returns progress and the end marker.
pub type DecodeFn = fn(&[u8], &mut Vec<u8>, DecoderState, DecodeMode) -> DecodeStep;
/// CRC backend: continues `init` over `data`.
pub type CrcFn = fn(u32, &[u8]) -> u32;

/// Resolved backends for the three codec operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelContext {
    encode: Kernel,
    decode: Kernel,
    crc: Kernel,
    features: CpuFeatures,
}

impl KernelContext {
    /// Probe the CPU and pick the best backend for each operation.
    pub fn detect() -> Self {
        let features = CpuFeatures::detect();
        let ctx = Self::for_features(features);
        tracing::debug!(
            encode = %ctx.encode,
            decode = %ctx.decode,
            crc = %ctx.crc,
            features = ?features,
            "yenc kernels selected"
        );
        ctx
    }

    /// Process-wide context, detected on first use.
    pub fn shared() -> &'static KernelContext {
        static SHARED: OnceLock<KernelContext> = OnceLock::new();
        SHARED.get_or_init(Self::detect)
    }

    /// Portable backends only, regardless of CPU.
    pub fn generic() -> Self {
        Self {
            encode: Kernel::Generic,
            decode: Kernel::Generic,
            crc: Kernel::Generic,
            features: CpuFeatures::empty(),
        }
    }

    /// Resolve backends for an explicit feature set.
    pub fn for_features(features: CpuFeatures) -> Self {
        let crc = if features.contains(CpuFeatures::PCLMULQDQ | CpuFeatures::SSE41) {
            Kernel::Pclmul
        } else if features.contains(CpuFeatures::ARM_CRC) {
            Kernel::ArmCrc
        } else {
            Kernel::Generic
        };

        Self {
            // Encode and decode only ship the scalar backend.
            encode: Kernel::Generic,
            decode: Kernel::Generic,
            crc,
            features,
        }
    }

    #[inline]
    pub fn encode_kernel(&self) -> Kernel {
        self.encode
    }

    #[inline]
    pub fn decode_kernel(&self) -> Kernel {
        self.decode
    }

    #[inline]
    pub fn crc_kernel(&self) -> Kernel {
        self.crc
    }

    #[inline]
    pub fn features(&self) -> CpuFeatures {
        self.features
    }

    // Encode and decode only ship the scalar backend.
    pub(crate) fn encode_fn(&self) -> EncodeFn {
        encode_scalar
    }

    pub(crate) fn decode_fn(&self) -> DecodeFn {
        decode_scalar
    }

    pub(crate) fn crc_fn(&self) -> CrcFn {
        match self.crc {
            Kernel::Pclmul | Kernel::ArmCrc => crc32_accelerated,
            _ => crc32_table,
        }
    }
}

impl Default for KernelContext {
    fn default() -> Self {
        Self::detect()
    }
}
