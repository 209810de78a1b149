//! crc/engine.rs
//! CRC engine bound to a resolved backend.

use crate::crc::algebra;
use crate::kernel::{CrcFn, Kernel, KernelContext};

/// CRC-32 engine. Checksums go through the backend chosen by the context;
/// the algebraic operations are backend-independent and allocation-free.
#[derive(Debug, Clone, Copy)]
pub struct CrcEngine {
    kernel: Kernel,
    crc_fn: CrcFn,
}

impl CrcEngine {
    pub fn new(ctx: &KernelContext) -> Self {
        Self {
            kernel: ctx.crc_kernel(),
            crc_fn: ctx.crc_fn(),
        }
    }

    /// Backend in use for `crc`.
    #[inline]
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    /// CRC-32 of `data`, continuing from `init` (use `0` for a fresh checksum).
    #[inline]
    pub fn crc(&self, data: &[u8], init: u32) -> u32 {
        if data.is_empty() {
            return init;
        }
        (self.crc_fn)(init, data)
    }

    /// CRC of the concatenation of two ranges, from their CRCs alone.
    #[inline]
    pub fn combine(&self, crc1: u32, crc2: u32, len2: u64) -> u32 {
        algebra::combine(crc1, crc2, len2)
    }

    /// CRC after appending `length` zero bytes.
    #[inline]
    pub fn zeros(&self, init: u32, length: u64) -> u32 {
        algebra::zeros(init, length)
    }

    /// CRC before `length` trailing zero bytes were appended.
    #[inline]
    pub fn unzero(&self, init: u32, length: u64) -> u32 {
        algebra::unzero(init, length)
    }

    #[inline]
    pub fn multiply(&self, a: u32, b: u32) -> u32 {
        algebra::multiply(a, b)
    }

    #[inline]
    pub fn two_pow(&self, n: i64) -> u32 {
        algebra::two_pow(n)
    }

    #[inline]
    pub fn two_fifty_six_pow(&self, n: i64) -> u32 {
        algebra::two_fifty_six_pow(n)
    }
}

impl Default for CrcEngine {
    fn default() -> Self {
        Self::new(&KernelContext::default())
    }
}
