//! kernel/types.rs
//! Backend identifiers and detected CPU capabilities.
//!
//! Notes:
//! - Identifier values are stable and match the numbering used by other yEnc
//!   engines, so they can be logged or compared across tools.
//! - Values that do not map to a known backend decode to `Kernel::Unknown`.

use std::fmt;
use num_enum::{FromPrimitive, IntoPrimitive};

/// Computational backend behind an encode, decode or crc operation.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
pub enum Kernel {
    Generic  = 0x0,
    ArmCrc   = 0x8,
    Zbc      = 0x10,
    ArmPmull = 0x48,
    Sse2     = 0x100,
    Ssse3    = 0x200,
    Pclmul   = 0x340,
    Avx      = 0x381,
    Avx2     = 0x403,
    Vpclmul  = 0x440,
    Vbmi2    = 0x603,
    Neon     = 0x1000,
    Rvv      = 0x10000,
    #[num_enum(default)]
    Unknown  = -1,
}

impl Kernel {
    /// Map a raw identifier to a kernel; unrecognized values yield `Unknown`.
    #[inline]
    pub fn from_value(value: i32) -> Self {
        Kernel::from_primitive(value)
    }

    #[inline]
    pub fn value(self) -> i32 {
        self.into()
    }

    /// True for any hardware-assisted backend.
    pub fn is_accelerated(self) -> bool {
        !matches!(self, Kernel::Generic | Kernel::Unknown)
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kernel::Generic  => "generic",
            Kernel::ArmCrc   => "armcrc",
            Kernel::Zbc      => "zbc",
            Kernel::ArmPmull => "armpmull",
            Kernel::Sse2     => "sse2",
            Kernel::Ssse3    => "ssse3",
            Kernel::Pclmul   => "pclmul",
            Kernel::Avx      => "avx",
            Kernel::Avx2     => "avx2",
            Kernel::Vpclmul  => "vpclmul",
            Kernel::Vbmi2    => "vbmi2",
            Kernel::Neon     => "neon",
            Kernel::Rvv      => "rvv",
            Kernel::Unknown  => "unknown",
        };
        f.write_str(name)
    }
}

bitflags::bitflags! {
    /// CPU capabilities relevant to backend selection.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CpuFeatures: u32 {
        const SSE2      = 0b0000_0001;
        const SSSE3     = 0b0000_0010;
        const SSE41     = 0b0000_0100;
        const PCLMULQDQ = 0b0000_1000;
        const AVX2      = 0b0001_0000;
        const NEON      = 0b0010_0000;
        const ARM_CRC   = 0b0100_0000;
        const ARM_PMULL = 0b1000_0000;
    }
}

impl CpuFeatures {
    /// Probe the running CPU.
    pub fn detect() -> Self {
        #[allow(unused_mut)]
        let mut features = CpuFeatures::empty();

        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            if std::is_x86_feature_detected!("sse2") {
                features |= CpuFeatures::SSE2;
            }
            if std::is_x86_feature_detected!("ssse3") {
                features |= CpuFeatures::SSSE3;
            }
            if std::is_x86_feature_detected!("sse4.1") {
                features |= CpuFeatures::SSE41;
            }
            if std::is_x86_feature_detected!("pclmulqdq") {
                features |= CpuFeatures::PCLMULQDQ;
            }
            if std::is_x86_feature_detected!("avx2") {
                features |= CpuFeatures::AVX2;
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            if std::arch::is_aarch64_feature_detected!("neon") {
                features |= CpuFeatures::NEON;
            }
            if std::arch::is_aarch64_feature_detected!("crc") {
                features |= CpuFeatures::ARM_CRC;
            }
            if std::arch::is_aarch64_feature_detected!("aes") {
                features |= CpuFeatures::ARM_PMULL;
            }
        }

        features
    }
}
