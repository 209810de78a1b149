//! crc/verify.rs
//! Whole-file CRC verification from per-part CRCs.
//!
//! Parts may arrive in any order. Each part contributes `(offset, length, crc)`;
//! once the parts tile `[0, total)` without gaps, their CRCs are folded with
//! `combine` into the full-file CRC. No payload bytes are re-read.

use std::collections::BTreeMap;

use crate::crc::algebra::combine;
use crate::crc::types::CrcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PartRecord {
    length: u64,
    crc: u32,
}

/// Streaming verifier for a file assembled from independently checked parts.
#[derive(Debug, Clone)]
pub struct FileCrcVerifier {
    total_len: u64,
    expected: Option<u32>,
    parts: BTreeMap<u64, PartRecord>,
    covered: u64,
}

impl FileCrcVerifier {
    /// `expected` is the declared full-file CRC, if known.
    pub fn new(total_len: u64, expected: Option<u32>) -> Self {
        Self {
            total_len,
            expected,
            parts: BTreeMap::new(),
            covered: 0,
        }
    }

    /// Register one part. Zero-length parts are accepted and ignored.
    pub fn add_part(&mut self, offset: u64, length: u64, crc: u32) -> Result<(), CrcError> {
        let end = offset
            .checked_add(length)
            .filter(|end| *end <= self.total_len)
            .ok_or(CrcError::OutOfRange { offset, length, total: self.total_len })?;

        if length == 0 {
            return Ok(());
        }

        if let Some((prev_off, prev)) = self.parts.range(..=offset).next_back() {
            if prev_off + prev.length > offset {
                return Err(CrcError::Overlap { offset, length });
            }
        }
        if let Some((next_off, _)) = self.parts.range(offset..).next() {
            if *next_off < end {
                return Err(CrcError::Overlap { offset, length });
            }
        }

        self.parts.insert(offset, PartRecord { length, crc });
        self.covered += length;
        Ok(())
    }

    /// Bytes accounted for so far.
    #[inline]
    pub fn covered(&self) -> u64 {
        self.covered
    }

    #[inline]
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// Number of registered (non-empty) parts.
    #[inline]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// True once the parts cover the whole file.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.covered == self.total_len
    }

    /// Full-file CRC folded from the registered parts.
    pub fn combined(&self) -> Result<u32, CrcError> {
        if !self.is_complete() {
            return Err(CrcError::Incomplete { covered: self.covered, total: self.total_len });
        }
        // Overlaps are rejected on insert, so full coverage means the parts
        // are contiguous in ascending offset order.
        Ok(self
            .parts
            .values()
            .fold(0u32, |acc, part| combine(acc, part.crc, part.length)))
    }

    /// Combine and compare against the declared CRC (if any).
    pub fn finalize(self) -> Result<u32, CrcError> {
        let actual = self.combined()?;
        match self.expected {
            Some(expected) if expected != actual => Err(CrcError::Mismatch { expected, actual }),
            _ => Ok(actual),
        }
    }
}
