//! telemetry/counters.rs
//! Mutable counters collected while articles are built or parsed.
use bincode::{Encode, Decode};
use std::ops::AddAssign;

/// Deterministic counters collected during article processing.
#[derive(Default, Clone, Debug, Encode, Decode, PartialEq, Eq)]
pub struct TelemetryCounters {
    pub articles_encoded: u64,
    pub articles_decoded: u64,
    /// Payload bytes before encoding / after decoding.
    pub bytes_raw: u64,
    /// Encoded payload bytes, line breaks included.
    pub bytes_encoded: u64,
    /// `=ybegin`, `=ypart` and `=yend` lines.
    pub bytes_overhead: u64,
}

impl TelemetryCounters {
    /// Record one assembled article.
    ///
    /// - `raw_len`: payload bytes of this part
    /// - `encoded_len`: encoded payload bytes including CRLFs
    /// - `overhead_len`: header/part/trailer line bytes
    pub fn add_encoded(&mut self, raw_len: usize, encoded_len: usize, overhead_len: usize) {
        self.articles_encoded += 1;
        self.bytes_raw += raw_len as u64;
        self.bytes_encoded += encoded_len as u64;
        self.bytes_overhead += overhead_len as u64;
    }

    /// Record one parsed article. Arguments as in [`add_encoded`](Self::add_encoded).
    pub fn add_decoded(&mut self, raw_len: usize, encoded_len: usize, overhead_len: usize) {
        self.articles_decoded += 1;
        self.bytes_raw += raw_len as u64;
        self.bytes_encoded += encoded_len as u64;
        self.bytes_overhead += overhead_len as u64;
    }

    pub fn framing_overhead_bytes(&self) -> u64 {
        self.bytes_overhead
    }

    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.articles_encoded += other.articles_encoded;
        self.articles_decoded += other.articles_decoded;
        self.bytes_raw += other.bytes_raw;
        self.bytes_encoded += other.bytes_encoded;
        self.bytes_overhead += other.bytes_overhead;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
