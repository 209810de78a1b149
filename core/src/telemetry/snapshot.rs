//! telemetry/snapshot.rs
//! Immutable telemetry snapshot.

use std::time::Duration;
use serde::{Serialize, Deserialize};

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{TelemetryTimer, StageTimes, Stage};

/// Counters, ratios, throughput and stage timings at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub articles_encoded: u64,
    pub articles_decoded: u64,
    pub bytes_raw: u64,
    pub bytes_encoded: u64,
    pub bytes_overhead: u64,
    pub expansion_ratio: f64,
    pub throughput_raw_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let expansion_ratio = if counters.bytes_raw > 0 {
            counters.bytes_encoded as f64 / counters.bytes_raw as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_raw as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            articles_encoded: counters.articles_encoded,
            articles_decoded: counters.articles_decoded,
            bytes_raw: counters.bytes_raw,
            bytes_encoded: counters.bytes_encoded,
            bytes_overhead: counters.bytes_overhead,
            expansion_ratio,
            throughput_raw_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        self.stage_times.has_all(expected)
    }

    /// Invariants:
    /// - every raw byte yields at least one encoded character
    /// - stage times never exceed wall time
    pub fn sanity_check(&self) -> bool {
        self.bytes_encoded >= self.bytes_raw &&
        (self.bytes_raw == 0 || self.expansion_ratio >= 1.0) &&
        self.total_stage_time() <= self.elapsed
    }

    /// Total bytes on the wire: encoded payload plus framing.
    pub fn output_bytes(&self) -> u64 {
        self.bytes_encoded + self.bytes_overhead
    }
}
