//! Wall-clock time per article processing stage.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Encode,
    Decode,
    Checksum,
    Frame,
    Parse,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Encode   => "encode",
            Stage::Decode   => "decode",
            Stage::Checksum => "checksum",
            Stage::Frame    => "frame",
            Stage::Parse    => "parse",
        };
        f.write_str(name)
    }
}

/// Accumulated duration per stage, ordered by stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimes {
    times: BTreeMap<Stage, Duration>,
}

impl StageTimes {
    pub fn add(&mut self, stage: Stage, dur: Duration) {
        *self.times.entry(stage).or_default() += dur;
    }

    pub fn get(&self, stage: Stage) -> Duration {
        self.times.get(&stage).copied().unwrap_or_default()
    }

    pub fn total(&self) -> Duration {
        self.times.values().sum()
    }

    /// True when every listed stage has a recorded entry, even a zero one.
    pub fn has_all(&self, expected: &[Stage]) -> bool {
        expected.iter().all(|s| self.times.contains_key(s))
    }
}

#[derive(Clone, Debug)]
pub struct TelemetryTimer {
    pub start_time: Instant,
    pub end_time: Option<Instant>,
    pub stage_times: StageTimes,
}

impl TelemetryTimer {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            stage_times: StageTimes::default(),
        }
    }

    pub fn finish(&mut self) {
        self.end_time = Some(Instant::now());
    }

    pub fn add_stage_time(&mut self, stage: Stage, dur: Duration) {
        self.stage_times.add(stage, dur);
    }

    /// Run `f` and charge its wall time to `stage`.
    pub fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let t = Instant::now();
        let out = f();
        self.add_stage_time(stage, t.elapsed());
        out
    }

    /// Time since creation, frozen once `finish` is called.
    pub fn elapsed(&self) -> Duration {
        self.end_time.unwrap_or_else(Instant::now).duration_since(self.start_time)
    }
}

impl Default for TelemetryTimer {
    fn default() -> Self {
        Self::new()
    }
}
