//! telemetry/mod.rs
//! Counters, stage timers and immutable snapshots for article encode/decode.
//!
//! Notes:
//! - Expansion ratio: `bytes_encoded / bytes_raw`, typically 1.02 to 1.03 for
//!   random data at line size 128.
//! - Throughput: `bytes_raw / elapsed`.
//! - Snapshots are plain values; counters merge without locks.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
