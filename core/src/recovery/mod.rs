//! recovery/mod.rs
//! Checkpoint and resume support for encode/decode streams.

pub mod checkpoint;

pub use checkpoint::*;
