//! kernel/mod.rs
//! Backend selection for the codec operations.
//!
//! Industry notes:
//! - Capability probing happens once; the result is an immutable value.
//! - Backends are free functions with identical signatures, chosen by enum.

pub mod types;
pub mod context;

pub use types::*;
pub use context::*;
