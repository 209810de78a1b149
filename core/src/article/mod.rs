//! article/mod.rs
//! Article framing: `=ybegin` / `=ypart` / `=yend` lines around an encoded payload.
//!
//! - `encode`: single- and multi-part assembly with full and per-part CRCs.
//! - `decode`: the inverse; parse, decode, verify, and reassemble parts.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::{encode_multi_part, encode_single_part, ArticleEncoder};
pub use decode::{decode_article, join_parts, ArticleDecoder};
