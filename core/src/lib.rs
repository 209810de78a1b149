//! yenc-core
//!
//! Pure Rust yEnc codec engine: streaming encoder and decoder, CRC-32 algebra,
//! and single/multi-part article framing.
//! No Python, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Backend selection
pub mod kernel;

// Codec
pub mod crc;
pub mod encode;
pub mod decode;

// Framing
pub mod article;

pub mod telemetry;
pub mod recovery;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::types::YencError;
    pub use crate::kernel::{CpuFeatures, Kernel, KernelContext};

    pub use crate::crc::{crc32, to_hex, CrcEngine, CrcError, FileCrcVerifier};

    pub use crate::encode::{encode, encode_ex, encode_max_length, EncodeResult, EncodeStream, Encoder, EncoderConfig};
    pub use crate::decode::{
        decode, decode_ex, decode_incremental, DecodeResult, DecodeStream, Decoder, DecoderEnd, DecoderState,
        IncrementalDecodeResult,
    };

    pub use crate::article::{
        decode_article, encode_multi_part, encode_single_part, join_parts, ArticleConfig, ArticleDecoder,
        ArticleEncoder, ArticleError, DecodedArticle, YencArticle,
    };

    pub use crate::recovery::{Checkpointable, CheckpointError, DecodeCheckpoint, EncodeCheckpoint};
    pub use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot};
}
