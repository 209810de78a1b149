use thiserror::Error;

use crate::{
    article::ArticleError,
    crc::CrcError,
    recovery::CheckpointError,
};

/// Unified error covering article framing, checksum verification and checkpoints.
/// - `From<T>` impls enable `?` across layers.
/// - The byte-level codec never fails, so there is no codec variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YencError {
    /// Framing-level error (validation or parse).
    #[error("article error: {0}")]
    Article(#[from] ArticleError),

    /// Checksum verification or CRC composition error.
    #[error("crc error: {0}")]
    Crc(#[from] CrcError),

    /// Checkpoint export/restore error.
    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] CheckpointError),
}

impl YencError {
    /// True for the caller-visible invalid-argument condition.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, YencError::Article(ArticleError::InvalidArgument { .. }))
    }

    /// True when a declared checksum did not match the computed one.
    pub fn is_checksum_mismatch(&self) -> bool {
        matches!(self, YencError::Crc(CrcError::Mismatch { .. }))
    }
}
