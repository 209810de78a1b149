//! recovery/checkpoint.rs
//! Resumable stream checkpoints.
//!
//! Wire layout: `magic (4) | kind (1) | bincode payload`. The payload uses the
//! bincode standard config (varint integers), so a checkpoint is a few bytes.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{DecoderEnd, DecoderState};

pub const CHECKPOINT_MAGIC: [u8; 4] = *b"YCKP";
const CHECKPOINT_PREFIX_LEN: usize = CHECKPOINT_MAGIC.len() + 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckpointError {
    #[error("checkpoint truncated: {have} bytes")]
    Truncated { have: usize },
    #[error("bad checkpoint magic: {0:02x?}")]
    BadMagic([u8; 4]),
    #[error("checkpoint kind mismatch: expected {expected}, got {got}")]
    KindMismatch { expected: u8, got: u8 },
    #[error("checkpoint encode failed: {0}")]
    Encode(String),
    #[error("checkpoint decode failed: {0}")]
    Decode(String),
    #[error("trailing bytes after checkpoint payload: {0}")]
    TrailingBytes(usize),
}

/// Serializable resume point of a stream.
pub trait Checkpointable: Sized {
    /// Kind byte written after the magic.
    const KIND: u8;

    fn export(&self) -> Result<Vec<u8>, CheckpointError>;
    fn import(bytes: &[u8]) -> Result<Self, CheckpointError>;
    fn summary(&self) -> String;
}

fn export_with<T: Encode>(kind: u8, value: &T) -> Result<Vec<u8>, CheckpointError> {
    let payload = bincode::encode_to_vec(value, bincode::config::standard())
        .map_err(|e| CheckpointError::Encode(e.to_string()))?;
    let mut out = Vec::with_capacity(CHECKPOINT_PREFIX_LEN + payload.len());
    out.extend_from_slice(&CHECKPOINT_MAGIC);
    out.push(kind);
    out.extend_from_slice(&payload);
    Ok(out)
}

fn import_with<T: Decode<()>>(kind: u8, bytes: &[u8]) -> Result<T, CheckpointError> {
    if bytes.len() < CHECKPOINT_PREFIX_LEN {
        return Err(CheckpointError::Truncated { have: bytes.len() });
    }
    let mut magic = [0u8; 4];
    magic.copy_from_slice(&bytes[..4]);
    if magic != CHECKPOINT_MAGIC {
        return Err(CheckpointError::BadMagic(magic));
    }
    if bytes[4] != kind {
        return Err(CheckpointError::KindMismatch { expected: kind, got: bytes[4] });
    }

    let payload = &bytes[CHECKPOINT_PREFIX_LEN..];
    let (value, used) = bincode::decode_from_slice(payload, bincode::config::standard())
        .map_err(|e| CheckpointError::Decode(e.to_string()))?;
    if used != payload.len() {
        return Err(CheckpointError::TrailingBytes(payload.len() - used));
    }
    Ok(value)
}

/// Encode stream resume point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode)]
pub struct EncodeCheckpoint {
    pub column: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub crc: u32,
}

impl Checkpointable for EncodeCheckpoint {
    const KIND: u8 = 0x01;

    fn export(&self) -> Result<Vec<u8>, CheckpointError> {
        export_with(Self::KIND, self)
    }

    fn import(bytes: &[u8]) -> Result<Self, CheckpointError> {
        import_with(Self::KIND, bytes)
    }

    fn summary(&self) -> String {
        format!(
            "EncodeCheckpoint: column={}, in={}, out={}, crc={:08x}",
            self.column, self.bytes_in, self.bytes_out, self.crc
        )
    }
}

/// Decode stream resume point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode)]
pub struct DecodeCheckpoint {
    pub state: DecoderState,
    pub end: DecoderEnd,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub crc: u32,
}

impl Checkpointable for DecodeCheckpoint {
    const KIND: u8 = 0x02;

    fn export(&self) -> Result<Vec<u8>, CheckpointError> {
        export_with(Self::KIND, self)
    }

    fn import(bytes: &[u8]) -> Result<Self, CheckpointError> {
        import_with(Self::KIND, bytes)
    }

    fn summary(&self) -> String {
        format!(
            "DecodeCheckpoint: state={}, end={}, in={}, out={}, crc={:08x}",
            self.state, self.end, self.bytes_in, self.bytes_out, self.crc
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_checkpoint_bytes_roundtrip() {
        let cp = EncodeCheckpoint { column: 77, bytes_in: 1 << 40, bytes_out: 3, crc: 0xdead_beef };
        let bytes = cp.export().unwrap();
        assert_eq!(&bytes[..4], &CHECKPOINT_MAGIC);
        assert_eq!(bytes[4], EncodeCheckpoint::KIND);
        assert_eq!(EncodeCheckpoint::import(&bytes).unwrap(), cp);
    }

    #[test]
    fn kind_is_checked() {
        let bytes = DecodeCheckpoint::default().export().unwrap();
        let err = EncodeCheckpoint::import(&bytes).unwrap_err();
        assert_eq!(err, CheckpointError::KindMismatch { expected: 0x01, got: 0x02 });
    }

    #[test]
    fn corrupt_prefix_is_rejected() {
        assert_eq!(
            DecodeCheckpoint::import(b"YC").unwrap_err(),
            CheckpointError::Truncated { have: 2 }
        );
        let mut bytes = DecodeCheckpoint::default().export().unwrap();
        bytes[0] = b'X';
        assert!(matches!(DecodeCheckpoint::import(&bytes), Err(CheckpointError::BadMagic(_))));
    }

    #[test]
    fn invalid_state_value_fails_to_decode() {
        let mut bytes = DecodeCheckpoint::default().export().unwrap();
        // first payload byte is the state's variant index
        bytes[CHECKPOINT_PREFIX_LEN] = 9;
        assert!(matches!(DecodeCheckpoint::import(&bytes), Err(CheckpointError::Decode(_))));
    }

    #[test]
    fn summary_names_the_state() {
        let cp = DecodeCheckpoint { state: DecoderState::CrlfEq, ..Default::default() };
        assert!(cp.summary().contains("crlf_eq"));
    }
}
