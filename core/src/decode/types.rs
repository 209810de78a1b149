use std::fmt;

use bincode::{Decode, Encode};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// Pending control context carried from one decode call to the next.
///
/// The numeric values are stable and may be persisted.
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    TryFromPrimitive, IntoPrimitive,
    Serialize, Deserialize, Encode, Decode,
)]
pub enum DecoderState {
    /// Line start (initial state).
    Crlf = 0,
    /// Escape marker seen; the next byte is escaped.
    Eq = 1,
    /// Lone CR seen.
    Cr = 2,
    /// Mid-line.
    None = 3,
    /// CR LF `.`
    CrlfDt = 4,
    /// CR LF `.` CR
    CrlfDtCr = 5,
    /// CR LF `=`
    CrlfEq = 6,
}

impl DecoderState {
    #[inline]
    pub fn from_value(value: u8) -> Option<Self> {
        Self::try_from_primitive(value).ok()
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.into()
    }
}

impl Default for DecoderState {
    fn default() -> Self {
        DecoderState::Crlf
    }
}

impl fmt::Display for DecoderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecoderState::Crlf => "crlf",
            DecoderState::Eq => "eq",
            DecoderState::Cr => "cr",
            DecoderState::None => "none",
            DecoderState::CrlfDt => "crlf_dt",
            DecoderState::CrlfDtCr => "crlf_dt_cr",
            DecoderState::CrlfEq => "crlf_eq",
        };
        f.write_str(name)
    }
}

/// Terminator recognized by the incremental decoder.
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    TryFromPrimitive, IntoPrimitive,
    Serialize, Deserialize, Encode, Decode,
)]
pub enum DecoderEnd {
    /// No terminator in the supplied input.
    None = 0,
    /// `\r\n.\r\n` dot terminator.
    Control = 1,
    /// `\r\n=y` footer keyword.
    Article = 2,
}

impl DecoderEnd {
    #[inline]
    pub fn from_value(value: u8) -> Option<Self> {
        Self::try_from_primitive(value).ok()
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.into()
    }

    #[inline]
    pub fn is_end(self) -> bool {
        self != DecoderEnd::None
    }
}

impl Default for DecoderEnd {
    fn default() -> Self {
        DecoderEnd::None
    }
}

impl fmt::Display for DecoderEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecoderEnd::None => "none",
            DecoderEnd::Control => "control",
            DecoderEnd::Article => "article",
        };
        f.write_str(name)
    }
}

/// Output of a bounded decode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodeResult {
    pub data: Vec<u8>,
    pub state: DecoderState,
}

/// Output of an incremental decode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IncrementalDecodeResult {
    pub data: Vec<u8>,
    pub end: DecoderEnd,
    pub state: DecoderState,
    /// Input bytes consumed; less than the input length when a terminator was hit.
    pub bytes_consumed: usize,
}
