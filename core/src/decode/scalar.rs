//! decode/scalar.rs
//! Portable yEnc decoder backend.
//!
//! One pass over the input; each byte is interpreted against the carried
//! `DecoderState` only, so a chunk may end anywhere (inside an escape pair,
//! between CR and LF, or part way into a terminator) and the next call picks
//! up exactly where this one stopped.
//!
//! Notes:
//! - CR and LF are transport framing and never reach the output.
//! - `=` always takes the following byte literally as an escaped value, even
//!   when that byte is CR or LF.
//! - With `unstuff`, a `.` directly after CRLF is dropped (NNTP dot-stuffing).
//! - With `search_end`, `\r\n.\r\n` stops with `Control` and `\r\n=y` stops
//!   with `Article`; consumption ends right after the terminator's last byte.

use crate::constants::{CR, DOT, ESCAPE, ESCAPE_OFFSET, LF, OFFSET};
use crate::decode::types::{DecoderEnd, DecoderState};

const FOOTER_KEYWORD: u8 = b'y';

/// Decoder options for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeMode {
    /// Drop a `.` at line start.
    pub unstuff: bool,
    /// Stop at `\r\n.\r\n` or `\r\n=y`.
    pub search_end: bool,
}

impl DecodeMode {
    /// Whole-buffer decode without terminator search.
    pub const fn bounded(is_raw: bool) -> Self {
        Self { unstuff: !is_raw, search_end: false }
    }

    /// Streaming decode of a dot-stuffed article body.
    pub const fn incremental() -> Self {
        Self { unstuff: true, search_end: true }
    }
}

/// Progress of one backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeStep {
    pub state: DecoderState,
    pub end: DecoderEnd,
    pub consumed: usize,
}

#[inline(always)]
fn plain(c: u8) -> u8 {
    c.wrapping_sub(OFFSET)
}

#[inline(always)]
fn escaped(c: u8) -> u8 {
    c.wrapping_sub(OFFSET).wrapping_sub(ESCAPE_OFFSET)
}

/// Decode `src` into `dst` starting from `state`.
pub fn decode_scalar(
    src: &[u8],
    dst: &mut Vec<u8>,
    state: DecoderState,
    mode: DecodeMode,
) -> DecodeStep {
    use DecoderState as S;

    dst.reserve(src.len());
    let mut state = state;

    for (i, &c) in src.iter().enumerate() {
        state = match state {
            S::Eq => {
                dst.push(escaped(c));
                S::None
            }
            S::CrlfEq => {
                if c == FOOTER_KEYWORD {
                    return DecodeStep { state: S::None, end: DecoderEnd::Article, consumed: i + 1 };
                }
                dst.push(escaped(c));
                S::None
            }
            S::Crlf => match c {
                DOT if mode.unstuff => S::CrlfDt,
                ESCAPE if mode.search_end => S::CrlfEq,
                ESCAPE => S::Eq,
                CR => S::Cr,
                LF => S::None,
                _ => {
                    dst.push(plain(c));
                    S::None
                }
            },
            S::Cr => match c {
                LF => S::Crlf,
                CR => S::Cr,
                ESCAPE => S::Eq,
                _ => {
                    dst.push(plain(c));
                    S::None
                }
            },
            S::CrlfDt => match c {
                CR => S::CrlfDtCr,
                ESCAPE if mode.search_end => S::CrlfEq,
                ESCAPE => S::Eq,
                LF => S::None,
                _ => {
                    dst.push(plain(c));
                    S::None
                }
            },
            S::CrlfDtCr => match c {
                LF if mode.search_end => {
                    return DecodeStep { state: S::Crlf, end: DecoderEnd::Control, consumed: i + 1 };
                }
                LF => S::Crlf,
                CR => S::Cr,
                ESCAPE => S::Eq,
                _ => {
                    dst.push(plain(c));
                    S::None
                }
            },
            S::None => match c {
                ESCAPE => S::Eq,
                CR => S::Cr,
                LF => S::None,
                _ => {
                    dst.push(plain(c));
                    S::None
                }
            },
        };
    }

    DecodeStep { state, end: DecoderEnd::None, consumed: src.len() }
}
