//! encode/scalar.rs
//! Portable yEnc encoder backend.
//!
//! Per input byte `b`: `e = b + 42 (mod 256)`. Critical outputs (NUL, LF, CR,
//! `=`) and a `.` in the first column are written as `=` followed by
//! `e + 64 (mod 256)`. A CRLF is emitted as soon as a line holds `line_size`
//! or more characters, so the carried column is always `< line_size` and a
//! stream split at any point encodes byte-identically to the unsplit input.

use crate::constants::{CRLF, CR, DOT, ESCAPE, ESCAPE_OFFSET, LF, NUL, OFFSET, SPACE, TAB};

/// Per-call encoder parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeParams {
    /// Characters per line before the CRLF (values below 1 are treated as 1).
    pub line_size: usize,
    /// Also escape TAB/SPACE in the first or last column.
    pub escape_whitespace: bool,
}

#[inline(always)]
fn needs_escape(e: u8, line_start: bool, line_final: bool, escape_whitespace: bool) -> bool {
    match e {
        NUL | LF | CR | ESCAPE => true,
        DOT => line_start,
        TAB | SPACE => escape_whitespace && (line_start || line_final),
        _ => false,
    }
}

/// Encode `src` into `dst` starting at `column`; returns the column after the
/// last emitted character.
///
/// `is_end` marks the final byte of `src` as the last character of its line
/// (it is followed by the article's own CRLF); it only matters with
/// `escape_whitespace`. No trailing CRLF is forced here.
pub fn encode_scalar(
    src: &[u8],
    dst: &mut Vec<u8>,
    params: &EncodeParams,
    column: usize,
    is_end: bool,
) -> usize {
    if src.is_empty() {
        return column;
    }

    let line_size = params.line_size.max(1);
    dst.reserve(max_length(src.len(), line_size));

    let mut col = column;
    if col >= line_size {
        // Caller handed in a full line; close it before continuing.
        dst.extend_from_slice(CRLF);
        col = 0;
    }

    let last = src.len() - 1;
    for (i, &b) in src.iter().enumerate() {
        let e = b.wrapping_add(OFFSET);
        let line_final = col + 1 >= line_size || (is_end && i == last);

        if needs_escape(e, col == 0, line_final, params.escape_whitespace) {
            dst.push(ESCAPE);
            dst.push(e.wrapping_add(ESCAPE_OFFSET));
            col += 2;
        } else {
            dst.push(e);
            col += 1;
        }

        if col >= line_size {
            dst.extend_from_slice(CRLF);
            col = 0;
        }
    }

    col
}

/// Safe output capacity for `len` input bytes: every byte doubled plus a CRLF
/// per (possibly overlong) line and one extra break for a carried column.
/// Not tight.
pub fn max_length(len: usize, line_size: usize) -> usize {
    let line_size = line_size.max(1);
    let doubled = len.saturating_mul(2);
    doubled.saturating_add((doubled / line_size + 2).saturating_mul(2))
}
