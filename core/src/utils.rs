use std::ops::Range;

use crate::constants::CRLF;

/// Number of parts needed for `len` bytes at `part_size` bytes per part.
/// `part_size` must be non-zero.
#[inline]
pub fn part_count(len: usize, part_size: usize) -> usize {
    len.div_ceil(part_size)
}

/// Contiguous, non-overlapping 0-based ranges covering `0..len`; the last may be short.
pub fn part_ranges(len: usize, part_size: usize) -> impl Iterator<Item = Range<usize>> {
    (0..part_count(len, part_size)).map(move |i| {
        let begin = i * part_size;
        begin..(begin + part_size).min(len)
    })
}

#[inline]
pub fn ends_with_crlf(buf: &[u8]) -> bool {
    buf.ends_with(CRLF)
}
