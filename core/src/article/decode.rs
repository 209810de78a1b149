//! article/decode.rs
//! Article parsing: strip the frame, decode the payload, verify size and CRC.
//!
//! Notes:
//! - Lines before `=ybegin` are skipped.
//! - `name=` takes the rest of the `=ybegin` line, spaces included.
//! - Unknown `key=value` pairs are ignored.
//! - The payload ends at the first `\r\n=y`, which the decoder finds without
//!   scanning ahead.

use std::str::FromStr;

use bytes::Bytes;

use crate::article::types::{ArticleError, DecodedArticle, YencHeader, YencPart, YencTrailer};
use crate::constants::keywords;
use crate::crc::{to_hex, CrcEngine, CrcError, FileCrcVerifier};
use crate::decode::{Decoder, DecoderEnd, DecoderState};
use crate::kernel::KernelContext;
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::YencError;

/// Next line starting at `pos`, without its line terminator, plus the
/// position after the terminator.
fn next_line(buf: &[u8], pos: usize) -> Option<(&[u8], usize)> {
    if pos >= buf.len() {
        return None;
    }
    let rest = &buf[pos..];
    match rest.iter().position(|&b| b == b'\n') {
        Some(lf) => {
            let line = &rest[..lf];
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            Some((line, pos + lf + 1))
        }
        None => Some((rest, buf.len())),
    }
}

/// `keyword` followed by a space or the end of the line.
fn keyword_args<'a>(line: &'a [u8], keyword: &str) -> Option<&'a [u8]> {
    let rest = line.strip_prefix(keyword.as_bytes())?;
    match rest.first() {
        None => Some(rest),
        Some(b' ') | Some(b'\t') => Some(rest),
        Some(_) => None,
    }
}

/// `key=value` pairs of a framing line.
fn pairs(args: &str) -> impl Iterator<Item = (&str, &str)> {
    args.split_whitespace().filter_map(|tok| tok.split_once('='))
}

fn parse_num<T: FromStr>(value: &str, line: &'static str, field: &'static str) -> Result<T, ArticleError> {
    value
        .parse()
        .map_err(|_| ArticleError::Malformed(format!("{line}: bad {field} value `{value}`")))
}

fn parse_crc(value: &str, line: &'static str, field: &'static str) -> Result<u32, ArticleError> {
    let digits = value.trim_start_matches("0x");
    u32::from_str_radix(digits, 16)
        .map_err(|_| ArticleError::Malformed(format!("{line}: bad {field} value `{value}`")))
}

fn parse_header(args: &[u8]) -> Result<YencHeader, ArticleError> {
    const LINE: &str = keywords::YBEGIN;
    let text = String::from_utf8_lossy(args);

    // name= runs to end of line and may contain spaces or '='
    let (params, name) = match text.find(" name=") {
        Some(i) => (&text[..i], text[i + " name=".len()..].to_string()),
        None => return Err(ArticleError::MissingField { line: LINE, field: "name" }),
    };

    let (mut part, mut total, mut line, mut size) = (None, None, None, None);
    for (key, value) in pairs(params) {
        match key {
            "part" => part = Some(parse_num(value, LINE, "part")?),
            "total" => total = Some(parse_num(value, LINE, "total")?),
            "line" => line = Some(parse_num(value, LINE, "line")?),
            "size" => size = Some(parse_num(value, LINE, "size")?),
            _ => {}
        }
    }

    Ok(YencHeader {
        part,
        total,
        line: line.ok_or(ArticleError::MissingField { line: LINE, field: "line" })?,
        size: size.ok_or(ArticleError::MissingField { line: LINE, field: "size" })?,
        name,
    })
}

fn parse_part(args: &[u8]) -> Result<YencPart, ArticleError> {
    const LINE: &str = keywords::YPART;
    let text = String::from_utf8_lossy(args);

    let (mut begin, mut end) = (None, None);
    for (key, value) in pairs(&text) {
        match key {
            "begin" => begin = Some(parse_num(value, LINE, "begin")?),
            "end" => end = Some(parse_num(value, LINE, "end")?),
            _ => {}
        }
    }

    let part = YencPart {
        begin: begin.ok_or(ArticleError::MissingField { line: LINE, field: "begin" })?,
        end: end.ok_or(ArticleError::MissingField { line: LINE, field: "end" })?,
    };
    if part.begin == 0 || part.end < part.begin - 1 {
        return Err(ArticleError::Malformed(format!(
            "{LINE}: invalid range {}..={}",
            part.begin, part.end
        )));
    }
    Ok(part)
}

fn parse_trailer(args: &[u8]) -> Result<YencTrailer, ArticleError> {
    const LINE: &str = keywords::YEND;
    let text = String::from_utf8_lossy(args);

    let (mut size, mut part, mut pcrc32, mut crc32) = (None, None, None, None);
    for (key, value) in pairs(&text) {
        match key {
            "size" => size = Some(parse_num(value, LINE, "size")?),
            "part" => part = Some(parse_num(value, LINE, "part")?),
            "pcrc32" => pcrc32 = Some(parse_crc(value, LINE, "pcrc32")?),
            "crc32" => crc32 = Some(parse_crc(value, LINE, "crc32")?),
            _ => {}
        }
    }

    Ok(YencTrailer {
        size: size.ok_or(ArticleError::MissingField { line: LINE, field: "size" })?,
        part,
        pcrc32,
        crc32,
    })
}

/// Parses articles and keeps running telemetry across calls.
#[derive(Debug, Clone)]
pub struct ArticleDecoder {
    decoder: Decoder,
    crc: CrcEngine,
    counters: TelemetryCounters,
    timer: TelemetryTimer,
}

impl ArticleDecoder {
    pub fn new(ctx: &KernelContext) -> Self {
        Self {
            decoder: Decoder::new(ctx),
            crc: CrcEngine::new(ctx),
            counters: TelemetryCounters::default(),
            timer: TelemetryTimer::new(),
        }
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters, &self.timer)
    }

    #[inline]
    pub fn counters(&self) -> &TelemetryCounters {
        &self.counters
    }

    /// Parse one article, decode its payload and verify it.
    pub fn decode(&mut self, article: &[u8]) -> Result<DecodedArticle, YencError> {
        let started = std::time::Instant::now();

        // =ybegin
        let mut pos = 0;
        let (header_start, header, mut body_start) = loop {
            let (line, next) = next_line(article, pos)
                .ok_or_else(|| ArticleError::Malformed("no =ybegin line".into()))?;
            if let Some(args) = keyword_args(line, keywords::YBEGIN) {
                break (pos, parse_header(args)?, next);
            }
            pos = next;
        };

        // =ypart, mandatory for multi-part
        let mut part = None;
        if header.part.is_some() {
            let ypart = next_line(article, body_start)
                .and_then(|(line, next)| keyword_args(line, keywords::YPART).map(|args| (args, next)));
            match ypart {
                Some((args, next)) => {
                    part = Some(parse_part(args)?);
                    body_start = next;
                }
                None => {
                    return Err(ArticleError::Malformed("multi-part article without =ypart line".into()).into());
                }
            }
        }
        self.timer.add_stage_time(Stage::Parse, started.elapsed());

        // payload up to "\r\n=y"
        let decoder = self.decoder;
        let body = &article[body_start..];
        let res = self.timer.time(Stage::Decode, || decoder.decode_incremental(body, DecoderState::Crlf));
        match res.end {
            DecoderEnd::Article => {}
            DecoderEnd::Control => {
                return Err(ArticleError::Malformed("article terminated before =yend".into()).into());
            }
            DecoderEnd::None => {
                return Err(ArticleError::Malformed("no =yend line".into()).into());
            }
        }
        // consumed ends just past "=y"; the trailer line continues with "end"
        let trailer_at = body_start + res.bytes_consumed;
        let payload_len = res.bytes_consumed - 2;

        let started = std::time::Instant::now();
        let (trailer_args, article_end) = next_line(article, trailer_at)
            .and_then(|(line, next)| keyword_args(line, "end").map(|args| (args, next)))
            .ok_or_else(|| ArticleError::Malformed("=y line is not =yend".into()))?;
        let trailer = parse_trailer(trailer_args)?;
        self.timer.add_stage_time(Stage::Parse, started.elapsed());

        let data = res.data;
        let actual_len = data.len() as u64;
        if trailer.size != actual_len {
            return Err(ArticleError::SizeMismatch { declared: trailer.size, actual: actual_len }.into());
        }
        match part {
            Some(p) => {
                if p.len() != actual_len {
                    return Err(ArticleError::SizeMismatch { declared: p.len(), actual: actual_len }.into());
                }
                if p.end > header.size {
                    return Err(ArticleError::Malformed(format!(
                        "=ypart end {} beyond file size {}",
                        p.end, header.size
                    ))
                    .into());
                }
            }
            None if header.size != actual_len => {
                return Err(ArticleError::SizeMismatch { declared: header.size, actual: actual_len }.into());
            }
            None => {}
        }

        let crc = self.crc;
        let actual = self.timer.time(Stage::Checksum, || crc.crc(&data, 0));
        let expected = match header.part {
            Some(_) => trailer.pcrc32,
            None => trailer.pcrc32.or(trailer.crc32),
        };
        if let Some(expected) = expected {
            if expected != actual {
                return Err(CrcError::Mismatch { expected, actual }.into());
            }
        }

        let overhead = (article_end - header_start) - payload_len;
        self.counters.add_decoded(data.len(), payload_len, overhead);
        tracing::debug!(
            name = %header.name,
            part = ?header.part,
            size = actual_len,
            crc32 = %to_hex(actual),
            "yenc article decoded"
        );

        Ok(DecodedArticle {
            header,
            part,
            trailer,
            data: Bytes::from(data),
            crc32: actual,
        })
    }
}

/// Parse and verify one article.
pub fn decode_article(article: &[u8]) -> Result<DecodedArticle, YencError> {
    ArticleDecoder::new(KernelContext::shared()).decode(article)
}

/// Reassemble a file from its decoded parts, in any order.
///
/// Offsets must tile the declared file size exactly; the full CRC is
/// recomputed from the part CRCs and checked against the declared `crc32=`.
pub fn join_parts(parts: &[DecodedArticle]) -> Result<Bytes, YencError> {
    let first = parts
        .first()
        .ok_or(ArticleError::InvalidArgument { field: "parts", reason: "must not be empty" })?;

    if parts.len() == 1 && !first.is_multi_part() {
        return Ok(first.data.clone());
    }

    let total = first.header.size;
    if parts.iter().any(|p| p.header.size != total) {
        return Err(ArticleError::Malformed("parts disagree on file size".into()).into());
    }
    let mut declared = parts.iter().filter_map(|p| p.trailer.crc32);
    let expected = declared.next();
    if declared.any(|crc| Some(crc) != expected) {
        return Err(ArticleError::Malformed("parts disagree on file crc32".into()).into());
    }

    let mut verifier = FileCrcVerifier::new(total, expected);
    for p in parts {
        verifier.add_part(p.offset(), p.data.len() as u64, p.crc32)?;
    }
    let crc = verifier.finalize()?;

    let len = usize::try_from(total)
        .map_err(|_| ArticleError::Malformed(format!("file size {total} too large")))?;
    let mut out = vec![0u8; len];
    for p in parts {
        let offset = p.offset() as usize;
        out[offset..offset + p.data.len()].copy_from_slice(&p.data);
    }
    tracing::debug!(parts = parts.len(), size = total, crc32 = %to_hex(crc), "yenc parts joined");
    Ok(Bytes::from(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_parsing_keeps_spaces_in_name() {
        let h = parse_header(b" part=2 total=5 line=128 size=1000 name=my file = x.bin").unwrap();
        assert_eq!(h.part, Some(2));
        assert_eq!(h.total, Some(5));
        assert_eq!(h.line, 128);
        assert_eq!(h.size, 1000);
        assert_eq!(h.name, "my file = x.bin");
    }

    #[test]
    fn header_requires_fields() {
        assert_eq!(
            parse_header(b" line=128 size=3").unwrap_err(),
            ArticleError::MissingField { line: "=ybegin", field: "name" }
        );
        assert_eq!(
            parse_header(b" line=128 name=a").unwrap_err(),
            ArticleError::MissingField { line: "=ybegin", field: "size" }
        );
        assert!(matches!(parse_header(b" line=x size=3 name=a"), Err(ArticleError::Malformed(_))));
    }

    #[test]
    fn trailer_parsing() {
        let t = parse_trailer(b" size=200 part=1 pcrc32=0000BEEF crc32=abcd1234").unwrap();
        assert_eq!(t.size, 200);
        assert_eq!(t.part, Some(1));
        assert_eq!(t.pcrc32, Some(0xbeef));
        assert_eq!(t.crc32, Some(0xabcd_1234));
    }

    #[test]
    fn part_range_is_validated() {
        assert!(parse_part(b" begin=0 end=5").is_err());
        assert!(parse_part(b" begin=10 end=5").is_err());
        assert_eq!(parse_part(b" begin=1 end=200").unwrap(), YencPart { begin: 1, end: 200 });
    }

    #[test]
    fn part_range_at_u64_limit_does_not_overflow() {
        let part = parse_part(b" begin=1 end=18446744073709551615").unwrap();
        assert_eq!(part.len(), u64::MAX);
        assert!(parse_part(b" begin=18446744073709551615 end=0").is_err());
    }

    #[test]
    fn keyword_needs_separator() {
        assert!(keyword_args(b"=ybeginx line=1", "=ybegin").is_none());
        assert_eq!(keyword_args(b"=ypart begin=1", "=ypart"), Some(&b" begin=1"[..]));
    }

    #[test]
    fn lines_split_on_lf_with_optional_cr() {
        let buf = b"a\r\nb\nc";
        let (l, p) = next_line(buf, 0).unwrap();
        assert_eq!((l, p), (&b"a"[..], 3));
        let (l, p) = next_line(buf, p).unwrap();
        assert_eq!((l, p), (&b"b"[..], 5));
        let (l, p) = next_line(buf, p).unwrap();
        assert_eq!((l, p), (&b"c"[..], 6));
        assert!(next_line(buf, p).is_none());
    }
}
