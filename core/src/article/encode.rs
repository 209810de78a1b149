//! article/encode.rs
//! Single- and multi-part article assembly.
//!
//! Frame layout (CRLF line endings):
//! ```text
//! =ybegin [part=P total=T] line=L size=S name=NAME
//! [=ypart begin=B end=E]
//! <encoded payload>
//! =yend size=PS [part=P pcrc32=XXXXXXXX] crc32=YYYYYYYY
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use crate::article::types::{ArticleConfig, ArticleError, YencArticle};
use crate::constants::{keywords, CRLF};
use crate::crc::{to_hex, CrcEngine};
use crate::encode::Encoder;
use crate::kernel::KernelContext;
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::YencError;
use crate::utils::{ends_with_crlf, part_count, part_ranges};

/// Reject inputs the assembler must never frame.
pub(crate) fn validate_inputs(data: &[u8], filename: &str) -> Result<(), ArticleError> {
    if data.is_empty() {
        return Err(ArticleError::InvalidArgument { field: "data", reason: "must not be empty" });
    }
    if filename.trim().is_empty() {
        return Err(ArticleError::InvalidArgument { field: "filename", reason: "must not be blank" });
    }
    if filename.contains(['\r', '\n']) {
        return Err(ArticleError::InvalidArgument { field: "filename", reason: "must not contain CR or LF" });
    }
    Ok(())
}

/// Builds articles and keeps running telemetry across calls.
#[derive(Debug, Clone)]
pub struct ArticleEncoder {
    config: ArticleConfig,
    encoder: Encoder,
    crc: CrcEngine,
    counters: TelemetryCounters,
    timer: TelemetryTimer,
}

impl ArticleEncoder {
    pub fn new(ctx: &KernelContext, config: ArticleConfig) -> Result<Self, YencError> {
        config.validate()?;
        Ok(Self {
            config,
            encoder: Encoder::new(ctx, config.encoder_config()),
            crc: CrcEngine::new(ctx),
            counters: TelemetryCounters::default(),
            timer: TelemetryTimer::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &ArticleConfig {
        &self.config
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters, &self.timer)
    }

    #[inline]
    pub fn counters(&self) -> &TelemetryCounters {
        &self.counters
    }

    /// Frame `data` as one article.
    pub fn encode_single_part(&mut self, data: &[u8], filename: &str) -> Result<YencArticle, YencError> {
        validate_inputs(data, filename)?;

        let crc = self.checksum(data);
        let line_size = self.config.line_size;
        let header = format!("{} line={} size={} name={}\r\n", keywords::YBEGIN, line_size, data.len(), filename);
        let trailer = format!("{} size={} crc32={}\r\n", keywords::YEND, data.len(), to_hex(crc));

        let article = self.assemble(data, &[header.as_bytes()], trailer.as_bytes());
        tracing::debug!(size = data.len(), crc32 = %to_hex(crc), name = filename, "yenc single-part article");

        Ok(YencArticle {
            data: article,
            part_number: 1,
            total_parts: 1,
            crc32: crc,
            part_crc32: crc,
        })
    }

    /// Split `data` into `ceil(len / part_size)` articles using the configured part size.
    pub fn encode_multi_part(&mut self, data: &[u8], filename: &str) -> Result<Vec<YencArticle>, YencError> {
        self.encode_parts(data, filename, self.config.part_size)
    }

    /// As [`encode_multi_part`](Self::encode_multi_part) with an explicit part size.
    pub fn encode_parts(&mut self, data: &[u8], filename: &str, part_size: usize) -> Result<Vec<YencArticle>, YencError> {
        validate_inputs(data, filename)?;
        if part_size == 0 {
            return Err(ArticleError::InvalidArgument { field: "part_size", reason: "must be greater than zero" }.into());
        }

        if data.len() <= part_size {
            return Ok(vec![self.encode_single_part(data, filename)?]);
        }

        let full_crc = self.checksum(data);
        let full_hex = to_hex(full_crc);
        let total = part_count(data.len(), part_size);
        let line_size = self.config.line_size;
        let mut articles = Vec::with_capacity(total);

        for (index, range) in part_ranges(data.len(), part_size).enumerate() {
            let number = index + 1;
            let (begin, end) = (range.start, range.end);
            let part = &data[range];
            let part_crc = self.checksum(part);

            let header = format!(
                "{} part={} total={} line={} size={} name={}\r\n",
                keywords::YBEGIN, number, total, line_size, data.len(), filename
            );
            let ypart = format!("{} begin={} end={}\r\n", keywords::YPART, begin + 1, end);
            let trailer = format!(
                "{} size={} part={} pcrc32={} crc32={}\r\n",
                keywords::YEND, part.len(), number, to_hex(part_crc), full_hex
            );

            let article = self.assemble(part, &[header.as_bytes(), ypart.as_bytes()], trailer.as_bytes());
            tracing::debug!(
                part = number,
                total,
                begin = begin + 1,
                end,
                pcrc32 = %to_hex(part_crc),
                "yenc part article"
            );

            articles.push(YencArticle {
                data: article,
                part_number: number as u32,
                total_parts: total as u32,
                crc32: full_crc,
                part_crc32: part_crc,
            });
        }

        Ok(articles)
    }

    fn checksum(&mut self, data: &[u8]) -> u32 {
        let crc = self.crc;
        self.timer.time(Stage::Checksum, || crc.crc(data, 0))
    }

    fn assemble(&mut self, payload: &[u8], head: &[&[u8]], trailer: &[u8]) -> Bytes {
        let encoder = self.encoder;
        let mut encoded = Vec::with_capacity(encoder.max_length(payload.len()) + CRLF.len());
        self.timer.time(Stage::Encode, || encoder.encode_into(payload, &mut encoded, 0, true));
        if !ends_with_crlf(&encoded) {
            encoded.extend_from_slice(CRLF);
        }

        let overhead = head.iter().map(|h| h.len()).sum::<usize>() + trailer.len();
        let out = self.timer.time(Stage::Frame, || {
            let mut out = BytesMut::with_capacity(overhead + encoded.len());
            for line in head {
                out.put_slice(line);
            }
            out.put_slice(&encoded);
            out.put_slice(trailer);
            out.freeze()
        });

        self.counters.add_encoded(payload.len(), encoded.len(), overhead);
        out
    }
}

/// Frame `data` as a single article.
pub fn encode_single_part(data: &[u8], filename: &str, line_size: usize) -> Result<YencArticle, YencError> {
    let config = ArticleConfig { line_size, ..ArticleConfig::default() };
    ArticleEncoder::new(KernelContext::shared(), config)?.encode_single_part(data, filename)
}

/// Split `data` into `part_size` articles; a payload that fits one part
/// yields one single-part article.
pub fn encode_multi_part(
    data: &[u8],
    filename: &str,
    part_size: usize,
    line_size: usize,
) -> Result<Vec<YencArticle>, YencError> {
    validate_inputs(data, filename)?;
    if part_size == 0 {
        return Err(ArticleError::InvalidArgument { field: "part_size", reason: "must be greater than zero" }.into());
    }
    let config = ArticleConfig { line_size, part_size, ..ArticleConfig::default() };
    ArticleEncoder::new(KernelContext::shared(), config)?.encode_multi_part(data, filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generic(config: ArticleConfig) -> ArticleEncoder {
        ArticleEncoder::new(&KernelContext::generic(), config).unwrap()
    }

    #[test]
    fn single_part_frame_lines() {
        let mut enc = generic(ArticleConfig::default());
        let art = enc.encode_single_part(b"Hello, world!", "test.txt").unwrap();
        let text = String::from_utf8_lossy(&art.data).into_owned();
        let lines: Vec<&str> = text.split("\r\n").collect();
        assert_eq!(lines[0], "=ybegin line=128 size=13 name=test.txt");
        assert_eq!(lines[2], "=yend size=13 crc32=ebe6c6e6");
        assert_eq!(lines[3], "");
        assert_eq!(art.crc32, 0xebe6_c6e6);
        assert_eq!(art.part_crc32, art.crc32);
        assert_eq!((art.part_number, art.total_parts), (1, 1));
    }

    #[test]
    fn payload_filling_last_line_gets_no_extra_crlf() {
        let config = ArticleConfig { line_size: 4, ..Default::default() };
        let mut enc = generic(config);
        let data = vec![b'a' - 42; 8];
        let art = enc.encode_single_part(&data, "x").unwrap();
        let expected = format!(
            "=ybegin line=4 size=8 name=x\r\naaaa\r\naaaa\r\n=yend size=8 crc32={}\r\n",
            to_hex(art.crc32)
        );
        assert_eq!(&art.data[..], expected.as_bytes());
    }

    #[test]
    fn validation_rejects_bad_inputs() {
        let mut enc = generic(ArticleConfig::default());
        for (data, name) in [(&b""[..], "a"), (&b"x"[..], "  "), (&b"x"[..], "a\rb"), (&b"x"[..], "a\nb")] {
            let err = enc.encode_single_part(data, name).unwrap_err();
            assert!(err.is_invalid_argument(), "{data:?} {name:?}");
        }
        let err = enc.encode_parts(b"abc", "f", 0).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(enc.counters().articles_encoded, 0);
    }

    #[test]
    fn counters_track_overhead() {
        let mut enc = generic(ArticleConfig { part_size: 10, ..Default::default() });
        let arts = enc.encode_multi_part(&[7u8; 25], "f.bin").unwrap();
        assert_eq!(arts.len(), 3);
        let c = enc.counters();
        assert_eq!(c.articles_encoded, 3);
        assert_eq!(c.bytes_raw, 25);
        let total: u64 = arts.iter().map(|a| a.data.len() as u64).sum();
        assert_eq!(c.bytes_encoded + c.bytes_overhead, total);
        assert!(enc.telemetry().sanity_check());
    }
}
