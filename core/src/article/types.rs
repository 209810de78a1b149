//! article/types.rs
//! Framed article values, framing metadata and assembler configuration.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_LINE_SIZE, DEFAULT_PART_SIZE, MAX_LINE_SIZE};
use crate::encode::EncoderConfig;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArticleError {
    /// Rejected before any encoding work.
    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument { field: &'static str, reason: &'static str },

    #[error("malformed article: {0}")]
    Malformed(String),

    #[error("`{line}` line is missing `{field}`")]
    MissingField { line: &'static str, field: &'static str },

    #[error("size mismatch: declared {declared}, decoded {actual}")]
    SizeMismatch { declared: u64, actual: u64 },

    #[error("invalid config: {0}")]
    Config(String),
}

/// One framed article, ready for posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YencArticle {
    /// Full article text: header, payload and trailer lines.
    pub data: Bytes,
    pub part_number: u32,
    pub total_parts: u32,
    /// CRC-32 of the whole file.
    pub crc32: u32,
    /// CRC-32 of this part's raw bytes.
    pub part_crc32: u32,
}

impl YencArticle {
    #[inline]
    pub fn is_multi_part(&self) -> bool {
        self.total_parts > 1
    }
}

/// Article assembler settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleConfig {
    pub line_size: usize,
    /// Raw bytes per part for multi-part encoding.
    pub part_size: usize,
    pub escape_whitespace: bool,
}

impl Default for ArticleConfig {
    fn default() -> Self {
        Self {
            line_size: DEFAULT_LINE_SIZE,
            part_size: DEFAULT_PART_SIZE,
            escape_whitespace: false,
        }
    }
}

impl ArticleConfig {
    pub fn validate(&self) -> Result<(), ArticleError> {
        if self.line_size == 0 || self.line_size > MAX_LINE_SIZE {
            return Err(ArticleError::InvalidArgument {
                field: "line_size",
                reason: "must be between 1 and 997",
            });
        }
        if self.part_size == 0 {
            return Err(ArticleError::InvalidArgument {
                field: "part_size",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ArticleError> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| ArticleError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    #[inline]
    pub fn encoder_config(&self) -> EncoderConfig {
        EncoderConfig {
            line_size: self.line_size,
            escape_whitespace: self.escape_whitespace,
        }
    }
}

/// Parsed `=ybegin` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YencHeader {
    pub part: Option<u32>,
    pub total: Option<u32>,
    pub line: usize,
    /// Full file size.
    pub size: u64,
    pub name: String,
}

/// Parsed `=ypart` line. `begin` and `end` are 1-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YencPart {
    pub begin: u64,
    pub end: u64,
}

impl YencPart {
    /// 0-based offset of the part in the file.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.begin.saturating_sub(1)
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.end.saturating_add(1).saturating_sub(self.begin)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parsed `=yend` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YencTrailer {
    /// Size of this part.
    pub size: u64,
    pub part: Option<u32>,
    pub pcrc32: Option<u32>,
    pub crc32: Option<u32>,
}

/// A parsed and verified article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedArticle {
    pub header: YencHeader,
    pub part: Option<YencPart>,
    pub trailer: YencTrailer,
    pub data: Bytes,
    /// CRC-32 computed over `data`.
    pub crc32: u32,
}

impl DecodedArticle {
    #[inline]
    pub fn is_multi_part(&self) -> bool {
        self.header.part.is_some()
    }

    /// 0-based offset of this payload in the file.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.part.map(|p| p.offset()).unwrap_or(0)
    }
}
