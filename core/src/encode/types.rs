use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LINE_SIZE;
use crate::encode::scalar::EncodeParams;

/// Encoded bytes plus the column to carry into the next call of the same stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodeResult {
    pub data: Vec<u8>,
    pub column: usize,
}

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Characters per encoded line.
    pub line_size: usize,
    /// Escape TAB/SPACE in the first and last column (yEnc 1.3 recommendation).
    pub escape_whitespace: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            line_size: DEFAULT_LINE_SIZE,
            escape_whitespace: false,
        }
    }
}

impl EncoderConfig {
    pub fn with_line_size(line_size: usize) -> Self {
        Self { line_size, ..Self::default() }
    }

    #[inline]
    pub(crate) fn params(&self) -> EncodeParams {
        EncodeParams {
            line_size: self.line_size,
            escape_whitespace: self.escape_whitespace,
        }
    }
}
