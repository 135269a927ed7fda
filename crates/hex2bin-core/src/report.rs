use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

/// N_in and N_out, measured after the copy phase and before padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ByteCounts {
    pub input_tokens: u64,
    pub output_bytes: u64,
}

impl ByteCounts {
    pub fn matches(&self) -> bool {
        self.input_tokens == self.output_bytes
    }
}

impl fmt::Display for ByteCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "input tokens: {}", self.input_tokens)?;
        writeln!(f, "output bytes: {}", self.output_bytes)?;
        if self.matches() {
            write!(f, "byte counts match")
        } else {
            write!(f, "byte counts differ")
        }
    }
}

/// Outcome of a successful conversion.
///
/// Contains no timestamps, so the same input always yields the same report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    /// Whitespace-delimited tokens in the input (N_in).
    pub input_tokens: u64,

    /// Image size after the copy phase, before padding (N_out).
    pub bytes_written: u64,

    /// Zero bytes appended during padding.
    pub padding_bytes: u64,

    /// Image size after padding.
    pub final_size: u64,

    /// Lowercase hex SHA-256 of the decoded bytes followed by `padding_bytes`
    /// zeros. Computed in memory, not read back from the image.
    pub sha256: String,
}

impl ConversionReport {
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// The padding and hash lines. Counts are rendered by [`ByteCounts`].
impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "padded to {} bytes", self.final_size)?;
        write!(f, "sha256: {}", self.sha256)
    }
}

/// SHA-256 of `data` followed by `zeros` zero bytes, as lowercase hex.
pub(crate) fn sha256_padded_hex(data: &[u8], zeros: u64) -> String {
    const ZERO_BLOCK: [u8; 4096] = [0u8; 4096];

    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut left = zeros;
    while left > 0 {
        let n = left.min(ZERO_BLOCK.len() as u64) as usize;
        hasher.update(&ZERO_BLOCK[..n]);
        left -= n as u64;
    }
    hex::encode(hasher.finalize())
}
