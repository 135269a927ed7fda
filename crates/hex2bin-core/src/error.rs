use std::path::PathBuf;

use thiserror::Error;

/// Every way a conversion can fail.
///
/// All variants are terminal: the converter stops at the first one and never
/// removes a partially written image.
#[derive(Error, Debug)]
pub enum Error {
    #[error("destination '{}' already exists, refusing to overwrite", path.display())]
    DestinationExists { path: PathBuf },

    #[error("failed to read input '{}': {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("token #{index} '{token}' is not a two-digit hex byte")]
    MalformedHexToken { index: usize, token: String },

    #[error("input decodes to {len} bytes, which exceeds the {limit}-byte flash size")]
    InputTooLarge { len: u64, limit: u64 },

    #[error("failed to write output image: {0}")]
    Write(#[source] std::io::Error),

    #[error("could not determine output byte count: {0}")]
    CountRetrievalFailed(#[source] std::io::Error),

    #[error("byte count mismatch: {input_tokens} input tokens, {output_bytes} output bytes")]
    ByteCountMismatch { input_tokens: u64, output_bytes: u64 },

    #[error("padding failed: expected {expected} bytes, image is {actual} bytes")]
    PaddingFailed { expected: u64, actual: u64 },
}

impl Error {
    /// Stable, machine-readable identifier for the failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            Error::DestinationExists { .. } => "destination_exists",
            Error::ReadInput { .. } => "read_input",
            Error::MalformedHexToken { .. } => "malformed_hex_token",
            Error::InputTooLarge { .. } => "input_too_large",
            Error::Write(_) => "write",
            Error::CountRetrievalFailed(_) => "count_retrieval_failed",
            Error::ByteCountMismatch { .. } => "byte_count_mismatch",
            Error::PaddingFailed { .. } => "padding_failed",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_token_names_the_token() {
        let err = Error::MalformedHexToken {
            index: 3,
            token: "ZZ".to_string(),
        };
        let s = err.to_string();
        assert!(s.contains("#3"));
        assert!(s.contains("'ZZ'"));
        assert_eq!(err.code(), "malformed_hex_token");
    }

    #[test]
    fn mismatch_reports_both_counts() {
        let err = Error::ByteCountMismatch {
            input_tokens: 4,
            output_bytes: 3,
        };
        let s = err.to_string();
        assert!(s.contains("4 input tokens"));
        assert!(s.contains("3 output bytes"));
    }

    #[test]
    fn destination_exists_shows_path() {
        let err = Error::DestinationExists {
            path: PathBuf::from("out.bin"),
        };
        assert!(err.to_string().contains("out.bin"));
        assert_eq!(err.code(), "destination_exists");
    }
}
