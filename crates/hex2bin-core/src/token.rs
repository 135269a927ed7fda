use crate::error::{Error, Result};

const DIGITS_PER_BYTE: usize = 2;

/// Decoded bytes of a hex listing, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ByteStream {
    /// Number of whitespace-delimited tokens seen in the input (N_in).
    pub token_count: u64,
    pub bytes: Vec<u8>,
}

impl ByteStream {
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Remove every carriage return, wherever it appears.
pub fn strip_carriage_returns(text: &str) -> String {
    text.replace('\r', "")
}

/// Split on any run of whitespace. Line breaks carry no meaning.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Decode one token. It must be exactly two hex digits, either case.
pub fn decode_token(index: usize, token: &str) -> Result<u8> {
    let malformed = || Error::MalformedHexToken {
        index,
        token: token.to_string(),
    };

    if token.len() != DIGITS_PER_BYTE {
        return Err(malformed());
    }
    let mut byte = [0u8; 1];
    hex::decode_to_slice(token, &mut byte).map_err(|_| malformed())?;
    Ok(byte[0])
}

/// Strip CRs, tokenize and decode a whole listing.
pub fn decode_stream(text: &str) -> Result<ByteStream> {
    let cleaned = strip_carriage_returns(text);
    let tokens = tokenize(&cleaned);

    let bytes = tokens
        .iter()
        .enumerate()
        .map(|(i, t)| decode_token(i, t))
        .collect::<Result<Vec<u8>>>()?;

    log::debug!("decoded {} tokens", tokens.len());

    Ok(ByteStream {
        token_count: tokens.len() as u64,
        bytes,
    })
}

/// Decode a listing read as raw bytes.
///
/// Bytes that are not UTF-8 become U+FFFD, so they surface as a
/// `MalformedHexToken` at their token position rather than a read failure.
pub fn decode_listing(raw: &[u8]) -> Result<ByteStream> {
    decode_stream(&String::from_utf8_lossy(raw))
}
