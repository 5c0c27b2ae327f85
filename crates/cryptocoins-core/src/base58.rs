//! Base-58 text codec
//!
//! Treats the input as a big-endian unsigned integer written in base 58
//! with the Bitcoin alphabet ([`BASE58_ALPHABET`]). Leading zero bytes carry
//! no magnitude, so each one is written as a leading `'1'` and restored on
//! decode. The number itself always takes at least one digit: a zero value
//! (empty or all-zero input) gets one `'1'` more than it has zero bytes, so
//! `[]` encodes to `"1"` and `[0]` to `"11"`.

use crate::{Error, Result};
pub use cryptocoins_params::BASE58_ALPHABET;

/// Encode bytes as base-58 text
pub fn encode(bytes: &[u8]) -> String {
    if bytes.iter().all(|b| *b == 0) {
        return "1".repeat(bytes.len() + 1);
    }
    bs58::encode(bytes)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_string()
}

/// Decode base-58 text.
///
/// Fails with [`Error::InvalidCharacter`] on the first character outside
/// the alphabet; its `index` is a byte offset into `text`.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    // All-'1' text is a zero value: the last '1' is its digit
    if !text.is_empty() && text.bytes().all(|c| c == b'1') {
        return Ok(vec![0u8; text.len() - 1]);
    }
    bs58::decode(text)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| map_decode_error(text, e))
}

fn map_decode_error(text: &str, err: bs58::decode::Error) -> Error {
    match err {
        bs58::decode::Error::InvalidCharacter { character, index } => {
            Error::InvalidCharacter { character, index }
        }
        bs58::decode::Error::NonAsciiCharacter { index } => Error::InvalidCharacter {
            character: text[index..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER),
            index,
        },
        // Remaining variants come from buffer and check modes that are not used here.
        _ => Error::InvalidCharacter {
            character: char::REPLACEMENT_CHARACTER,
            index: 0,
        },
    }
}
