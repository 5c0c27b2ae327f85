//! Error types for cryptocoins core
//!
//! Every failure is terminal: a bad character, checksum or version byte
//! means corrupt input or a caller bug, so nothing here is retried.

use std::fmt;

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Core errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Character outside the base-58 alphabet
    #[error("Invalid base58 character {character:?} at position {index}")]
    InvalidCharacter {
        /// Offending character
        character: char,
        /// Byte offset in the input. Everything before it is ASCII, so this is
        /// also the character position.
        index: usize,
    },

    /// Decoded envelope too short to hold a version byte and checksum
    #[error("Malformed envelope: {0} bytes, need at least 5")]
    MalformedEnvelope(usize),

    /// Envelope checksum does not match its contents
    #[error("Checksum mismatch")]
    ChecksumMismatch,

    /// Envelope version byte differs from the one expected
    #[error("Version mismatch: expected {expected:#04x}, found {found:#04x}")]
    VersionMismatch {
        /// Expected version byte
        expected: u8,
        /// Version byte found in the envelope
        found: u8,
    },

    /// Envelope payload has the wrong size for its use
    #[error("Invalid payload length: expected {expected} bytes, got {actual}")]
    InvalidPayloadLength {
        /// Required payload size
        expected: usize,
        /// Actual payload size
        actual: usize,
    },

    /// Code or version byte not present in the registry
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Address or key belongs to a different currency than requested
    #[error("Currency mismatch: belongs to {found}, expected {expected}")]
    CurrencyMismatch {
        /// Currency that was requested
        expected: String,
        /// Currency embedded in the input
        found: String,
    },

    /// Private key input matches none of the accepted shapes
    #[error("Unrecognized private key format: {0}")]
    UnrecognizedKeyFormat(String),

    /// Secret is zero or not below the curve order
    #[error("Invalid secret scalar: {0}")]
    InvalidScalar(String),

    /// Currency table misconfiguration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<cryptocoins_params::Error> for Error {
    fn from(err: cryptocoins_params::Error) -> Self {
        match err {
            cryptocoins_params::Error::UnknownCurrency(code) => Error::UnknownCurrency(code),
            other @ cryptocoins_params::Error::DuplicateEntry { .. } => {
                Error::Configuration(other.to_string())
            }
        }
    }
}

impl Error {
    /// Check if error was caused by the input (vs a misconfiguration)
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Error::Configuration(_))
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidCharacter { .. } | Error::MalformedEnvelope(_) => ErrorCategory::Encoding,
            Error::ChecksumMismatch
            | Error::VersionMismatch { .. }
            | Error::InvalidPayloadLength { .. } => ErrorCategory::Integrity,
            Error::UnknownCurrency(_) | Error::CurrencyMismatch { .. } => ErrorCategory::Currency,
            Error::UnrecognizedKeyFormat(_) | Error::InvalidScalar(_) => ErrorCategory::Keys,
            Error::Configuration(_) => ErrorCategory::Internal,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Text or framing could not be decoded
    Encoding,
    /// Checksum, version or length check failed
    Integrity,
    /// Currency lookup failed
    Currency,
    /// Private key errors
    Keys,
    /// Internal/system errors
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Encoding => write!(f, "Encoding"),
            ErrorCategory::Integrity => write!(f, "Integrity"),
            ErrorCategory::Currency => write!(f, "Currency"),
            ErrorCategory::Keys => write!(f, "Keys"),
            ErrorCategory::Internal => write!(f, "Internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(Error::ChecksumMismatch.category(), ErrorCategory::Integrity);
        assert_eq!(Error::MalformedEnvelope(3).category(), ErrorCategory::Encoding);
        assert_eq!(
            Error::UnknownCurrency("XMR".to_string()).category(),
            ErrorCategory::Currency
        );
        assert_eq!(
            Error::UnrecognizedKeyFormat("x".to_string()).category(),
            ErrorCategory::Keys
        );
    }

    #[test]
    fn test_params_error_conversion() {
        let err: Error = cryptocoins_params::Error::UnknownCurrency("XMR".to_string()).into();
        assert_eq!(err, Error::UnknownCurrency("XMR".to_string()));

        let err: Error = cryptocoins_params::Error::DuplicateEntry {
            field: "code",
            value: "BTC".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_messages() {
        let err = Error::VersionMismatch {
            expected: 0x80,
            found: 0xb0,
        };
        assert_eq!(err.to_string(), "Version mismatch: expected 0x80, found 0xb0");
        assert_eq!(ErrorCategory::Keys.to_string(), "Keys");
    }
}
