//! Currency parameters for Bitcoin-family coins
//!
//! This crate provides the network version bytes, private-key prefixes and
//! WIF leading characters for every supported currency, and the registry used
//! to identify a currency from an address or key string.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod currency;
pub mod registry;

pub use currency::{
    is_base58_char, CurrencyRecord, BASE58_ALPHABET, BITCOIN, DOGECOIN, LITECOIN, TESTNET, WIF_LENGTH,
};
pub use registry::{registry, CurrencyRegistry, BUILTIN_CURRENCIES};

/// Error types for parameter operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No record matches the requested code or version byte
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Two records share a value that must be unique
    #[error("Duplicate {field} in currency table: {value}")]
    DuplicateEntry {
        /// Name of the clashing field
        field: &'static str,
        /// Clashing value
        value: String,
    },
}

/// Result type for parameter operations
pub type Result<T> = std::result::Result<T, Error>;
