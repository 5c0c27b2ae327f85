//! Error types

/// Balance query errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The balance service has no endpoint for this currency
    #[error("Balance lookup not supported for {0}")]
    UnsupportedCurrency(String),

    /// Request failed or returned a non-success status
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body was not the expected JSON
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
