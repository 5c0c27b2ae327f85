//! Public address validation
//!
//! Checks an address string against the base-58 envelope format and the
//! currency registry. No private key is involved.

use crate::keys::HASH160_LEN;
use crate::{base58, envelope, Error, Result};
use cryptocoins_params::{registry, CurrencyRecord, CurrencyRegistry};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Address that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PublicAddress {
    address: String,
    currency: CurrencyRecord,
}

impl PublicAddress {
    /// Validate `text` against the built-in registry.
    ///
    /// When `expected` is given, an address of any other currency fails with
    /// [`Error::CurrencyMismatch`].
    pub fn parse(text: &str, expected: Option<&CurrencyRecord>) -> Result<Self> {
        AddressValidator::new().parse(text, expected)
    }

    pub(crate) fn from_parts(address: String, currency: CurrencyRecord) -> Self {
        Self { address, currency }
    }

    /// The address text
    pub fn as_str(&self) -> &str {
        &self.address
    }

    /// Currency identified from the version byte
    pub fn currency(&self) -> &CurrencyRecord {
        &self.currency
    }
}

impl fmt::Display for PublicAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl FromStr for PublicAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, None)
    }
}

/// Outcome of a non-throwing address check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressCheck {
    /// Identified currency, when the address is valid
    pub currency: Option<CurrencyRecord>,
    /// Whether the address is well formed and its currency known
    pub is_valid: bool,
    /// Why the address was rejected
    pub reason: Option<Error>,
}

/// Validates addresses against a currency registry
#[derive(Debug, Clone, Copy)]
pub struct AddressValidator<'a> {
    registry: &'a CurrencyRegistry,
}

impl AddressValidator<'static> {
    /// Validator over the built-in currencies
    pub fn new() -> Self {
        Self {
            registry: registry(),
        }
    }
}

impl Default for AddressValidator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> AddressValidator<'a> {
    /// Validator over a custom registry
    pub fn with_registry(registry: &'a CurrencyRegistry) -> Self {
        Self { registry }
    }

    /// Check `text`, reporting failures in the result instead of as errors.
    ///
    /// Addresses routinely come from untrusted input, so decode, checksum,
    /// length and registry failures all yield `is_valid = false`.
    pub fn validate(&self, text: &str) -> AddressCheck {
        match self.identify(text) {
            Ok(currency) => AddressCheck {
                currency: Some(currency),
                is_valid: true,
                reason: None,
            },
            Err(err) => {
                tracing::debug!(category = %err.category(), "Rejected address: {}", err);
                AddressCheck {
                    currency: None,
                    is_valid: false,
                    reason: Some(err),
                }
            }
        }
    }

    /// Check `text` and return the failure as an error
    pub fn parse(&self, text: &str, expected: Option<&CurrencyRecord>) -> Result<PublicAddress> {
        let currency = self.identify(text)?;
        if let Some(expected) = expected {
            if *expected != currency {
                return Err(Error::CurrencyMismatch {
                    expected: expected.code.to_string(),
                    found: currency.code.to_string(),
                });
            }
        }
        Ok(PublicAddress::from_parts(text.to_string(), currency))
    }

    fn identify(&self, text: &str) -> Result<CurrencyRecord> {
        let decoded = base58::decode(text)?;
        let (version, payload) = envelope::unwrap(&decoded, None)?;
        if payload.len() != HASH160_LEN {
            return Err(Error::InvalidPayloadLength {
                expected: HASH160_LEN,
                actual: payload.len(),
            });
        }
        Ok(*self.registry.by_network_version(version)?)
    }
}

/// Check `text` against the built-in registry
pub fn validate(text: &str) -> AddressCheck {
    AddressValidator::new().validate(text)
}
