//! Currency registry and lookups

use crate::currency::{CurrencyRecord, BITCOIN, DOGECOIN, LITECOIN, TESTNET};
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Currencies known to the library, in display order
pub const BUILTIN_CURRENCIES: [CurrencyRecord; 4] = [BITCOIN, LITECOIN, DOGECOIN, TESTNET];

static COINS: Lazy<CurrencyRegistry> = Lazy::new(|| {
    CurrencyRegistry::new(BUILTIN_CURRENCIES.to_vec())
        .expect("built-in currency table must have unique codes and version bytes")
});

/// Process-wide registry of the built-in currencies
pub fn registry() -> &'static CurrencyRegistry {
    &COINS
}

/// Ordered, immutable collection of currency records with indexed lookups
#[derive(Debug, Clone)]
pub struct CurrencyRegistry {
    records: Vec<CurrencyRecord>,
    by_code: HashMap<String, usize>,
    by_network_version: HashMap<u8, usize>,
    by_private_key_prefix: HashMap<u8, usize>,
}

impl CurrencyRegistry {
    /// Build a registry from records.
    ///
    /// Codes (case-insensitively), network versions and private-key prefixes
    /// must each be unique; a collision fails with [`Error::DuplicateEntry`].
    pub fn new(records: Vec<CurrencyRecord>) -> Result<Self> {
        let mut by_code = HashMap::with_capacity(records.len());
        let mut by_network_version = HashMap::with_capacity(records.len());
        let mut by_private_key_prefix = HashMap::with_capacity(records.len());

        for (idx, record) in records.iter().enumerate() {
            let code = record.code.to_ascii_uppercase();
            if by_code.insert(code.clone(), idx).is_some() {
                return Err(Error::DuplicateEntry {
                    field: "code",
                    value: code,
                });
            }
            if by_network_version.insert(record.network_version, idx).is_some() {
                return Err(Error::DuplicateEntry {
                    field: "network_version",
                    value: format!("{:#04x}", record.network_version),
                });
            }
            if by_private_key_prefix
                .insert(record.private_key_prefix, idx)
                .is_some()
            {
                return Err(Error::DuplicateEntry {
                    field: "private_key_prefix",
                    value: format!("{:#04x}", record.private_key_prefix),
                });
            }
        }

        Ok(Self {
            records,
            by_code,
            by_network_version,
            by_private_key_prefix,
        })
    }

    /// Look up by code, ignoring case
    pub fn by_code(&self, code: &str) -> Result<&CurrencyRecord> {
        self.by_code
            .get(&code.to_ascii_uppercase())
            .map(|idx| &self.records[*idx])
            .ok_or_else(|| Error::UnknownCurrency(code.to_string()))
    }

    /// Look up by address version byte
    pub fn by_network_version(&self, version: u8) -> Result<&CurrencyRecord> {
        self.by_network_version
            .get(&version)
            .map(|idx| &self.records[*idx])
            .ok_or_else(|| Error::UnknownCurrency(format!("network version {:#04x}", version)))
    }

    /// Look up by WIF version byte
    pub fn by_private_key_prefix(&self, prefix: u8) -> Result<&CurrencyRecord> {
        self.by_private_key_prefix
            .get(&prefix)
            .map(|idx| &self.records[*idx])
            .ok_or_else(|| Error::UnknownCurrency(format!("private key prefix {:#04x}", prefix)))
    }

    /// Whether `text` has the WIF shape of `record`
    pub fn matches_wif_prefix(record: &CurrencyRecord, text: &[u8]) -> bool {
        record.matches_wif_prefix(text)
    }

    /// Iterate records in table order
    pub fn iter(&self) -> impl Iterator<Item = &CurrencyRecord> {
        self.records.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
