//! Currency parameter records

use serde::Serialize;
use std::fmt;

/// Base-58 alphabet shared by every supported currency (Bitcoin ordering).
///
/// Digits, then uppercase without `I` and `O`, then lowercase without `l`.
pub const BASE58_ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Length in characters of an uncompressed WIF string
/// (`base58(prefix ‖ 32-byte secret ‖ checksum4)`).
pub const WIF_LENGTH: usize = 51;

/// Network parameters of a single currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CurrencyRecord {
    /// Ticker-style code (uppercase)
    pub code: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Version byte of pay-to-pubkey-hash addresses
    pub network_version: u8,
    /// Version byte of WIF private keys
    pub private_key_prefix: u8,
    /// Leading character of an uncompressed WIF string (ASCII)
    pub wif_prefix: u8,
}

/// Bitcoin mainnet
pub const BITCOIN: CurrencyRecord = CurrencyRecord {
    code: "BTC",
    name: "Bitcoin",
    network_version: 0x00,
    private_key_prefix: 0x80,
    wif_prefix: b'5',
};

/// Litecoin mainnet
pub const LITECOIN: CurrencyRecord = CurrencyRecord {
    code: "LTC",
    name: "Litecoin",
    network_version: 0x30,
    private_key_prefix: 0xB0,
    wif_prefix: b'6',
};

/// Dogecoin mainnet
pub const DOGECOIN: CurrencyRecord = CurrencyRecord {
    code: "DOGE",
    name: "Dogecoin",
    network_version: 0x1E,
    private_key_prefix: 0x9E,
    wif_prefix: b'6',
};

/// Bitcoin testnet
pub const TESTNET: CurrencyRecord = CurrencyRecord {
    code: "TESTNET",
    name: "Bitcoin Testnet",
    network_version: 0x6F,
    private_key_prefix: 0xEF,
    wif_prefix: b'9',
};

impl CurrencyRecord {
    /// Cheap shape check run before any WIF decode.
    ///
    /// True when `text` starts with this currency's WIF prefix, every other
    /// character is in the base-58 alphabet, and the length is exactly
    /// [`WIF_LENGTH`]. Currencies that share a leading character are only
    /// told apart by the version byte inside the envelope.
    pub fn matches_wif_prefix(&self, text: &[u8]) -> bool {
        match text.split_first() {
            Some((first, rest)) => {
                text.len() == WIF_LENGTH
                    && *first == self.wif_prefix
                    && rest.iter().all(|c| is_base58_char(*c))
            }
            None => false,
        }
    }
}

impl fmt::Display for CurrencyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

/// Whether `c` belongs to [`BASE58_ALPHABET`]
pub fn is_base58_char(c: u8) -> bool {
    BASE58_ALPHABET.contains(&c)
}
