//! Private key material and derivation
//!
//! A [`KeyMaterial`] pairs one secp256k1 secret scalar with a currency and
//! derives the WIF export string, the public key and the pay-to-pubkey-hash
//! address from it. Callers describe what they are handing in through
//! [`KeyInput`]; the parser then normalizes every accepted shape to the same
//! 32-byte big-endian secret.

use crate::address::PublicAddress;
use crate::{base58, envelope, Error, Result};
use cryptocoins_params::CurrencyRecord;
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use ripemd::Ripemd160;
use secp256k1::constants::CURVE_ORDER;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secret scalar size in bytes
pub const SECRET_LEN: usize = 32;

/// RIPEMD-160 digest size in bytes
pub const HASH160_LEN: usize = 20;

static SECP: Lazy<Secp256k1<secp256k1::All>> = Lazy::new(Secp256k1::new);

/// 256-bit secret scalar, stored big-endian.
///
/// Zeroized on drop and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret([u8; SECRET_LEN]);

impl Secret {
    /// Wrap a big-endian 32-byte integer
    pub fn from_be_bytes(bytes: [u8; SECRET_LEN]) -> Self {
        Self(bytes)
    }

    /// Secret from a small integer
    pub fn from_u128(value: u128) -> Self {
        let mut bytes = [0u8; SECRET_LEN];
        bytes[SECRET_LEN - 16..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Parse a hexadecimal integer of at most 64 digits, with or without `0x`
    pub fn from_hex(text: &str) -> Result<Self> {
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        if digits.is_empty() || digits.len() > SECRET_LEN * 2 {
            return Err(Error::UnrecognizedKeyFormat(format!(
                "hex scalar must have 1 to {} digits, got {}",
                SECRET_LEN * 2,
                digits.len()
            )));
        }

        let mut padded = format!("{:0>width$}", digits, width = SECRET_LEN * 2);
        let mut bytes = [0u8; SECRET_LEN];
        let decoded = hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| Error::UnrecognizedKeyFormat(format!("invalid hex scalar: {e}")));
        padded.zeroize();
        decoded?;
        Ok(Self(bytes))
    }

    /// Big-endian bytes
    pub fn as_bytes(&self) -> &[u8; SECRET_LEN] {
        &self.0
    }

    /// Whether `1 <= self < n` for the secp256k1 group order `n`.
    ///
    /// Equal-length big-endian byte strings compare like the integers
    /// they encode.
    pub fn is_valid_scalar(&self) -> bool {
        self.0 != [0u8; SECRET_LEN] && self.0 < CURVE_ORDER
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Draw a uniformly random secret in `[1, n)`.
///
/// Out-of-range draws are discarded and redrawn; reducing modulo `n` would
/// bias small values because `n` is not a power of two.
pub fn generate_secret<R: RngCore + CryptoRng>(rng: &mut R) -> Secret {
    let mut rejected = 0u32;
    loop {
        let mut candidate = Secret([0u8; SECRET_LEN]);
        rng.fill_bytes(&mut candidate.0);
        if candidate.is_valid_scalar() {
            return candidate;
        }
        rejected += 1;
        tracing::debug!(rejected, "Secret candidate outside curve order, redrawing");
    }
}

/// `RIPEMD160(SHA256(data))`
pub fn hash160(data: &[u8]) -> [u8; HASH160_LEN] {
    let digest = Ripemd160::digest(Sha256::digest(data));
    let mut out = [0u8; HASH160_LEN];
    out.copy_from_slice(&digest);
    out
}

/// Accepted private key inputs
#[derive(Clone)]
pub enum KeyInput {
    /// Generate a fresh secret from the OS entropy source
    Generated,
    /// Integer secret, used as given
    RawScalar(Secret),
    /// 32-byte big-endian integer
    RawBytes32([u8; SECRET_LEN]),
    /// Wallet Import Format text
    WifText(String),
}

impl fmt::Debug for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyInput::Generated => f.write_str("Generated"),
            KeyInput::RawScalar(_) => f.write_str("RawScalar(<redacted>)"),
            KeyInput::RawBytes32(_) => f.write_str("RawBytes32(<redacted>)"),
            KeyInput::WifText(_) => f.write_str("WifText(<redacted>)"),
        }
    }
}

/// Secret key bound to a currency
#[derive(Clone)]
pub struct KeyMaterial {
    currency: CurrencyRecord,
    secret: Secret,
}

impl KeyMaterial {
    /// Build key material from any accepted input.
    ///
    /// Raw scalars are not range-checked here; an out-of-range secret fails
    /// later in [`public_key`](Self::public_key) and
    /// [`address`](Self::address).
    pub fn from_input(currency: &CurrencyRecord, input: KeyInput) -> Result<Self> {
        match input {
            KeyInput::Generated => Ok(Self::generate(currency)),
            KeyInput::RawScalar(secret) => Ok(Self::from_secret(currency, secret)),
            KeyInput::RawBytes32(mut bytes) => {
                let key = Self::from_secret(currency, Secret::from_be_bytes(bytes));
                bytes.zeroize();
                Ok(key)
            }
            KeyInput::WifText(mut text) => {
                let key = Self::parse_key_bytes(currency, text.as_bytes());
                text.zeroize();
                key
            }
        }
    }

    /// Generate a fresh key from the OS entropy source
    pub fn generate(currency: &CurrencyRecord) -> Self {
        Self::generate_with(currency, &mut OsRng)
    }

    /// Generate a fresh key from `rng`
    pub fn generate_with<R: RngCore + CryptoRng>(currency: &CurrencyRecord, rng: &mut R) -> Self {
        Self::from_secret(currency, generate_secret(rng))
    }

    /// Wrap an existing secret
    pub fn from_secret(currency: &CurrencyRecord, secret: Secret) -> Self {
        Self {
            currency: *currency,
            secret,
        }
    }

    /// Parse a WIF string for `currency`
    pub fn from_wif(currency: &CurrencyRecord, wif: &str) -> Result<Self> {
        Self::parse_key_bytes(currency, wif.as_bytes())
    }

    /// Normalize text or raw bytes to a secret.
    ///
    /// WIF-shaped input for `currency` is decoded and its envelope checked
    /// against the currency's private-key prefix. Any other input of exactly
    /// 32 bytes is read as a big-endian integer. Everything else fails with
    /// [`Error::UnrecognizedKeyFormat`].
    pub fn parse_key_bytes(currency: &CurrencyRecord, data: &[u8]) -> Result<Self> {
        if currency.matches_wif_prefix(data) {
            let text = std::str::from_utf8(data)
                .map_err(|_| Error::UnrecognizedKeyFormat("WIF text is not ASCII".to_string()))?;
            let mut decoded = base58::decode(text)?;
            let unwrapped = envelope::unwrap(&decoded, Some(currency.private_key_prefix));
            decoded.zeroize();
            let (_, mut payload) = unwrapped?;

            let secret = payload_to_secret(&payload);
            payload.zeroize();
            return secret.map(|secret| Self::from_secret(currency, secret));
        }

        match <[u8; SECRET_LEN]>::try_from(data) {
            Ok(bytes) => Ok(Self::from_secret(currency, Secret::from_be_bytes(bytes))),
            Err(_) => Err(Error::UnrecognizedKeyFormat(format!(
                "{} bytes is neither a {} WIF string nor a {}-byte secret",
                data.len(),
                currency.code,
                SECRET_LEN
            ))),
        }
    }

    /// Currency this key belongs to
    pub fn currency(&self) -> &CurrencyRecord {
        &self.currency
    }

    /// The secret scalar
    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    /// Export in Wallet Import Format
    pub fn wif(&self) -> String {
        let mut framed = envelope::wrap(self.currency.private_key_prefix, self.secret.as_bytes());
        let wif = base58::encode(&framed);
        framed.zeroize();
        wif
    }

    /// The secret as a secp256k1 secret key
    pub fn secret_key(&self) -> Result<SecretKey> {
        SecretKey::from_slice(self.secret.as_bytes()).map_err(|e| Error::InvalidScalar(e.to_string()))
    }

    /// `G * secret`
    pub fn public_key(&self) -> Result<PublicKey> {
        Ok(PublicKey::from_secret_key(&SECP, &self.secret_key()?))
    }

    /// Pay-to-pubkey-hash address of the uncompressed public key
    pub fn address(&self) -> Result<String> {
        // 0x04 ‖ x ‖ y
        let point = self.public_key()?.serialize_uncompressed();
        let framed = envelope::wrap(self.currency.network_version, &hash160(&point));
        Ok(base58::encode(&framed))
    }

    /// Address as a validated [`PublicAddress`]
    pub fn public_address(&self) -> Result<PublicAddress> {
        Ok(PublicAddress::from_parts(self.address()?, self.currency))
    }
}

fn payload_to_secret(payload: &[u8]) -> Result<Secret> {
    <[u8; SECRET_LEN]>::try_from(payload)
        .map(Secret::from_be_bytes)
        .map_err(|_| Error::InvalidPayloadLength {
            expected: SECRET_LEN,
            actual: payload.len(),
        })
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("currency", &self.currency.code)
            .field("secret", &self.secret)
            .finish()
    }
}

impl fmt::Display for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.address() {
            Ok(address) => write!(f, "{}: {}", self.currency, address),
            Err(_) => write!(f, "{}: <invalid key>", self.currency),
        }
    }
}

// Test helpers
#[cfg(any(test, feature = "test-helpers"))]
impl KeyMaterial {
    /// Fixed key for tests (secret from the Bitcoin wiki address walkthrough)
    pub fn test_key(currency: &CurrencyRecord) -> Self {
        let mut bytes = [0u8; SECRET_LEN];
        hex::decode_to_slice(
            "18e14a7b6a307f426a94f8114701e7c8e774e7f9a47e2c2035db29a206321725",
            &mut bytes,
        )
        .expect("fixed test secret is valid hex");
        Self::from_secret(currency, Secret::from_be_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptocoins_params::{registry, BITCOIN, DOGECOIN, LITECOIN, TESTNET};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BTC_WIF: &str = "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ";
    const BTC_ADDRESS: &str = "1GAehh7TsJAHuUAeKZcXf5CnwuGuGgyX2S";

    /// Replays fixed 32-byte draws
    struct ScriptedRng {
        draws: Vec<[u8; 32]>,
        next: usize,
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            panic!("only fill_bytes is scripted")
        }

        fn next_u64(&mut self) -> u64 {
            panic!("only fill_bytes is scripted")
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.copy_from_slice(&self.draws[self.next]);
            self.next += 1;
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for ScriptedRng {}

    #[test]
    fn test_wif_import_and_address() {
        let key = KeyMaterial::from_input(&BITCOIN, KeyInput::WifText(BTC_WIF.to_string())).unwrap();
        assert_eq!(key.wif(), BTC_WIF);
        assert_eq!(key.address().unwrap(), BTC_ADDRESS);
        assert_eq!(
            hex::encode(key.secret().as_bytes()),
            "0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d"
        );
    }

    #[test]
    fn test_raw_scalar_address() {
        let secret =
            Secret::from_hex("0x18E14A7B6A307F426A94F8114701E7C8E774E7F9A47E2C2035DB29A206321725").unwrap();
        let key = KeyMaterial::from_input(&BITCOIN, KeyInput::RawScalar(secret)).unwrap();
        assert_eq!(key.address().unwrap(), "16UwLL9Risc3QfPqBUvKofHmBQ7wMtjvM");
        assert_eq!(
            KeyMaterial::test_key(&BITCOIN).address().unwrap(),
            "16UwLL9Risc3QfPqBUvKofHmBQ7wMtjvM"
        );
    }

    #[test]
    fn test_litecoin_wif() {
        let wif = "6vcHcscccKuBVdka8qXkb2aD5YPvxzf6zv5RfFrVNi5JYGJ55W7";
        let key = KeyMaterial::from_wif(&LITECOIN, wif).unwrap();
        assert_eq!(key.address().unwrap(), "LZSQEQSKQeyx64rTZAND3FkfNWBAFzg4WQ");
        assert_eq!(key.to_string(), "LTC: LZSQEQSKQeyx64rTZAND3FkfNWBAFzg4WQ");
    }

    #[test]
    fn test_raw_bytes_match_wif_secret() {
        let from_wif = KeyMaterial::from_wif(&BITCOIN, BTC_WIF).unwrap();
        let bytes = *from_wif.secret().as_bytes();
        let from_bytes = KeyMaterial::from_input(&BITCOIN, KeyInput::RawBytes32(bytes)).unwrap();
        assert_eq!(from_bytes.secret(), from_wif.secret());
        assert_eq!(from_bytes.wif(), BTC_WIF);
    }

    #[test]
    fn test_parse_key_bytes_accepts_32_raw_bytes() {
        let key = KeyMaterial::parse_key_bytes(&BITCOIN, &[7u8; 32]).unwrap();
        assert_eq!(key.secret().as_bytes(), &[7u8; 32]);
    }

    #[test]
    fn test_unrecognized_key_format() {
        let err = KeyMaterial::parse_key_bytes(&BITCOIN, &[1u8; 31]).unwrap_err();
        assert!(matches!(err, Error::UnrecognizedKeyFormat(_)));

        // A Bitcoin WIF does not have the Litecoin shape and is not 32 bytes.
        let err = KeyMaterial::from_wif(&LITECOIN, BTC_WIF).unwrap_err();
        assert!(matches!(err, Error::UnrecognizedKeyFormat(_)));
    }

    #[test]
    fn test_shared_wif_prefix_is_rejected_by_version() {
        let ltc = KeyMaterial::test_key(&LITECOIN);
        let wif = ltc.wif();
        assert!(DOGECOIN.matches_wif_prefix(wif.as_bytes()));
        assert_eq!(
            KeyMaterial::from_wif(&DOGECOIN, &wif).unwrap_err(),
            Error::VersionMismatch {
                expected: DOGECOIN.private_key_prefix,
                found: LITECOIN.private_key_prefix
            }
        );
    }

    #[test]
    fn test_corrupted_wif_checksum() {
        let mut tampered = BTC_WIF.to_string();
        tampered.replace_range(50..51, "K");
        assert_eq!(
            KeyMaterial::from_wif(&BITCOIN, &tampered).unwrap_err(),
            Error::ChecksumMismatch
        );
    }

    #[test]
    fn test_wif_prefix_per_currency() {
        for currency in registry().iter() {
            let key = KeyMaterial::test_key(currency);
            let wif = key.wif();
            assert_eq!(wif.len(), cryptocoins_params::WIF_LENGTH);
            assert_eq!(wif.as_bytes()[0], currency.wif_prefix, "{}", currency.code);
        }
    }

    #[test]
    fn test_generated_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        for currency in [BITCOIN, LITECOIN, DOGECOIN, TESTNET] {
            let key = KeyMaterial::generate_with(&currency, &mut rng);
            let parsed = KeyMaterial::from_input(&currency, KeyInput::WifText(key.wif())).unwrap();
            assert_eq!(parsed.secret(), key.secret());
            assert_eq!(parsed.address().unwrap(), key.address().unwrap());
        }
    }

    #[test]
    fn test_generate_from_os_entropy() {
        let key = KeyMaterial::from_input(&TESTNET, KeyInput::Generated).unwrap();
        assert!(key.secret().is_valid_scalar());
        assert!(key.address().unwrap().starts_with(&['m', 'n'][..]));
    }

    #[test]
    fn test_rejection_sampling_redraws() {
        let mut rng = ScriptedRng {
            draws: vec![[0u8; 32], [0xFF; 32], CURVE_ORDER, [0x01; 32]],
            next: 0,
        };
        let secret = generate_secret(&mut rng);
        assert_eq!(rng.next, 4);
        assert_eq!(secret.as_bytes(), &[0x01; 32]);
    }

    #[test]
    fn test_out_of_range_scalar_fails_downstream() {
        let zero = KeyMaterial::from_input(&BITCOIN, KeyInput::RawScalar(Secret::from_u128(0))).unwrap();
        assert!(matches!(zero.public_key(), Err(Error::InvalidScalar(_))));
        assert!(matches!(zero.address(), Err(Error::InvalidScalar(_))));
        assert_eq!(zero.to_string(), "BTC: <invalid key>");

        let order = KeyMaterial::from_secret(&BITCOIN, Secret::from_be_bytes(CURVE_ORDER));
        assert!(order.address().is_err());
    }

    #[test]
    fn test_scalar_range() {
        assert!(!Secret::from_u128(0).is_valid_scalar());
        assert!(Secret::from_u128(1).is_valid_scalar());
        let mut below = CURVE_ORDER;
        below[31] -= 1;
        assert!(Secret::from_be_bytes(below).is_valid_scalar());
        assert!(!Secret::from_be_bytes(CURVE_ORDER).is_valid_scalar());
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Secret::from_hex("ff").unwrap(), Secret::from_u128(255));
        assert_eq!(Secret::from_hex("0x1").unwrap(), Secret::from_u128(1));
        assert!(Secret::from_hex("").is_err());
        assert!(Secret::from_hex("0x").is_err());
        assert!(Secret::from_hex("zz").is_err());
        assert!(Secret::from_hex(&"1".repeat(65)).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let key = KeyMaterial::from_wif(&BITCOIN, BTC_WIF).unwrap();
        let rendered = format!("{:?}", key);
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("0c28fca3"));
        let input = format!("{:?}", KeyInput::WifText(BTC_WIF.to_string()));
        assert!(!input.contains(BTC_WIF));
    }

    #[test]
    fn test_public_address_from_key() {
        let key = KeyMaterial::from_wif(&BITCOIN, BTC_WIF).unwrap();
        let address = key.public_address().unwrap();
        assert_eq!(address.as_str(), BTC_ADDRESS);
        assert_eq!(address.currency(), &BITCOIN);
    }
}
