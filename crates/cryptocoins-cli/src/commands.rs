//! Command implementations

use anyhow::{Context, Result};
use cryptocoins_core::{registry, AddressValidator, CurrencyRecord, KeyInput, KeyMaterial, Secret};
use cryptocoins_net::{BalanceClient, BalanceConfig};
use serde::Serialize;

/// Derived key, as printed
#[derive(Debug, Serialize)]
pub struct KeyReport {
    pub currency: &'static str,
    pub address: String,
    pub wif: String,
}

/// Address check, as printed
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub address: String,
    pub valid: bool,
    pub currency: Option<&'static str>,
    pub reason: Option<String>,
}

/// Balance lookup, as printed
#[derive(Debug, Serialize)]
pub struct BalanceReport {
    pub address: String,
    pub currency: &'static str,
    pub balance: f64,
}

pub fn lookup_currency(code: &str) -> Result<&'static CurrencyRecord> {
    registry()
        .by_code(code)
        .with_context(|| format!("supported currencies: {}", supported_codes()))
}

fn supported_codes() -> String {
    registry().iter().map(|c| c.code).collect::<Vec<_>>().join(", ")
}

/// Map a command-line key argument to a [`KeyInput`].
///
/// `0x`-prefixed text is a hex integer, 64 bare hex digits are 32 raw bytes,
/// anything else goes through WIF parsing.
pub fn parse_key_arg(text: &str) -> Result<KeyInput> {
    if text.starts_with("0x") || text.starts_with("0X") {
        return Ok(KeyInput::RawScalar(Secret::from_hex(text)?));
    }
    if text.len() == 64 && text.bytes().all(|b| b.is_ascii_hexdigit()) {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(text, &mut bytes).context("invalid hex private key")?;
        return Ok(KeyInput::RawBytes32(bytes));
    }
    Ok(KeyInput::WifText(text.to_string()))
}

fn report(key: &KeyMaterial) -> Result<KeyReport> {
    Ok(KeyReport {
        currency: key.currency().code,
        address: key.address()?,
        wif: key.wif(),
    })
}

pub fn new_keys(currency: &CurrencyRecord, count: u32) -> Result<Vec<KeyReport>> {
    tracing::info!(%currency, count, "Generating keys");
    (0..count)
        .map(|_| report(&KeyMaterial::from_input(currency, KeyInput::Generated)?))
        .collect()
}

pub fn show_key(currency: &CurrencyRecord, key: &str) -> Result<KeyReport> {
    let input = parse_key_arg(key)?;
    let key = KeyMaterial::from_input(currency, input)
        .with_context(|| format!("not a valid {} private key", currency.code))?;
    report(&key)
}

pub fn validate_address(address: &str, expected: Option<&CurrencyRecord>) -> ValidationReport {
    let validator = AddressValidator::new();
    let (valid, currency, reason) = match validator.parse(address, expected) {
        Ok(parsed) => (true, Some(parsed.currency().code), None),
        Err(err) => (false, None, Some(err.to_string())),
    };
    ValidationReport {
        address: address.to_string(),
        valid,
        currency,
        reason,
    }
}

pub async fn query_balance(address: &str, config: BalanceConfig) -> Result<BalanceReport> {
    let parsed = AddressValidator::new()
        .parse(address, None)
        .with_context(|| format!("invalid address {address}"))?;
    let client = BalanceClient::new(config)?;
    let balance = client.get_balance(&parsed).await?;
    Ok(BalanceReport {
        address: parsed.to_string(),
        currency: parsed.currency().code,
        balance,
    })
}

pub fn currencies() -> Vec<CurrencyRecord> {
    registry().iter().copied().collect()
}
