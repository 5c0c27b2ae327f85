//! REST balance client

use crate::{Error, Result};
use cryptocoins_core::{CurrencyRecord, PublicAddress};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default request template; `{network}` and `{address}` are substituted
pub const DEFAULT_URL_TEMPLATE: &str = "https://{network}.blockr.io/api/v1/address/balance/{address}";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Balance service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    /// URL template with `{network}` and `{address}` placeholders
    pub url_template: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Service network name for a currency, if the service tracks it
pub fn network_slug(currency: &CurrencyRecord) -> Option<&'static str> {
    match currency.code {
        "BTC" => Some("btc"),
        "LTC" => Some("ltc"),
        "TESTNET" => Some("tbtc"),
        _ => None,
    }
}

#[derive(Deserialize)]
struct BalanceResponse {
    data: BalanceData,
}

#[derive(Deserialize)]
struct BalanceData {
    balance: f64,
}

/// Extract the balance from a service response body
pub fn parse_balance_response(body: &str) -> Result<f64> {
    let response: BalanceResponse =
        serde_json::from_str(body).map_err(|e| Error::Decode(format!("JSON decode error: {}", e)))?;
    Ok(response.data.balance)
}

/// Balance service client
pub struct BalanceClient {
    config: BalanceConfig,
    client: reqwest::Client,
}

impl BalanceClient {
    /// Create a client for `config`
    pub fn new(config: BalanceConfig) -> Result<Self> {
        if !config.url_template.contains("{address}") {
            return Err(Error::Config(
                "URL template must contain an {address} placeholder".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Active configuration
    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    /// Request URL for `address`
    pub fn balance_url(&self, address: &PublicAddress) -> Result<String> {
        let network = network_slug(address.currency())
            .ok_or_else(|| Error::UnsupportedCurrency(address.currency().code.to_string()))?;
        Ok(self
            .config
            .url_template
            .replace("{network}", network)
            .replace("{address}", address.as_str()))
    }

    /// Fetch the balance of `address`
    pub async fn get_balance(&self, address: &PublicAddress) -> Result<f64> {
        let url = self.balance_url(address)?;
        tracing::info!(currency = %address.currency(), "Querying balance for {}", address);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Http(format!("HTTP error: {}", response.status())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Http(format!("Failed to read body: {}", e)))?;

        parse_balance_response(&body)
    }
}
