//! Command-line tool for generating and checking coin addresses

mod commands;

use clap::{Parser, Subcommand};
use cryptocoins_net::balance::{DEFAULT_TIMEOUT_SECS, DEFAULT_URL_TEMPLATE};
use cryptocoins_net::BalanceConfig;
use serde::Serialize;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "generate-coin-address")]
#[command(about = "Generate, inspect and validate Bitcoin-family addresses", long_about = None)]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate fresh private keys
    New {
        /// Currency code
        #[arg(short, long, default_value = "BTC")]
        currency: String,

        /// Number of keys to generate
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,
    },

    /// Derive the address and WIF of an existing private key
    Show {
        /// Currency code
        #[arg(short, long, default_value = "BTC")]
        currency: String,

        /// WIF string, 0x-prefixed hex integer, or 64 hex digits
        key: String,
    },

    /// Validate an address
    Validate {
        /// Require the address to belong to this currency
        #[arg(short, long)]
        currency: Option<String>,

        /// Address to check
        address: String,
    },

    /// Query the balance of an address
    Balance {
        /// Address to query
        address: String,

        /// Balance service URL template
        #[arg(long, env = "COINS_BALANCE_URL", default_value = DEFAULT_URL_TEMPLATE)]
        balance_url: String,

        /// Request timeout in seconds
        #[arg(long, env = "COINS_BALANCE_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,
    },

    /// List supported currencies
    Currencies,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::New { currency, count } => {
            let currency = commands::lookup_currency(&currency)?;
            let keys = commands::new_keys(currency, count)?;
            if cli.json {
                print_json(&keys)?;
            } else {
                for key in keys {
                    println!("{}: {} (priv: {})", key.currency, key.address, key.wif);
                }
            }
        }
        Commands::Show { currency, key } => {
            let currency = commands::lookup_currency(&currency)?;
            let key = commands::show_key(currency, &key)?;
            if cli.json {
                print_json(&key)?;
            } else {
                println!("{}: {} (priv: {})", key.currency, key.address, key.wif);
            }
        }
        Commands::Validate { currency, address } => {
            let expected = currency
                .as_deref()
                .map(commands::lookup_currency)
                .transpose()?;
            let report = commands::validate_address(&address, expected);
            if cli.json {
                print_json(&report)?;
            } else if let Some(code) = report.currency {
                println!("{}: valid {} address", report.address, code);
            } else {
                println!(
                    "{}: invalid ({})",
                    report.address,
                    report.reason.as_deref().unwrap_or("unknown reason")
                );
            }
            if !report.valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Balance {
            address,
            balance_url,
            timeout,
        } => {
            let config = BalanceConfig {
                url_template: balance_url,
                timeout_secs: timeout,
            };
            let report = commands::query_balance(&address, config).await?;
            if cli.json {
                print_json(&report)?;
            } else {
                println!("{}: {} {}", report.address, report.balance, report.currency);
            }
        }
        Commands::Currencies => {
            let currencies = commands::currencies();
            if cli.json {
                print_json(&currencies)?;
            } else {
                for c in currencies {
                    println!(
                        "{:<8} {:<16} address {:#04x}  wif {:#04x} ('{}')",
                        c.code, c.name, c.network_version, c.private_key_prefix, c.wif_prefix as char
                    );
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
