//! Balance lookup for validated addresses
//!
//! Queries a third-party REST service for the on-chain balance of an
//! address. Kept apart from `cryptocoins-core`, which never performs I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod balance;
pub mod error;

pub use balance::{network_slug, parse_balance_response, BalanceClient, BalanceConfig};
pub use error::{Error, Result};
