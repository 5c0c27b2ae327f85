//! Bitcoin-family key and address codec
//!
//! This crate implements the base-58 codec, the checksummed version
//! envelope shared by addresses and WIF keys, private key parsing and
//! generation, and address validation for the currencies in
//! `cryptocoins-params`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod address;
pub mod base58;
pub mod envelope;
pub mod error;
pub mod keys;

pub use address::{validate, AddressCheck, AddressValidator, PublicAddress};
pub use cryptocoins_params::{registry, CurrencyRecord, CurrencyRegistry};
pub use error::{Error, ErrorCategory, Result};
pub use keys::{generate_secret, hash160, KeyInput, KeyMaterial, Secret, HASH160_LEN, SECRET_LEN};
