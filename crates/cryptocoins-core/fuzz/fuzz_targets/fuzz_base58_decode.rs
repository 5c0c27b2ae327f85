//! Fuzz test for base58 decoding
//!
//! Decoding arbitrary text must not panic, and any decoded value must
//! survive an encode/decode round trip.

#![no_main]

use cryptocoins_core::base58;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(bytes) = base58::decode(s) {
            assert_eq!(base58::decode(&base58::encode(&bytes)).unwrap(), bytes);
        }
    }
});
