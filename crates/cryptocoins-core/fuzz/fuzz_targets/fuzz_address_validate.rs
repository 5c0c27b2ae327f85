//! Fuzz test for address validation
//!
//! Ensures the validator reports malformed input instead of panicking

#![no_main]

use cryptocoins_core::validate;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let check = validate(s);
        assert_eq!(check.is_valid, check.reason.is_none());
    }
});
