//! Fuzz target for CVC validation.
//!
//! Tests that CVC validation never panics on arbitrary input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use card_entry::{is_valid_cvc, ValidationMode, BRANDS};

fuzz_target!(|data: &str| {
    let _ = is_valid_cvc(None, data, ValidationMode::OnBlur);

    // Test with all brands
    for rule in BRANDS {
        let strict = is_valid_cvc(Some(rule.brand), data, ValidationMode::OnBlur);
        let live = is_valid_cvc(Some(rule.brand), data, ValidationMode::Live);
        assert!(live.is_valid());
        let _ = strict.error();
    }
});
