//! Fuzz target for expiry formatting and validation.
//!
//! Tests that expiry handling never panics on arbitrary input.

#![no_main]

use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use card_entry::{expiry, ValidationMode};

fuzz_target!(|data: &str| {
    let Some(today) = NaiveDate::from_ymd_opt(2024, 6, 15) else {
        return;
    };

    let formatted = expiry::format_expiry(data);
    let _ = expiry::expiry_parts(data);
    let _ = expiry::expiry_parts(&formatted);

    for input in [data, formatted.as_str()] {
        let strict = expiry::is_valid_expiry_date(input, today, ValidationMode::OnBlur);
        let live = expiry::is_valid_expiry_date(input, today, ValidationMode::Live);
        // Live validation is never stricter
        assert!(!strict.is_valid() || live.is_valid());
    }
});
