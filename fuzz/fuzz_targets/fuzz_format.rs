//! Fuzz target for card number formatting.
//!
//! Tests that formatting never panics and is stable under re-formatting.

#![no_main]

use libfuzzer_sys::fuzz_target;
use card_entry::{format, BRANDS};

fuzz_target!(|data: &str| {
    let formatted = format::format_card_number(data);

    // Re-formatting a formatted value changes nothing
    assert_eq!(format::format_card_number(&formatted), formatted);

    // Only digits that were typed survive, in order
    let kept = format::strip_non_digits(&formatted);
    assert!(format::strip_non_digits(data).starts_with(&kept));

    for rule in BRANDS {
        let _ = format::limit_length(data, format::LengthKind::Number, Some(rule.brand));
        let _ = format::limit_length(data, format::LengthKind::Cvc, Some(rule.brand));
    }
});
