//! Fuzz target for card number validation.
//!
//! Tests that validation and the form controller never panic on arbitrary
//! input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use card_entry::{detect_brand, is_valid_card_number, CardForm, ValidationMode};

fuzz_target!(|data: &str| {
    // These should never panic, regardless of input
    let strict = is_valid_card_number(data, ValidationMode::OnBlur);
    let live = is_valid_card_number(data, ValidationMode::Live);
    assert!(!strict.is_valid() || live.is_valid());
    let _ = detect_brand(data);

    let mut form = CardForm::new();
    let _ = form.input_number(data);
    let _ = form.input_expiry(data);
    let _ = form.input_cvc(data);
    let _ = form.check_validity();
    let _ = format!("{:?}", form);
});
