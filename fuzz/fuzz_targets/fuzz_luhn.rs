//! Fuzz target for the Luhn checksum.
//!
//! Tests that luhn functions never panic and maintain invariants.

#![no_main]

use libfuzzer_sys::fuzz_target;
use card_entry::luhn;

fuzz_target!(|data: &[u8]| {
    // Clamp values to valid digit range
    let digits: Vec<u8> = data.iter().map(|&b| b % 10).collect();
    let text: String = digits.iter().map(|&d| char::from(b'0' + d)).collect();

    // String and digit-slice paths agree
    let by_str = luhn::is_luhn_valid(&text);
    let by_sum = luhn::compute_checksum(&digits) % 10 == 0;
    assert_eq!(by_str, by_sum, "checksum mismatch for {}", text);

    if !digits.is_empty() && digits.len() <= 18 {
        let check = luhn::generate_check_digit(&digits);
        assert!(check <= 9, "Check digit should be 0-9");

        // Adding check digit should make it valid
        let mut with_check = text.clone();
        with_check.push(char::from(b'0' + check));
        assert!(luhn::is_luhn_valid(&with_check), "Adding check digit should make valid");
    }
});
