//! Luhn (mod 10) checksum.
//!
//! Digits are processed from the rightmost one. Every digit at an odd
//! zero-based position from the right is doubled, and a doubled value of 10
//! or more has 9 subtracted. The number passes when the total is divisible
//! by 10.

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Checks a card number string against the Luhn checksum.
///
/// Whitespace anywhere in the input is ignored. Any other non-digit character
/// makes the check fail.
///
/// The empty string sums to 0 and therefore passes; callers gate this with a
/// length check before treating a number as valid.
///
/// # Example
///
/// ```
/// use card_entry::luhn::is_luhn_valid;
///
/// assert!(is_luhn_valid("4242424242424242"));
/// assert!(is_luhn_valid("4242 4242 4242 4242"));
/// assert!(!is_luhn_valid("4242424242424241"));
/// ```
pub fn is_luhn_valid(number: &str) -> bool {
    let mut digits = Vec::with_capacity(number.len());
    for c in number.chars().filter(|c| !c.is_whitespace()) {
        match c.to_digit(10) {
            Some(d) => digits.push(d as u8),
            None => return false,
        }
    }
    compute_checksum(&digits) % 10 == 0
}

/// Computes the Luhn sum for a sequence of digits (0-9).
///
/// The result is the raw sum, not reduced modulo 10.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 1 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum()
}

/// Generates the check digit for a partial card number.
///
/// Appending the returned digit to `digits` yields a number that passes the
/// checksum.
///
/// # Example
///
/// ```
/// use card_entry::luhn::generate_check_digit;
///
/// let partial = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4];
/// assert_eq!(generate_check_digit(&partial), 2);
/// ```
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Every existing digit moves one position left once the check digit is
    // appended, so the rightmost one is doubled.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 0 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cards() {
        assert!(is_luhn_valid("4242424242424242"));
        assert!(is_luhn_valid("4111111111111111"));
        assert!(is_luhn_valid("5500000000000004"));
        assert!(is_luhn_valid("378282246310005"));
        assert!(is_luhn_valid("6011111111111117"));
        assert!(is_luhn_valid("30569309025904"));
    }

    #[test]
    fn test_invalid_cards() {
        assert!(!is_luhn_valid("4242424242424241"));
        assert!(!is_luhn_valid("4111111111111112"));
        assert!(!is_luhn_valid("1234567890123456"));
    }

    #[test]
    fn test_whitespace_is_ignored() {
        assert!(is_luhn_valid("4242 4242 4242 4242"));
        assert!(is_luhn_valid(" 3782\t822463\n10005 "));
    }

    #[test]
    fn test_non_digit_fails() {
        assert!(!is_luhn_valid("4242-4242-4242-4242"));
        assert!(!is_luhn_valid("424242424242424x"));
    }

    #[test]
    fn test_empty_input_passes() {
        assert!(is_luhn_valid(""));
        assert!(is_luhn_valid("   "));
    }

    #[test]
    fn test_single_digit() {
        assert!(is_luhn_valid("0"));
        assert!(!is_luhn_valid("1"));
        assert!(!is_luhn_valid("5"));
    }

    #[test]
    fn test_compute_checksum() {
        assert_eq!(compute_checksum(&[]), 0);
        // 5 doubled is 10, minus 9
        assert_eq!(compute_checksum(&[5, 0]), 1);
        assert_eq!(compute_checksum(&[1, 8]), 10);
    }

    #[test]
    fn test_generate_check_digit() {
        let partial = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
        assert_eq!(generate_check_digit(&partial), 1);

        let partial = [5, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(generate_check_digit(&partial), 4);

        let partial = [3, 7, 8, 2, 8, 2, 2, 4, 6, 3, 1, 0, 0, 0];
        assert_eq!(generate_check_digit(&partial), 5);
    }

    #[test]
    fn test_double_table_values() {
        for i in 0..10 {
            let doubled = i * 2;
            let expected = if doubled > 9 { doubled - 9 } else { doubled };
            assert_eq!(DOUBLE_TABLE[i], expected as u8);
        }
    }
}
