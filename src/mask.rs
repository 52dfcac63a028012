//! Card number masking for logs and debug output.
//!
//! Only the last four digits of a card number are ever shown.

/// Masks a card number string, keeping only the last 4 digits.
///
/// Non-digit characters are dropped first. Inputs with 4 digits or fewer are
/// masked entirely.
///
/// # Example
///
/// ```
/// use card_entry::mask::mask_number;
///
/// assert_eq!(mask_number("4242 4242 4242 4242"), "****-****-****-4242");
/// assert_eq!(mask_number("378282246310005"), "****-****-***0005");
/// assert_eq!(mask_number("123"), "***");
/// ```
pub fn mask_number(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    if len <= 4 {
        return "*".repeat(len);
    }

    let masked_count = len - 4;
    let mut result = String::with_capacity(len + (len / 4));

    for i in 0..masked_count {
        if i > 0 && i % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }

    if masked_count % 4 == 0 {
        result.push('-');
    }

    result.extend(&digits[len - 4..]);
    result
}
