//! Card number formatting for display while the user types.
//!
//! # Format Conventions
//!
//! - **Most brands**: groups of 4, capped at the brand's longest number
//! - **American Express**: `XXXX XXXXXX XXXXX`
//! - **Diners Club**: `XXXX XXXXXX XXXX`
//! - **Unknown brand**: groups of 4, no cap
//!
//! Formatting strips every non-digit first, so feeding a formatted number back
//! in yields the same string.
//!
//! # Example
//!
//! ```
//! use card_entry::format::format_card_number;
//!
//! assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
//! assert_eq!(format_card_number("378282246310005"), "3782 822463 10005");
//! assert_eq!(format_card_number("3782 8224 6310 005"), "3782 822463 10005");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::brand::{Brand, NumberFormat};
use crate::detect::detect_rule;

/// Group width used when no brand is detected.
const DEFAULT_GROUP_WIDTH: usize = 4;

/// Which length set of a brand a limit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthKind {
    /// Card number lengths (`"length"`).
    Number,
    /// CVC lengths (`"cvcLength"`).
    Cvc,
}

impl LengthKind {
    /// Returns the field name used at the form boundary.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "length",
            Self::Cvc => "cvcLength",
        }
    }
}

impl fmt::Display for LengthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized length kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLengthKind(pub String);

impl fmt::Display for UnknownLengthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown length kind '{}' (expected \"length\" or \"cvcLength\")",
            self.0
        )
    }
}

impl std::error::Error for UnknownLengthKind {}

impl FromStr for LengthKind {
    type Err = UnknownLengthKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "length" => Ok(Self::Number),
            "cvcLength" => Ok(Self::Cvc),
            _ => Err(UnknownLengthKind(s.to_string())),
        }
    }
}

/// Returns the longest accepted length of the given kind for a brand.
///
/// # Example
///
/// ```
/// use card_entry::format::{max_length, LengthKind};
/// use card_entry::Brand;
///
/// assert_eq!(max_length(LengthKind::Number, Brand::Maestro), 19);
/// assert_eq!(max_length(LengthKind::Cvc, Brand::Amex), 4);
/// ```
#[inline]
pub fn max_length(kind: LengthKind, brand: Brand) -> usize {
    let rule = brand.rule();
    match kind {
        LengthKind::Number => rule.max_length(),
        LengthKind::Cvc => rule.max_cvc_length(),
    }
}

/// Strips everything but ASCII digits.
///
/// # Example
///
/// ```
/// use card_entry::format::strip_non_digits;
///
/// assert_eq!(strip_non_digits("4242 4242-4242.4242"), "4242424242424242");
/// ```
pub fn strip_non_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Formats a raw card number for display.
///
/// The brand is detected from the stripped digits. Repeating formats are
/// capped to the brand's longest number; fixed group formats drop whatever
/// does not fit in their groups.
pub fn format_card_number(raw: &str) -> String {
    let digits = strip_non_digits(raw);

    let Some(rule) = detect_rule(&digits) else {
        return group_repeating(&digits, DEFAULT_GROUP_WIDTH);
    };

    match rule.format {
        NumberFormat::Repeating(width) => {
            let grouped = group_repeating(&digits, width);
            limit_length(&grouped, LengthKind::Number, Some(rule.brand))
        }
        NumberFormat::FixedGroups(widths) => group_fixed(&digits, &widths),
    }
}

/// Truncates a formatted value to the brand's longest accepted length.
///
/// Only non-space characters count toward the limit, so group separators
/// already in `formatted` never shorten the kept content. Trailing whitespace
/// left after truncation is trimmed. Without a brand the input is returned
/// unchanged.
///
/// # Example
///
/// ```
/// use card_entry::format::{limit_length, LengthKind};
/// use card_entry::Brand;
///
/// assert_eq!(
///     limit_length("4242 4242 4242 4242 42", LengthKind::Number, Some(Brand::Visa)),
///     "4242 4242 4242 4242"
/// );
/// assert_eq!(limit_length("12345", LengthKind::Cvc, Some(Brand::Visa)), "123");
/// assert_eq!(limit_length("12345", LengthKind::Cvc, None), "12345");
/// ```
pub fn limit_length(formatted: &str, kind: LengthKind, brand: Option<Brand>) -> String {
    let Some(brand) = brand else {
        return formatted.to_string();
    };

    let max = max_length(kind, brand);
    let mut kept = 0;
    let end = formatted
        .char_indices()
        .filter(|&(_, c)| c != ' ')
        .find_map(|(i, _)| {
            if kept == max {
                return Some(i);
            }
            kept += 1;
            None
        })
        .unwrap_or(formatted.len());

    formatted[..end].trim_end().to_string()
}

/// Splits digits into groups of at most `width`, joined by single spaces.
fn group_repeating(digits: &str, width: usize) -> String {
    let chars: Vec<char> = digits.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Applies fixed group widths once from the left, dropping empty groups.
fn group_fixed(digits: &str, widths: &[usize]) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut groups = Vec::with_capacity(widths.len());
    let mut pos = 0;

    for &width in widths {
        let end = (pos + width).min(chars.len());
        if pos >= end {
            break;
        }
        groups.push(chars[pos..end].iter().collect::<String>());
        pos = end;
    }

    groups.join(" ")
}
