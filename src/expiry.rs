//! Expiry date formatting and validation.
//!
//! The expiry field is rendered as `MM / YYYY`. [`format_expiry`] rewrites the
//! raw field text on every keystroke, inserting the separator and padding the
//! month as soon as the intent is clear, and [`is_valid_expiry_date`] checks
//! the rendered value against a reference date.
//!
//! # Example
//!
//! ```
//! use card_entry::expiry::{format_expiry, is_valid_expiry_date};
//! use card_entry::ValidationMode;
//! use chrono::NaiveDate;
//!
//! assert_eq!(format_expiry("4"), "04 / ");
//! assert_eq!(format_expiry("0520"), "05 / 20");
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! assert!(is_valid_expiry_date("07 / 2024", today, ValidationMode::OnBlur).is_valid());
//! assert!(!is_valid_expiry_date("05 / 2024", today, ValidationMode::OnBlur).is_valid());
//! ```

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::FieldError;
use crate::validate::{FieldKind, ValidationMode, ValidationResult};

/// Separator inserted between month and year.
pub const SEPARATOR: &str = " / ";

/// Optional leading junk, a 1-2 digit month, an optional separator run and up
/// to four year digits.
static EXPIRY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^0-9]*([0-9]{1,2})([^0-9]+)?([0-9]{1,4})?").expect("expiry pattern compiles")
});

/// Reformats raw expiry text as the user types.
///
/// Returns an empty string when the text does not start with a month. The
/// first matching rule wins:
///
/// 1. Any year digits force the `" / "` separator.
/// 2. A bare `" /"` separator (the user backspaced into it) drops the
///    separator and keeps only the first month digit.
/// 3. A two-digit month above 12 collapses to `"1"`.
/// 4. A two-digit month, or any separator, forces `" / "`.
/// 5. A single month digit other than `0` or `1` is zero-padded and followed
///    by `" / "`.
///
/// # Example
///
/// ```
/// use card_entry::expiry::format_expiry;
///
/// assert_eq!(format_expiry("1"), "1");
/// assert_eq!(format_expiry("12"), "12 / ");
/// assert_eq!(format_expiry("12 /"), "1");
/// assert_eq!(format_expiry("13"), "1");
/// assert_eq!(format_expiry("12/2030"), "12 / 2030");
/// assert_eq!(format_expiry("ab"), "");
/// ```
pub fn format_expiry(raw: &str) -> String {
    let Some(caps) = EXPIRY_PATTERN.captures(raw) else {
        return String::new();
    };

    let capture = |i| caps.get(i).map_or("", |m| m.as_str());
    let mut month = capture(1).to_string();
    let mut separator = capture(2);
    let year = capture(3);

    if !year.is_empty() {
        separator = SEPARATOR;
    } else if separator == " /" {
        month.truncate(1);
        separator = "";
    } else if month.len() == 2 && month.parse::<u32>().is_ok_and(|m| m > 12) {
        month = "1".to_string();
    } else if month.len() == 2 || !separator.is_empty() {
        separator = SEPARATOR;
    } else if month.len() == 1 && month != "0" && month != "1" {
        month.insert(0, '0');
        separator = SEPARATOR;
    }

    format!("{}{}{}", month, separator, year)
}

/// Validates a formatted expiry date against `reference`.
///
/// A card is valid through the end of its expiry month, so only the year and
/// month of `reference` matter. The text is split on `/`; the first part is the
/// 1-based month and the second the year.
///
/// With [`ValidationMode::OnBlur`] the text must be non-empty, carry a
/// four-character year and not be before the reference month. With
/// [`ValidationMode::Live`] only a complete four-character year in the past is
/// reported.
///
/// A month or year that is not numeric, or does not fit in an `i32`, cannot
/// be placed in time and is never reported as past.
pub fn is_valid_expiry_date(
    formatted: &str,
    reference: NaiveDate,
    mode: ValidationMode,
) -> ValidationResult {
    let reference_index = month_index(reference.year() as i64, reference.month0() as i64);

    let mut parts = formatted.split('/');
    let month = parts.next().unwrap_or_default();
    let year = parts.next().map(str::trim);
    let full_year = year.filter(|y| y.chars().count() == 4);

    let in_past = full_year
        .and_then(|y| expiry_index(month, y))
        .is_some_and(|index| index < reference_index);

    let failure = match mode {
        ValidationMode::OnBlur => {
            if formatted.is_empty() {
                Some(FieldError::ExpiryRequired)
            } else if full_year.is_none() {
                Some(FieldError::InvalidExpiry)
            } else if in_past {
                Some(FieldError::ExpiryInPast)
            } else {
                None
            }
        }
        ValidationMode::Live => in_past.then_some(FieldError::ExpiryInPast),
    };

    failure.map_or(ValidationResult::valid(FieldKind::Expiry), ValidationResult::invalid)
}

/// Like [`is_valid_expiry_date`], using today's local date.
pub fn is_valid_expiry_date_now(formatted: &str, mode: ValidationMode) -> ValidationResult {
    is_valid_expiry_date(formatted, Local::now().date_naive(), mode)
}

/// Splits a formatted expiry into a two-digit month and the year text.
///
/// Returns `None` if either part is missing or the month is not 1-12.
///
/// # Example
///
/// ```
/// use card_entry::expiry::expiry_parts;
///
/// assert_eq!(expiry_parts("05 / 2030"), Some(("05".to_string(), "2030".to_string())));
/// assert_eq!(expiry_parts("5/2030"), Some(("05".to_string(), "2030".to_string())));
/// assert_eq!(expiry_parts("05 / "), None);
/// ```
pub fn expiry_parts(formatted: &str) -> Option<(String, String)> {
    let (month, year) = formatted.split_once('/')?;
    let month: u32 = month.trim().parse().ok()?;
    let year = year.trim();

    if !(1..=12).contains(&month) || year.is_empty() {
        return None;
    }

    Some((format!("{:02}", month), year.to_string()))
}

/// Month count since year 0 of a typed month and year.
///
/// Months outside 1-12 roll over into neighbouring years. Both parts are
/// bounded to `i32`, so the index always fits in an `i64`.
fn expiry_index(month: &str, year: &str) -> Option<i64> {
    let month: i32 = month.trim().parse().ok()?;
    let year: i32 = year.parse().ok()?;
    Some(month_index(i64::from(year), i64::from(month) - 1))
}

#[inline]
fn month_index(year: i64, month0: i64) -> i64 {
    year * 12 + month0
}
