//! Card brand detection by prefix.
//!
//! Detection is a nested scan over the ordered [`BRANDS`] table: brands in
//! declaration order, and each brand's prefixes in declaration order. The first
//! prefix the input starts with decides the brand. There is no longest-match
//! rule, so a brand declared early with a short prefix shadows any later brand
//! whose prefix extends it.

use crate::brand::{Brand, BrandRule, BRANDS};

/// Detects the card brand from the leading digits of a card number.
///
/// The input is matched as-is: separators are not stripped, and characters
/// that are not digits simply fail to match any prefix.
///
/// # Example
///
/// ```
/// use card_entry::detect::detect_brand;
/// use card_entry::Brand;
///
/// assert_eq!(detect_brand("4"), Some(Brand::Visa));
/// assert_eq!(detect_brand("4026000000000002"), Some(Brand::Visaelectron));
/// assert_eq!(detect_brand("378282246310005"), Some(Brand::Amex));
/// assert_eq!(detect_brand("9999"), None);
/// ```
#[inline]
pub fn detect_brand(digits: &str) -> Option<Brand> {
    detect_rule(digits).map(|rule| rule.brand)
}

/// Like [`detect_brand`], returning the whole rule.
pub fn detect_rule(digits: &str) -> Option<&'static BrandRule> {
    BRANDS.iter().find(|rule| {
        rule.prefixes
            .iter()
            .any(|prefix| digits.starts_with(prefix))
    })
}
