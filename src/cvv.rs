//! CVV/CVC validation.
//!
//! The CVC length depends on the card brand, so it can only be checked once
//! the number field has identified one. Without a brand any non-empty CVC is
//! accepted.
//!
//! Only the brand's longest CVC length is checked. American Express accepts
//! 3 or 4 digits but a 3 digit CVC is still reported as too short on blur.
//!
//! # Example
//!
//! ```
//! use card_entry::cvv::is_valid_cvc;
//! use card_entry::{Brand, FieldError, ValidationMode};
//!
//! assert!(is_valid_cvc(Some(Brand::Amex), "1234", ValidationMode::OnBlur).is_valid());
//!
//! let result = is_valid_cvc(Some(Brand::Visa), "1234", ValidationMode::OnBlur);
//! assert_eq!(result.failure(), Some(FieldError::CvcTooLong));
//!
//! assert!(is_valid_cvc(None, "1", ValidationMode::OnBlur).is_valid());
//! ```

use std::cmp::Ordering;

use crate::brand::Brand;
use crate::error::FieldError;
use crate::format::{max_length, LengthKind};
use crate::validate::{FieldKind, ValidationMode, ValidationResult};

/// Validates a CVC for the given brand.
///
/// On blur an empty CVC is rejected first, whatever the brand. Length errors
/// are only reported on blur.
pub fn is_valid_cvc(brand: Option<Brand>, raw: &str, mode: ValidationMode) -> ValidationResult {
    let on_blur = mode == ValidationMode::OnBlur;
    let length = raw.chars().count();

    if on_blur && length == 0 {
        return FieldError::CvcRequired.into();
    }

    let Some(brand) = brand else {
        return ValidationResult::valid(FieldKind::Cvv);
    };

    if !on_blur {
        return ValidationResult::valid(FieldKind::Cvv);
    }

    match length.cmp(&max_length(LengthKind::Cvc, brand)) {
        Ordering::Less => FieldError::CvcTooShort.into(),
        Ordering::Greater => FieldError::CvcTooLong.into(),
        Ordering::Equal => ValidationResult::valid(FieldKind::Cvv),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visa_cvc() {
        assert!(is_valid_cvc(Some(Brand::Visa), "123", ValidationMode::OnBlur).is_valid());
        assert_eq!(
            is_valid_cvc(Some(Brand::Visa), "12", ValidationMode::OnBlur).failure(),
            Some(FieldError::CvcTooShort)
        );
        let result = is_valid_cvc(Some(Brand::Visa), "1234", ValidationMode::OnBlur);
        assert_eq!(result.failure(), Some(FieldError::CvcTooLong));
        assert_eq!(
            result.error(),
            "Please enter a valid CVV number. The number entered is too long."
        );
    }

    #[test]
    fn test_amex_cvc_checks_longest_length() {
        assert!(is_valid_cvc(Some(Brand::Amex), "1234", ValidationMode::OnBlur).is_valid());
        assert_eq!(
            is_valid_cvc(Some(Brand::Amex), "123", ValidationMode::OnBlur).failure(),
            Some(FieldError::CvcTooShort)
        );
        assert_eq!(
            is_valid_cvc(Some(Brand::Amex), "12345", ValidationMode::OnBlur).failure(),
            Some(FieldError::CvcTooLong)
        );
    }

    #[test]
    fn test_empty_on_blur_is_required() {
        for brand in [None, Some(Brand::Visa), Some(Brand::Amex)] {
            let result = is_valid_cvc(brand, "", ValidationMode::OnBlur);
            assert_eq!(result.failure(), Some(FieldError::CvcRequired));
            assert_eq!(result.field_kind(), FieldKind::Cvv);
        }
    }

    #[test]
    fn test_no_brand_is_always_valid() {
        for cvc in ["1", "12", "123", "1234", "123456789"] {
            assert!(is_valid_cvc(None, cvc, ValidationMode::OnBlur).is_valid());
            assert!(is_valid_cvc(None, cvc, ValidationMode::Live).is_valid());
        }
    }

    #[test]
    fn test_live_never_reports_length() {
        assert!(is_valid_cvc(Some(Brand::Visa), "", ValidationMode::Live).is_valid());
        assert!(is_valid_cvc(Some(Brand::Visa), "1", ValidationMode::Live).is_valid());
        assert!(is_valid_cvc(Some(Brand::Visa), "12345", ValidationMode::Live).is_valid());
    }
}
