//! Payment form controller.
//!
//! [`CardForm`] holds the text of the three payment fields and runs the same
//! format-then-validate step a browser form runs on every input event. The UI
//! layer writes [`FieldUpdate::value`] back into the field and shows
//! [`FieldUpdate::result`] as the field's validity message.
//!
//! # Example
//!
//! ```
//! use card_entry::form::CardForm;
//! use card_entry::Brand;
//! use chrono::NaiveDate;
//!
//! let mut form = CardForm::new()
//!     .with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
//!
//! let update = form.input_number("378282246310005");
//! assert_eq!(update.value, "3782 822463 10005");
//! assert!(update.result.is_valid());
//! assert_eq!(form.brand(), Some(Brand::Amex));
//!
//! assert_eq!(form.input_expiry("1").value, "1");
//! assert_eq!(form.input_expiry("12").value, "12 / ");
//! assert!(form.input_expiry("12 / 2030").result.is_valid());
//!
//! assert!(form.input_cvc("1234").result.is_valid());
//! assert!(form.check_validity());
//! ```

use std::fmt;

use chrono::{Local, NaiveDate};
use zeroize::Zeroize;

use crate::brand::Brand;
use crate::cvv::is_valid_cvc;
use crate::detect::detect_brand;
use crate::error::FieldError;
use crate::expiry::{expiry_parts, format_expiry, is_valid_expiry_date};
use crate::format::{format_card_number, limit_length, strip_non_digits, LengthKind};
use crate::validate::{is_valid_card_number, ValidationMode, ValidationResult};

/// New field text and its validation outcome after an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    /// Text to render back into the field.
    pub value: String,
    /// Validity of the new text.
    pub result: ValidationResult,
}

/// State of the card number, expiry and CVC fields.
#[derive(Clone, Default)]
pub struct CardForm {
    number: String,
    expiry: String,
    cvc: String,
    mode: ValidationMode,
    reference_date: Option<NaiveDate>,
}

impl CardForm {
    /// Creates an empty form validating in [`ValidationMode::OnBlur`] against
    /// today's date.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the mode used for per-input validation.
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Pins the date expiry values are compared against.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Returns the per-input validation mode.
    #[inline]
    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Returns the formatted card number.
    #[inline]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns the formatted expiry.
    #[inline]
    pub fn expiry(&self) -> &str {
        &self.expiry
    }

    /// Returns the CVC.
    #[inline]
    pub fn cvc(&self) -> &str {
        &self.cvc
    }

    /// Returns the brand detected from the current card number.
    pub fn brand(&self) -> Option<Brand> {
        detect_brand(&strip_non_digits(&self.number))
    }

    /// Handles new text in the card number field.
    pub fn input_number(&mut self, raw: &str) -> FieldUpdate {
        self.number = format_card_number(raw);
        FieldUpdate {
            value: self.number.clone(),
            result: self.validate_number(self.mode),
        }
    }

    /// Handles new text in the expiry field.
    pub fn input_expiry(&mut self, raw: &str) -> FieldUpdate {
        self.expiry = format_expiry(raw);
        FieldUpdate {
            value: self.expiry.clone(),
            result: self.validate_expiry(self.mode),
        }
    }

    /// Handles new text in the CVC field.
    ///
    /// Non-digits are dropped and the value is capped to the brand's longest
    /// CVC once a brand is known.
    pub fn input_cvc(&mut self, raw: &str) -> FieldUpdate {
        self.cvc = limit_length(&strip_non_digits(raw), LengthKind::Cvc, self.brand());
        FieldUpdate {
            value: self.cvc.clone(),
            result: self.validate_cvc(self.mode),
        }
    }

    /// Validates all three fields strictly, in field order.
    ///
    /// Strict expiry validation also requires a 1-12 month, so a valid form
    /// always yields a token request.
    pub fn validate_all(&self) -> [ValidationResult; 3] {
        [
            self.validate_number(ValidationMode::OnBlur),
            self.validate_expiry(ValidationMode::OnBlur),
            self.validate_cvc(ValidationMode::OnBlur),
        ]
    }

    /// Returns true when every field passes strict validation.
    pub fn check_validity(&self) -> bool {
        self.validate_all().iter().all(ValidationResult::is_valid)
    }

    /// Builds the tokenization request, if the form is valid.
    #[cfg(feature = "token")]
    pub fn token_request(&self) -> Option<crate::token::TokenRequest> {
        if !self.check_validity() {
            return None;
        }
        let (month, year) = crate::expiry::expiry_parts(&self.expiry)?;
        Some(crate::token::TokenRequest::new(
            &self.number,
            self.cvc.clone(),
            month,
            year,
        ))
    }

    /// Clears all fields.
    pub fn reset(&mut self) {
        self.number.zeroize();
        self.expiry.zeroize();
        self.cvc.zeroize();
    }

    fn reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    fn validate_number(&self, mode: ValidationMode) -> ValidationResult {
        is_valid_card_number(&self.number, mode)
    }

    fn validate_expiry(&self, mode: ValidationMode) -> ValidationResult {
        let result = is_valid_expiry_date(&self.expiry, self.reference_date(), mode);
        // Rolled-over months pass the date check but cannot be submitted
        if mode == ValidationMode::OnBlur
            && result.is_valid()
            && expiry_parts(&self.expiry).is_none()
        {
            return FieldError::InvalidExpiry.into();
        }
        result
    }

    fn validate_cvc(&self, mode: ValidationMode) -> ValidationResult {
        is_valid_cvc(self.brand(), &self.cvc, mode)
    }
}

impl fmt::Debug for CardForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardForm")
            .field("number", &crate::mask::mask_number(&self.number))
            .field("expiry", &self.expiry)
            .field("cvc", &"*".repeat(self.cvc.len()))
            .field("mode", &self.mode)
            .field("reference_date", &self.reference_date)
            .finish()
    }
}

impl Drop for CardForm {
    fn drop(&mut self) {
        self.number.zeroize();
        self.cvc.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CardForm {
        CardForm::new().with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    #[test]
    fn test_number_input_formats_and_validates() {
        let mut form = form();
        let update = form.input_number("4242");
        assert_eq!(update.value, "4242");
        assert_eq!(update.result.failure(), Some(FieldError::NumberTooShort));

        let update = form.input_number("4242 42424");
        assert_eq!(update.value, "4242 4242 4");

        let update = form.input_number("4242424242424242");
        assert_eq!(update.value, "4242 4242 4242 4242");
        assert!(update.result.is_valid());
        assert_eq!(form.number(), "4242 4242 4242 4242");
    }

    #[test]
    fn test_live_mode_is_quiet_while_typing() {
        let mut form = form().with_mode(ValidationMode::Live);
        assert!(form.input_number("4242").result.is_valid());
        assert!(form.input_expiry("0").result.is_valid());
        assert!(form.input_cvc("1").result.is_valid());
        assert!(!form.check_validity());
    }

    #[test]
    fn test_expiry_input_sequence() {
        let mut form = form();
        assert_eq!(form.input_expiry("1").value, "1");
        assert_eq!(form.input_expiry("13").value, "1");
        assert_eq!(form.input_expiry("12").value, "12 / ");
        assert_eq!(form.input_expiry("12 /").value, "1");
        let update = form.input_expiry("05 / 2024");
        assert_eq!(update.result.failure(), Some(FieldError::ExpiryInPast));
        assert!(form.input_expiry("07 / 2024").result.is_valid());
    }

    #[test]
    fn test_cvc_follows_detected_brand() {
        let mut form = form();
        // No brand: anything goes
        assert!(form.input_cvc("12").result.is_valid());

        form.input_number("4242424242424242");
        let update = form.input_cvc("1234");
        assert_eq!(update.value, "123");
        assert!(update.result.is_valid());

        form.input_number("378282246310005");
        let update = form.input_cvc("123");
        assert_eq!(update.result.failure(), Some(FieldError::CvcTooShort));
        assert!(form.input_cvc("1234").result.is_valid());
    }

    #[test]
    fn test_brand_ignores_group_separators() {
        let mut form = form();
        form.input_number("4175001234567890");
        assert_eq!(form.number(), "4175 0012 3456 7890");
        assert_eq!(form.brand(), Some(Brand::Visaelectron));
    }

    #[test]
    fn test_check_validity() {
        let mut form = form();
        assert!(!form.check_validity());
        let [number, expiry, cvc] = form.validate_all();
        assert_eq!(number.failure(), Some(FieldError::NumberRequired));
        assert_eq!(expiry.failure(), Some(FieldError::ExpiryRequired));
        assert_eq!(cvc.failure(), Some(FieldError::CvcRequired));

        form.input_number("5500000000000004");
        form.input_expiry("0127");
        assert_eq!(form.expiry(), "01 / 27");
        form.input_cvc("321");
        // Two-digit year fails strict validation
        assert!(!form.check_validity());

        form.input_expiry("01 / 2027");
        assert!(form.check_validity());
    }

    #[cfg(feature = "token")]
    #[test]
    fn test_token_request_only_when_valid() {
        let mut form = form();
        form.input_number("4242424242424242");
        form.input_expiry("7/2030");
        assert!(form.token_request().is_none());

        form.input_cvc("123");
        let request = form.token_request().unwrap();
        assert_eq!(request.number, "4242424242424242");
        assert_eq!(request.cvd, "123");
        assert_eq!(request.expiry_month, "07");
        assert_eq!(request.expiry_year, "2030");
    }

    #[test]
    fn test_expiry_month_out_of_range_is_invalid() {
        for raw in ["13/2030", "00/2030"] {
            let mut form = form();
            form.input_number("4242424242424242");
            form.input_cvc("123");

            let update = form.input_expiry(raw);
            assert_eq!(update.result.failure(), Some(FieldError::InvalidExpiry), "{}", raw);
            assert!(!form.check_validity(), "{}", raw);
            #[cfg(feature = "token")]
            assert!(form.token_request().is_none());

            // Live mode stays quiet while typing
            let mut live = form.clone().with_mode(ValidationMode::Live);
            assert!(live.input_expiry(raw).result.is_valid(), "{}", raw);
        }
    }

    #[test]
    fn test_valid_form_always_builds_request() {
        let mut form = form();
        form.input_number("4242424242424242");
        form.input_cvc("123");
        for raw in ["1/2030", "01/2030", "12/2030", "6/2024"] {
            form.input_expiry(raw);
            assert!(form.check_validity(), "{}", raw);
            #[cfg(feature = "token")]
            assert!(form.token_request().is_some(), "{}", raw);
        }
    }

    #[test]
    fn test_reset() {
        let mut form = form();
        form.input_number("4242");
        form.input_expiry("12");
        form.input_cvc("1");
        form.reset();
        assert_eq!(form.number(), "");
        assert_eq!(form.expiry(), "");
        assert_eq!(form.cvc(), "");
    }

    #[test]
    fn test_debug_is_masked() {
        let mut form = form();
        form.input_number("4242424242424242");
        form.input_cvc("987");
        let debug = format!("{:?}", form);
        assert!(!debug.contains("4242 4242 4242 4242"));
        assert!(!debug.contains("987"));
    }
}
