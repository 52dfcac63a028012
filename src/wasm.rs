//! WebAssembly bindings for the payment form.
//!
//! The browser layer calls these on every input event with the raw field text
//! and renders the returned string and validity back into the form.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { format_card_number, is_valid_card_number, get_card_type } from 'card_entry';
//!
//! await init();
//!
//! input.value = format_card_number(input.value);
//! const result = is_valid_card_number(input.value, true);
//! input.setCustomValidity(result.isValid ? '' : result.error);
//!
//! const brand = get_card_type(input.value.replace(/\s+/g, ''));  // "visa", "" if unknown
//! ```

#![cfg(feature = "wasm")]

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use crate::format::LengthKind;
use crate::{Brand, ValidationResult};

/// Result of validating one field, returned to JavaScript.
#[wasm_bindgen]
pub struct FieldValidation {
    is_valid: bool,
    error: String,
    field_type: String,
}

#[wasm_bindgen]
impl FieldValidation {
    #[wasm_bindgen(getter = isValid)]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    #[wasm_bindgen(getter)]
    pub fn error(&self) -> String {
        self.error.clone()
    }

    #[wasm_bindgen(getter = fieldType)]
    pub fn field_type(&self) -> String {
        self.field_type.clone()
    }
}

impl From<ValidationResult> for FieldValidation {
    fn from(result: ValidationResult) -> Self {
        Self {
            is_valid: result.is_valid(),
            error: result.error().to_string(),
            field_type: result.field_kind().as_str().to_string(),
        }
    }
}

/// Empty or unrecognized identifiers mean "no brand".
fn parse_brand(card_type: &str) -> Option<Brand> {
    card_type.parse().ok()
}

/// Returns the brand identifier for a card number, or `""`.
///
/// # Example
/// ```javascript
/// get_card_type("4026000000000002")  // "visaelectron"
/// get_card_type("4")                 // "visa"
/// ```
#[wasm_bindgen]
pub fn get_card_type(digits: &str) -> String {
    crate::detect_brand(digits)
        .map(|brand| brand.id().to_string())
        .unwrap_or_default()
}

/// Checks a number against the Luhn checksum.
#[wasm_bindgen]
pub fn get_luhn_checksum(number: &str) -> bool {
    crate::is_luhn_valid(number)
}

/// Formats a card number for display.
///
/// # Example
/// ```javascript
/// format_card_number("378282246310005")  // "3782 822463 10005"
/// ```
#[wasm_bindgen]
pub fn format_card_number(raw: &str) -> String {
    crate::format_card_number(raw)
}

/// Reformats expiry text as typed.
///
/// # Example
/// ```javascript
/// format_expiry("4")  // "04 / "
/// ```
#[wasm_bindgen]
pub fn format_expiry(raw: &str) -> String {
    crate::format_expiry(raw)
}

/// Caps a value to a brand's longest length.
///
/// `field_type` is `"length"` or `"cvcLength"`; anything else, or an unknown
/// brand, returns the value unchanged.
#[wasm_bindgen]
pub fn limit_length(value: &str, field_type: &str, card_type: &str) -> String {
    match field_type.parse::<LengthKind>() {
        Ok(kind) => crate::limit_length(value, kind, parse_brand(card_type)),
        Err(_) => value.to_string(),
    }
}

/// Returns a brand's longest length of the given kind.
#[wasm_bindgen]
pub fn get_max_length(field_type: &str, card_type: &str) -> Result<usize, JsValue> {
    let kind = field_type
        .parse::<LengthKind>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let brand = card_type
        .parse::<Brand>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(crate::max_length(kind, brand))
}

/// Validates a card number.
#[wasm_bindgen]
pub fn is_valid_card_number(raw: &str, on_blur: bool) -> FieldValidation {
    crate::is_valid_card_number(raw, on_blur.into()).into()
}

/// Validates a formatted expiry against the browser's current date.
#[wasm_bindgen]
pub fn is_valid_expiry_date(formatted: &str, on_blur: bool) -> Result<FieldValidation, JsValue> {
    let now = js_sys::Date::new_0();
    is_valid_expiry_date_at(formatted, now.get_full_year(), now.get_month() + 1, on_blur)
}

/// Validates a formatted expiry against the given year and 1-based month.
#[wasm_bindgen]
pub fn is_valid_expiry_date_at(
    formatted: &str,
    year: u32,
    month: u32,
    on_blur: bool,
) -> Result<FieldValidation, JsValue> {
    let reference = i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, 1))
        .ok_or_else(|| JsValue::from_str("invalid reference date"))?;
    Ok(crate::is_valid_expiry_date(formatted, reference, on_blur.into()).into())
}

/// Validates a CVC for the brand identifier (`""` when unknown).
#[wasm_bindgen]
pub fn is_valid_cvc(card_type: &str, raw: &str, on_blur: bool) -> FieldValidation {
    crate::is_valid_cvc(parse_brand(card_type), raw, on_blur.into()).into()
}
