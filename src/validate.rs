//! Field validation results and card number validation.
//!
//! Each field is validated in one of two modes. [`ValidationMode::Live`] runs
//! while the user is typing and only reports errors once the input is
//! complete, so incomplete values never flash an error.
//! [`ValidationMode::OnBlur`] runs when the field is considered finished and
//! rejects empty and incomplete values.

use std::fmt;

use crate::detect::detect_rule;
use crate::error::FieldError;
use crate::luhn::is_luhn_valid;

/// The form field a validation result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FieldKind {
    /// Card number.
    Number,
    /// Expiry date.
    Expiry,
    /// Card verification code.
    Cvv,
}

impl FieldKind {
    /// Returns the field name used at the form boundary.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Expiry => "expiry",
            Self::Cvv => "cvv",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict or permissive validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationMode {
    /// Permissive validation while the user types.
    Live,
    /// Strict validation once the field is complete.
    #[default]
    OnBlur,
}

impl From<bool> for ValidationMode {
    /// `true` selects [`ValidationMode::OnBlur`].
    fn from(on_blur: bool) -> Self {
        if on_blur {
            Self::OnBlur
        } else {
            Self::Live
        }
    }
}

/// Outcome of validating one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidationResult {
    field_kind: FieldKind,
    failure: Option<FieldError>,
}

impl ValidationResult {
    /// A passing result for the given field.
    #[inline]
    pub const fn valid(field_kind: FieldKind) -> Self {
        Self {
            field_kind,
            failure: None,
        }
    }

    /// A failing result; the field is taken from the error.
    #[inline]
    pub const fn invalid(error: FieldError) -> Self {
        Self {
            field_kind: error.field_kind(),
            failure: Some(error),
        }
    }

    /// Returns true if the field passed validation.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.failure.is_none()
    }

    /// Returns the user-facing error message, empty when valid.
    #[inline]
    pub fn error(&self) -> &'static str {
        self.failure.map_or("", |e| e.message())
    }

    /// Returns the failure reason, if any.
    #[inline]
    pub const fn failure(&self) -> Option<FieldError> {
        self.failure
    }

    /// Returns the field this result belongs to.
    #[inline]
    pub const fn field_kind(&self) -> FieldKind {
        self.field_kind
    }
}

impl From<FieldError> for ValidationResult {
    fn from(error: FieldError) -> Self {
        Self::invalid(error)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ValidationResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ValidationResult", 3)?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.serialize_field("error", self.error())?;
        state.serialize_field("fieldType", &self.field_kind)?;
        state.end()
    }
}

/// Validates a card number as typed or on completion.
///
/// Whitespace is ignored. With [`ValidationMode::OnBlur`] the number must be
/// present, have a known brand, reach the brand's longest length and pass the
/// checksum. With [`ValidationMode::Live`] only a number of exactly the
/// brand's longest length is checked; anything else reports valid.
///
/// # Example
///
/// ```
/// use card_entry::{is_valid_card_number, FieldError, ValidationMode};
///
/// assert!(is_valid_card_number("4242 4242 4242 4242", ValidationMode::OnBlur).is_valid());
///
/// let result = is_valid_card_number("4242", ValidationMode::OnBlur);
/// assert_eq!(result.failure(), Some(FieldError::NumberTooShort));
///
/// // Incomplete input is fine while typing
/// assert!(is_valid_card_number("4242", ValidationMode::Live).is_valid());
/// ```
pub fn is_valid_card_number(raw: &str, mode: ValidationMode) -> ValidationResult {
    let number: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let length = number.chars().count();

    let rule = if length > 0 { detect_rule(&number) } else { None };
    let max = rule.map_or(0, |rule| rule.max_length());
    let checksum_ok = rule.is_some_and(|rule| !rule.luhn || is_luhn_valid(&number));

    let failure = match mode {
        ValidationMode::OnBlur => {
            if length == 0 {
                Some(FieldError::NumberRequired)
            } else if rule.is_none() {
                Some(FieldError::InvalidNumber)
            } else if length < max {
                Some(FieldError::NumberTooShort)
            } else if !checksum_ok {
                Some(FieldError::InvalidNumber)
            } else {
                None
            }
        }
        ValidationMode::Live => {
            if max != 0 && length == max && !checksum_ok {
                Some(FieldError::InvalidNumber)
            } else {
                None
            }
        }
    };

    failure.map_or(ValidationResult::valid(FieldKind::Number), ValidationResult::invalid)
}
