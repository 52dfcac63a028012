//! Field validation errors.
//!
//! Validation never fails with a Rust error: every outcome is a
//! [`ValidationResult`](crate::ValidationResult). The variants here carry the
//! user-facing message shown next to the offending field.

use std::fmt;

use crate::validate::FieldKind;

/// Reasons a payment form field is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldError {
    /// The card number field is empty.
    NumberRequired,
    /// No brand matched, or the checksum failed.
    InvalidNumber,
    /// Fewer digits than the detected brand's longest number.
    NumberTooShort,

    /// The expiry field is empty.
    ExpiryRequired,
    /// The year is missing or is not four characters.
    InvalidExpiry,
    /// The expiry month is before the reference month.
    ExpiryInPast,

    /// The CVC field is empty.
    CvcRequired,
    /// Fewer digits than the brand's longest CVC.
    CvcTooShort,
    /// More digits than the brand's longest CVC.
    CvcTooLong,
}

impl FieldError {
    /// Returns the field this error belongs to.
    pub const fn field_kind(&self) -> FieldKind {
        match self {
            Self::NumberRequired | Self::InvalidNumber | Self::NumberTooShort => FieldKind::Number,
            Self::ExpiryRequired | Self::InvalidExpiry | Self::ExpiryInPast => FieldKind::Expiry,
            Self::CvcRequired | Self::CvcTooShort | Self::CvcTooLong => FieldKind::Cvv,
        }
    }

    /// Returns the message displayed to the user.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NumberRequired => "Please enter a credit card number.",
            Self::InvalidNumber => "Please enter a valid credit card number.",
            Self::NumberTooShort => {
                "Please enter a valid credit card number. The number entered is too short."
            }
            Self::ExpiryRequired => "Please enter an expiry date.",
            Self::InvalidExpiry => "Please enter a valid expiry date.",
            Self::ExpiryInPast => "Please enter a valid expiry date. The date entered is past.",
            Self::CvcRequired => "Please enter a CVV number.",
            Self::CvcTooShort => "Please enter a valid CVV number. The number entered is too short.",
            Self::CvcTooLong => "Please enter a valid CVV number. The number entered is too long.",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for FieldError {}
