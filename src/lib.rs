//! # card_entry
//!
//! Card entry engine for payment forms. Formats and validates the card
//! number, expiry and CVC fields as the user types, and builds the request
//! sent to a tokenization endpoint.
//!
//! ## Features
//!
//! - Brand detection from a fixed, ordered prefix table (8 brands)
//! - Luhn checksum
//! - As-you-type formatting of card number and expiry
//! - Live (permissive) and on-blur (strict) field validation
//! - Form controller and tokenization boundary
//! - WASM bindings for the browser
//!
//! ## Quick Start
//!
//! ```rust
//! use card_entry::{detect_brand, format_card_number, is_valid_card_number, Brand, ValidationMode};
//!
//! assert_eq!(detect_brand("4242424242424242"), Some(Brand::Visa));
//! assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
//!
//! let result = is_valid_card_number("4242 4242 4242 4242", ValidationMode::OnBlur);
//! assert!(result.is_valid());
//! assert_eq!(result.error(), "");
//! ```
//!
//! ## Expiry
//!
//! ```rust
//! use card_entry::{format_expiry, is_valid_expiry_date, FieldError, ValidationMode};
//! use chrono::NaiveDate;
//!
//! assert_eq!(format_expiry("2"), "02 / ");
//! assert_eq!(format_expiry("13"), "1");
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let result = is_valid_expiry_date("05 / 2024", today, ValidationMode::OnBlur);
//! assert_eq!(result.failure(), Some(FieldError::ExpiryInPast));
//! ```
//!
//! ## CVC
//!
//! ```rust
//! use card_entry::{is_valid_cvc, Brand, ValidationMode};
//!
//! assert!(is_valid_cvc(Some(Brand::Amex), "1234", ValidationMode::OnBlur).is_valid());
//! assert!(!is_valid_cvc(Some(Brand::Visa), "1234", ValidationMode::OnBlur).is_valid());
//! ```
//!
//! ## Supported Card Brands
//!
//! Listed in detection order. The first brand with a matching prefix wins.
//!
//! | Brand | Prefix | Length | CVC | Grouping |
//! |-------|--------|--------|-----|----------|
//! | visaelectron | 4026, 417500, 4405, 4508, 4844, 4913, 4917 | 16 | 3 | 4-4-4-4 |
//! | maestro | 5018, 502, 503, 56, 58, 639, 6220, 67 | 12-19 | 3 | 4-4-4-4-... |
//! | visa | 4 | 13, 16 | 3 | 4-4-4-4 |
//! | mastercard | 51-55, 22-27 | 16 | 3 | 4-4-4-4 |
//! | amex | 34, 37 | 15 | 3, 4 | 4-6-5 |
//! | dinersclub | 30, 36, 38, 39 | 14 | 3 | 4-6-4 |
//! | discover | 60, 64, 65, 622 | 16 | 3 | 4-4-4-4 |
//! | jcb | 35 | 16 | 3 | 4-4-4-4 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `token` (default) | Tokenization request/response boundary |
//! | `wasm` | WebAssembly bindings |
//!
//! ## Security
//!
//! - `Debug` output of form state and token requests masks the card number
//! - Card data held by [`CardForm`] and token requests is zeroized on drop
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod brand;
pub mod cvv;
pub mod detect;
pub mod error;
pub mod expiry;
pub mod form;
pub mod format;
pub mod luhn;
pub mod mask;
#[cfg(feature = "token")]
pub mod token;
pub mod validate;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use brand::{Brand, BrandRule, NumberFormat, BRANDS};
pub use cvv::is_valid_cvc;
pub use detect::detect_brand;
pub use error::FieldError;
pub use expiry::{format_expiry, is_valid_expiry_date};
pub use form::{CardForm, FieldUpdate};
pub use format::{format_card_number, limit_length, max_length, LengthKind};
pub use luhn::is_luhn_valid;
pub use validate::{is_valid_card_number, FieldKind, ValidationMode, ValidationResult};
