//! Card brands and the ordered brand rule table.
//!
//! Every supported brand has exactly one [`BrandRule`] describing the prefixes
//! that identify it, how its number is grouped for display, and which number
//! and CVC lengths it accepts. The table is a `static` slice: it is built at
//! compile time and never mutated.
//!
//! # Table order
//!
//! Detection walks [`BRANDS`] top to bottom and stops at the first rule with a
//! matching prefix. A brand listed earlier therefore wins over a later one even
//! when the later brand has the longer, more specific prefix. Visa Electron is
//! declared before Visa so `4026...` resolves to Visa Electron while a lone `4`
//! still resolves to Visa. A hypothetical brand with prefix `40` appended after
//! Visa would never be reached.

use std::fmt;
use std::str::FromStr;

/// Supported card brands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Brand {
    /// Visa Electron - Prefix 4026, 417500, 4405, 4508, 4844, 4913, 4917, length 16
    Visaelectron,
    /// Maestro - Prefix 5018, 502, 503, 56, 58, 639, 6220, 67, length 12-19
    Maestro,
    /// Visa - Prefix 4, lengths 13, 16
    Visa,
    /// Mastercard - Prefix 51-55, 22-27, length 16
    Mastercard,
    /// American Express - Prefix 34, 37, length 15
    Amex,
    /// Diners Club - Prefix 30, 36, 38, 39, length 14
    Dinersclub,
    /// Discover - Prefix 60, 64, 65, 622, length 16
    Discover,
    /// JCB - Prefix 35, length 16
    Jcb,
}

impl Brand {
    /// Returns the brand identifier used at the form boundary (e.g. `"amex"`).
    #[inline]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Visaelectron => "visaelectron",
            Self::Maestro => "maestro",
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Dinersclub => "dinersclub",
            Self::Discover => "discover",
            Self::Jcb => "jcb",
        }
    }

    /// Returns the rule for this brand from [`BRANDS`].
    #[inline]
    pub fn rule(&self) -> &'static BrandRule {
        // Variants are declared in table order.
        &BRANDS[*self as usize]
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when a brand identifier is not in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBrand(pub String);

impl fmt::Display for UnknownBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown card brand '{}'", self.0)
    }
}

impl std::error::Error for UnknownBrand {}

impl FromStr for Brand {
    type Err = UnknownBrand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BRANDS
            .iter()
            .map(|rule| rule.brand)
            .find(|brand| brand.id() == s)
            .ok_or_else(|| UnknownBrand(s.to_string()))
    }
}

/// How a brand's digits are split into display groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// Groups of at most `width` digits, repeated over the whole number.
    Repeating(usize),
    /// Up to three groups of the given widths, applied once from the left.
    /// Digits past the last group are dropped.
    FixedGroups([usize; 3]),
}

/// Detection and validation rules for one brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandRule {
    /// The brand this rule describes.
    pub brand: Brand,
    /// Number prefixes, checked in declaration order.
    pub prefixes: &'static [&'static str],
    /// Display grouping.
    pub format: NumberFormat,
    /// Accepted card number lengths.
    pub lengths: &'static [usize],
    /// Accepted CVC lengths.
    pub cvc_lengths: &'static [usize],
    /// Whether the number carries a Luhn check digit.
    pub luhn: bool,
}

impl BrandRule {
    /// Returns the longest accepted card number length.
    #[inline]
    pub fn max_length(&self) -> usize {
        self.lengths.iter().copied().max().unwrap_or(0)
    }

    /// Returns the longest accepted CVC length.
    #[inline]
    pub fn max_cvc_length(&self) -> usize {
        self.cvc_lengths.iter().copied().max().unwrap_or(0)
    }
}

const DEFAULT_FORMAT: NumberFormat = NumberFormat::Repeating(4);

/// The brand table, in detection order.
pub static BRANDS: &[BrandRule] = &[
    BrandRule {
        brand: Brand::Visaelectron,
        prefixes: &["4026", "417500", "4405", "4508", "4844", "4913", "4917"],
        format: DEFAULT_FORMAT,
        lengths: &[16],
        cvc_lengths: &[3],
        luhn: true,
    },
    BrandRule {
        brand: Brand::Maestro,
        prefixes: &["5018", "502", "503", "56", "58", "639", "6220", "67"],
        format: DEFAULT_FORMAT,
        lengths: &[12, 13, 14, 15, 16, 17, 18, 19],
        cvc_lengths: &[3],
        luhn: true,
    },
    BrandRule {
        brand: Brand::Visa,
        prefixes: &["4"],
        format: DEFAULT_FORMAT,
        lengths: &[13, 16],
        cvc_lengths: &[3],
        luhn: true,
    },
    BrandRule {
        brand: Brand::Mastercard,
        prefixes: &["51", "52", "53", "54", "55", "22", "23", "24", "25", "26", "27"],
        format: DEFAULT_FORMAT,
        lengths: &[16],
        cvc_lengths: &[3],
        luhn: true,
    },
    BrandRule {
        brand: Brand::Amex,
        prefixes: &["34", "37"],
        format: NumberFormat::FixedGroups([4, 6, 5]),
        lengths: &[15],
        cvc_lengths: &[3, 4],
        luhn: true,
    },
    BrandRule {
        brand: Brand::Dinersclub,
        prefixes: &["30", "36", "38", "39"],
        format: NumberFormat::FixedGroups([4, 6, 4]),
        lengths: &[14],
        cvc_lengths: &[3],
        luhn: true,
    },
    BrandRule {
        brand: Brand::Discover,
        prefixes: &["60", "64", "65", "622"],
        format: DEFAULT_FORMAT,
        lengths: &[16],
        cvc_lengths: &[3],
        luhn: true,
    },
    BrandRule {
        brand: Brand::Jcb,
        prefixes: &["35"],
        format: DEFAULT_FORMAT,
        lengths: &[16],
        cvc_lengths: &[3],
        luhn: true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_brand_has_a_rule() {
        for rule in BRANDS {
            assert_eq!(rule.brand.rule(), rule);
        }
        assert_eq!(BRANDS.len(), 8);
    }

    #[test]
    fn test_table_invariants() {
        for rule in BRANDS {
            assert!(!rule.prefixes.is_empty());
            assert!(rule.lengths.iter().all(|&l| l > 0));
            assert!(rule.cvc_lengths.iter().all(|l| [3, 4].contains(l)));
            assert!(rule.luhn);
        }
    }

    #[test]
    fn test_visaelectron_declared_before_visa() {
        let pos = |b: Brand| BRANDS.iter().position(|r| r.brand == b).unwrap();
        assert!(pos(Brand::Visaelectron) < pos(Brand::Visa));
    }

    #[test]
    fn test_max_lengths() {
        assert_eq!(Brand::Maestro.rule().max_length(), 19);
        assert_eq!(Brand::Visa.rule().max_length(), 16);
        assert_eq!(Brand::Amex.rule().max_cvc_length(), 4);
        assert_eq!(Brand::Jcb.rule().max_cvc_length(), 3);
    }

    #[test]
    fn test_brand_ids_round_trip() {
        assert_eq!("amex".parse::<Brand>(), Ok(Brand::Amex));
        assert_eq!("visaelectron".parse::<Brand>(), Ok(Brand::Visaelectron));
        assert_eq!(Brand::Dinersclub.to_string(), "dinersclub");
        assert_eq!(
            "".parse::<Brand>(),
            Err(UnknownBrand(String::new()))
        );
        assert!("Visa".parse::<Brand>().is_err());
    }
}
