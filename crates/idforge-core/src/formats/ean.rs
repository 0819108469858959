//! # Retail Barcodes (EAN-13 / UPC-A / EAN-8)
//!
//! All three symbologies share one check digit rule: walking the data
//! digits from the right, odd positions weigh 3 and even positions weigh 1,
//! and the check digit brings the sum to a multiple of ten.
//!
//! | Kind | Length | Layout | Display |
//! |------|--------|--------|---------|
//! | EAN-13 | 13 | GS1 prefix + company/product + check | `1 666666 666666` |
//! | UPC-A | 12 | number system + 5 + 5 + check | `1 55555 55555 1` |
//! | EAN-8 | 8 | GS1 prefix + 2 + 2 + check | `4444 4444` |

use std::fmt;
use std::str::FromStr;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::digits::{
    clean, digit_char, digit_values, group, is_numeric, pad_random, random_digits, zero_padded,
};
use crate::error::{FormatError, ValidationIssue};
use crate::formats::{generate_until_ok, IdentifierFormat};
use crate::kind::{ExpectedLength, FormatKind};
use crate::report::ValidationReport;

/// Shortest partial accepted by completion.
pub const MIN_PREFIX_LENGTH: usize = 3;

const NAME: &str = "ean";

/// UPC-A number-system digits used for generation.
const UPC_NUMBER_SYSTEMS: [u32; 5] = [0, 1, 6, 7, 8];

/// A GS1 company-prefix range.
#[derive(Debug, Clone, Copy)]
struct Gs1Range {
    low: u32,
    high: u32,
    country: &'static str,
    /// Assigned to a national member organisation (usable for generation).
    national: bool,
}

const fn national(low: u32, high: u32, country: &'static str) -> Gs1Range {
    Gs1Range {
        low,
        high,
        country,
        national: true,
    }
}

const fn special(low: u32, high: u32, country: &'static str) -> Gs1Range {
    Gs1Range {
        low,
        high,
        country,
        national: false,
    }
}

const GS1_PREFIXES: &[Gs1Range] = &[
    national(0, 19, "United States and Canada"),
    special(20, 29, "Restricted distribution"),
    national(30, 39, "United States and Canada"),
    special(40, 49, "Restricted distribution"),
    special(50, 59, "Coupons"),
    national(60, 139, "United States and Canada"),
    special(200, 299, "Restricted distribution"),
    national(300, 379, "France and Monaco"),
    national(380, 380, "Bulgaria"),
    national(383, 383, "Slovenia"),
    national(385, 385, "Croatia"),
    national(400, 440, "Germany"),
    national(450, 459, "Japan"),
    national(460, 469, "Russia"),
    national(471, 471, "Taiwan"),
    national(489, 489, "Hong Kong"),
    national(490, 499, "Japan"),
    national(500, 509, "United Kingdom"),
    national(520, 521, "Greece"),
    national(540, 549, "Belgium and Luxembourg"),
    national(560, 560, "Portugal"),
    national(570, 579, "Denmark"),
    national(590, 590, "Poland"),
    national(594, 594, "Romania"),
    national(599, 599, "Hungary"),
    national(600, 601, "South Africa"),
    national(640, 649, "Finland"),
    national(690, 699, "China"),
    national(700, 709, "Norway"),
    national(730, 739, "Sweden"),
    national(760, 769, "Switzerland"),
    national(789, 790, "Brazil"),
    national(800, 839, "Italy"),
    national(840, 849, "Spain"),
    national(858, 858, "Slovakia"),
    national(859, 859, "Czech Republic"),
    national(860, 860, "Serbia"),
    national(868, 869, "Turkey"),
    national(870, 879, "Netherlands"),
    national(880, 880, "South Korea"),
    national(885, 885, "Thailand"),
    national(888, 888, "Singapore"),
    national(890, 890, "India"),
    national(893, 893, "Vietnam"),
    national(899, 899, "Indonesia"),
    national(900, 919, "Austria"),
    national(930, 939, "Australia"),
    national(940, 949, "New Zealand"),
    national(955, 955, "Malaysia"),
    special(977, 977, "Serial publications (ISSN)"),
    special(978, 979, "Bookland (ISBN)"),
    special(980, 980, "Refund receipts"),
    special(990, 999, "Coupons"),
];

/// Which barcode symbology a code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarcodeKind {
    Ean13,
    UpcA,
    Ean8,
}

impl BarcodeKind {
    /// Full length including the check digit.
    pub fn length(&self) -> usize {
        match self {
            Self::Ean13 => 13,
            Self::UpcA => 12,
            Self::Ean8 => 8,
        }
    }

    /// Length without the check digit.
    pub fn data_length(&self) -> usize {
        self.length() - 1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ean13 => "ean13",
            Self::UpcA => "upc-a",
            Self::Ean8 => "ean8",
        }
    }

    fn groups(&self) -> &'static [usize] {
        match self {
            Self::Ean13 => &[1, 6, 6],
            Self::UpcA => &[1, 5, 5, 1],
            Self::Ean8 => &[4, 4],
        }
    }

    /// The symbology with this total length.
    pub fn from_length(len: usize) -> Option<Self> {
        match len {
            13 => Some(Self::Ean13),
            12 => Some(Self::UpcA),
            8 => Some(Self::Ean8),
            _ => None,
        }
    }
}

impl fmt::Display for BarcodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BarcodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "ean13" | "ean-13" => Ok(Self::Ean13),
            "upc-a" | "upca" | "upc" => Ok(Self::UpcA),
            "ean8" | "ean-8" => Ok(Self::Ean8),
            _ => Err(format!(
                "unknown barcode kind '{s}' (expected one of: ean13, upc-a, ean8)"
            )),
        }
    }
}

/// Retail barcode format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ean;

impl Ean {
    /// Check digit for EAN-13, UPC-A or EAN-8 data digits.
    pub fn check_digit(data: &str) -> Option<u32> {
        let digits = digit_values(data)?;
        if digits.is_empty() {
            return None;
        }
        let sum: u32 = digits
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &d)| if i % 2 == 0 { d * 3 } else { d })
            .sum();
        Some((10 - sum % 10) % 10)
    }

    /// Symbology for a cleaned barcode of `len` digits.
    pub fn barcode_kind(len: usize) -> Option<BarcodeKind> {
        BarcodeKind::from_length(len)
    }

    /// GS1 member organisation (or special range) for a barcode's prefix.
    /// UPC-A codes are read as EAN-13 with a leading zero.
    pub fn country(code: &str) -> Option<&'static str> {
        let cleaned = clean(code);
        if !is_numeric(&cleaned) {
            return None;
        }
        let normalized = match Self::barcode_kind(cleaned.len())? {
            BarcodeKind::UpcA => format!("0{cleaned}"),
            _ => cleaned,
        };
        let prefix: u32 = normalized.get(..3)?.parse().ok()?;
        GS1_PREFIXES
            .iter()
            .find(|range| (range.low..=range.high).contains(&prefix))
            .map(|range| range.country)
    }

    /// Complete `partial` as an explicit symbology.
    ///
    /// # Errors
    ///
    /// [`FormatError::InvalidPrefixPattern`] for non-digits,
    /// [`FormatError::InvalidPrefixLength`] below three digits, and
    /// [`FormatError::AlreadyComplete`] when `partial` already fills the
    /// data digits of `kind`.
    pub fn complete_to(
        &self,
        kind: BarcodeKind,
        partial: &str,
        rng: &mut dyn RngCore,
    ) -> Result<String, FormatError> {
        let cleaned = Self::check_partial(partial)?;
        if cleaned.len() > kind.data_length() {
            return Err(FormatError::AlreadyComplete {
                format: NAME,
                length: cleaned.len(),
            });
        }
        Self::finish(kind, &cleaned, rng)
    }

    fn check_partial(partial: &str) -> Result<String, FormatError> {
        let cleaned = clean(partial);
        let too_short = || FormatError::InvalidPrefixLength {
            format: NAME,
            expected: format!("at least {MIN_PREFIX_LENGTH}"),
            actual: cleaned.len(),
        };
        if cleaned.is_empty() {
            return Err(too_short());
        }
        if !is_numeric(&cleaned) {
            return Err(FormatError::InvalidPrefixPattern {
                format: NAME,
                reason: "barcode must contain only digits".into(),
            });
        }
        if cleaned.len() < MIN_PREFIX_LENGTH {
            return Err(too_short());
        }
        Ok(cleaned)
    }

    /// Pad (or truncate) to the data length of `kind`, append the check
    /// digit and format.
    fn finish(kind: BarcodeKind, data: &str, rng: &mut dyn RngCore) -> Result<String, FormatError> {
        let data = pad_random(data, kind.data_length(), rng);
        let check = Self::check_digit(&data).ok_or_else(|| {
            FormatError::ChecksumComputation(format!("{NAME}: data {data} is not numeric"))
        })?;
        let code = format!("{data}{}", digit_char(check));
        Ok(group(&code, kind.groups(), ' '))
    }

    fn random_gs1_prefix(rng: &mut dyn RngCore) -> String {
        let national: Vec<&Gs1Range> = GS1_PREFIXES.iter().filter(|r| r.national).collect();
        let range = national[rng.gen_range(0..national.len())];
        zero_padded(rng.gen_range(range.low..=range.high), 3)
    }

    fn generate_kind(kind: BarcodeKind, rng: &mut dyn RngCore) -> Result<String, FormatError> {
        let data = match kind {
            BarcodeKind::Ean13 => Self::random_gs1_prefix(rng),
            BarcodeKind::UpcA => {
                let system = UPC_NUMBER_SYSTEMS[rng.gen_range(0..UPC_NUMBER_SYSTEMS.len())];
                format!(
                    "{}{}{}",
                    digit_char(system),
                    random_digits(rng, 5),
                    random_digits(rng, 5)
                )
            }
            BarcodeKind::Ean8 => format!(
                "{}{}{}",
                Self::random_gs1_prefix(rng),
                random_digits(rng, 2),
                random_digits(rng, 2)
            ),
        };
        Self::finish(kind, &data, rng)
    }
}

impl IdentifierFormat for Ean {
    fn kind(&self) -> FormatKind {
        FormatKind::Ean
    }

    fn expected_length(&self) -> ExpectedLength {
        ExpectedLength::Range { min: 8, max: 13 }
    }

    fn inspect(&self, input: &str) -> ValidationReport {
        let cleaned = clean(input);
        let mut report = ValidationReport::new(FormatKind::Ean, cleaned.as_str());
        if cleaned.is_empty() {
            return report.with(ValidationIssue::Empty);
        }
        if Self::barcode_kind(cleaned.len()).is_none() {
            report.push(ValidationIssue::InvalidLength {
                expected: "8, 12 or 13".into(),
                actual: cleaned.len(),
            });
        }
        if !is_numeric(&cleaned) {
            report.push(ValidationIssue::NonNumeric);
        }
        if !report.is_valid() {
            return report;
        }
        let (data, check) = cleaned.split_at(cleaned.len() - 1);
        if Self::check_digit(data).map(digit_char) != check.chars().next() {
            report.push(ValidationIssue::ChecksumMismatch);
        }
        report
    }

    fn validate_optional(&self, input: Option<&str>) -> Result<bool, FormatError> {
        input
            .map(|s| self.validate(s))
            .ok_or(FormatError::MissingInput { format: NAME })
    }

    fn generate(&self, rng: &mut dyn RngCore) -> String {
        let roll: f64 = rng.gen();
        let kind = if roll < 0.60 {
            BarcodeKind::Ean13
        } else if roll < 0.85 {
            BarcodeKind::UpcA
        } else {
            BarcodeKind::Ean8
        };
        generate_until_ok(FormatKind::Ean, rng, |rng| Self::generate_kind(kind, rng))
    }

    fn complete(&self, partial: &str, rng: &mut dyn RngCore) -> Result<String, FormatError> {
        let cleaned = Self::check_partial(partial)?;
        let kind = match cleaned.len() {
            0..=6 => BarcodeKind::Ean8,
            7..=12 => BarcodeKind::Ean13,
            length => return Err(FormatError::AlreadyComplete { format: NAME, length }),
        };
        tracing::trace!(kind = %kind, "completing barcode");
        Self::finish(kind, &cleaned, rng)
    }

    fn format(&self, cleaned: &str) -> String {
        match Self::barcode_kind(cleaned.len()) {
            Some(kind) => group(cleaned, kind.groups(), ' '),
            None => cleaned.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0xea)
    }

    #[test]
    fn check_digit_vectors() {
        assert_eq!(Ean::check_digit("400638133393"), Some(1));
        assert_eq!(Ean::check_digit("03600029145"), Some(2));
        assert_eq!(Ean::check_digit("9638507"), Some(4));
        assert_eq!(Ean::check_digit(""), None);
    }

    #[test]
    fn validate_all_symbologies() {
        assert!(Ean.validate("4006381333931"));
        assert!(Ean.validate("4 006381 333931"));
        assert!(Ean.validate("036000291452"));
        assert!(Ean.validate("96385074"));
        assert!(!Ean.validate("4006381333932"));
    }

    #[test]
    fn all_zero_and_all_nine_ean8() {
        assert!(Ean.validate("00000000"));
        assert!(!Ean.validate("99999999"));
    }

    #[test]
    fn validate_issues() {
        assert!(Ean.inspect("1234567890").has(&ValidationIssue::InvalidLength {
            expected: "8, 12 or 13".into(),
            actual: 10
        }));
        assert_eq!(Ean.inspect("4006381A33931").issues, vec![ValidationIssue::NonNumeric]);
        assert_eq!(
            Ean.validate_optional(None),
            Err(FormatError::MissingInput { format: "ean" })
        );
    }

    #[test]
    fn generated_barcodes_validate() {
        let mut rng = rng();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            let code = Ean.generate(&mut rng);
            assert!(Ean.validate(&code), "generated {code} failed validation");
            seen.insert(Ean::barcode_kind(clean(&code).len()));
        }
        assert_eq!(seen.len(), 3, "expected all three symbologies, saw {seen:?}");
    }

    #[test]
    fn generated_ean13_has_national_prefix() {
        let mut rng = rng();
        for _ in 0..100 {
            let code = Ean::generate_kind(BarcodeKind::Ean13, &mut rng).unwrap();
            assert!(Ean::country(&code).is_some());
        }
    }

    #[test]
    fn complete_picks_symbology_by_length() {
        let mut rng = rng();
        let short = Ean.complete("869", &mut rng).unwrap();
        assert_eq!(clean(&short).len(), 8);
        assert!(clean(&short).starts_with("869"));

        let long = Ean.complete("8690000", &mut rng).unwrap();
        assert_eq!(clean(&long).len(), 13);
        assert!(clean(&long).starts_with("8690000"));

        assert_eq!(Ean.complete("400638133393", &mut rng).unwrap(), "4 006381 333931");
        assert!(Ean.validate(&short) && Ean.validate(&long));
    }

    #[test]
    fn complete_errors() {
        let mut rng = rng();
        assert!(matches!(
            Ean.complete("40", &mut rng),
            Err(FormatError::InvalidPrefixLength { actual: 2, .. })
        ));
        assert!(matches!(
            Ean.complete("40a", &mut rng),
            Err(FormatError::InvalidPrefixPattern { .. })
        ));
        assert!(matches!(
            Ean.complete("4006381333931", &mut rng),
            Err(FormatError::AlreadyComplete { length: 13, .. })
        ));
    }

    #[test]
    fn empty_prefix_is_a_length_error() {
        let mut rng = rng();
        for prefix in ["", "  "] {
            assert!(matches!(
                Ean.complete(prefix, &mut rng),
                Err(FormatError::InvalidPrefixLength { actual: 0, .. })
            ));
            assert!(matches!(
                Ean.complete_to(BarcodeKind::UpcA, prefix, &mut rng),
                Err(FormatError::InvalidPrefixLength { actual: 0, .. })
            ));
        }
    }

    #[test]
    fn complete_to_explicit_targets() {
        let mut rng = rng();
        assert_eq!(
            Ean.complete_to(BarcodeKind::UpcA, "03600029145", &mut rng).unwrap(),
            "0 36000 29145 2"
        );
        let ean8 = Ean.complete_to(BarcodeKind::Ean8, "9638507", &mut rng).unwrap();
        assert_eq!(ean8, "9638 5074");
        let ean13 = Ean.complete_to(BarcodeKind::Ean13, "123", &mut rng).unwrap();
        assert_eq!(clean(&ean13).len(), 13);
        assert!(Ean.validate(&ean13));
        assert!(matches!(
            Ean.complete_to(BarcodeKind::Ean8, "12345678", &mut rng),
            Err(FormatError::AlreadyComplete { length: 8, .. })
        ));
    }

    #[test]
    fn country_lookup() {
        assert_eq!(Ean::country("8690000000005"), Some("Turkey"));
        assert_eq!(Ean::country("4006381333931"), Some("Germany"));
        assert_eq!(Ean::country("036000291452"), Some("United States and Canada"));
        assert_eq!(Ean::country("9780306406157"), Some("Bookland (ISBN)"));
        assert_eq!(Ean::country("12"), None);
    }

    #[test]
    fn barcode_kind_parsing() {
        assert_eq!("UPC-A".parse::<BarcodeKind>(), Ok(BarcodeKind::UpcA));
        assert_eq!("ean_13".parse::<BarcodeKind>(), Ok(BarcodeKind::Ean13));
        assert_eq!("ean8".parse::<BarcodeKind>(), Ok(BarcodeKind::Ean8));
        assert!("code128".parse::<BarcodeKind>().is_err());
    }

    #[test]
    fn formatting() {
        assert_eq!(Ean.format("4006381333931"), "4 006381 333931");
        assert_eq!(Ean.format("036000291452"), "0 36000 29145 2");
        assert_eq!(Ean.format("96385074"), "9638 5074");
        assert_eq!(Ean.format("12345"), "12345");
    }
}
