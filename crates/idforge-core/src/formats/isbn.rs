//! # Book Numbers (ISBN-10 / ISBN-13)
//!
//! ## ISBN-10
//!
//! Nine digits and a check character. With weights 10 down to 2 over the
//! payload, the check is `(11 - (Σ w·d mod 11)) mod 11`, written `X` when it
//! is 10. Displayed as `1-3-5-1`.
//!
//! ## ISBN-13
//!
//! A Bookland EAN: `978` or `979`, nine digits, and a check digit weighted
//! 1/3 alternately from the left. Displayed as `3-1-3-5-1`.
//!
//! ## Completion
//!
//! Partials shorter than ten characters complete as ISBN-10. Longer
//! partials complete as ISBN-13; if they do not start with `978`/`979`,
//! `978` is prepended (a ten-character partial is first read as an ISBN-10
//! and its check character dropped).

use rand::{Rng, RngCore};

use crate::digits::{clean, digit_char, digit_values, group, is_numeric, pad_random};
use crate::error::{FormatError, ValidationIssue};
use crate::formats::{generate_until_ok, IdentifierFormat};
use crate::kind::{ExpectedLength, FormatKind};
use crate::report::ValidationReport;

pub const ISBN10_LENGTH: usize = 10;
pub const ISBN13_LENGTH: usize = 13;
/// Shortest partial accepted by completion.
pub const MIN_PREFIX_LENGTH: usize = 3;

/// Share of generated numbers that are ISBN-13.
const ISBN13_SHARE: f64 = 0.8;

const BOOKLAND_PREFIXES: [&str; 2] = ["978", "979"];

const NAME: &str = "isbn";

/// Registration groups used for generation: (Bookland prefix, group, area).
const GROUPS: &[(&str, &str, &str)] = &[
    ("978", "0", "English language"),
    ("978", "1", "English language"),
    ("978", "2", "French language"),
    ("978", "3", "German language"),
    ("978", "4", "Japan"),
    ("978", "5", "former USSR"),
    ("978", "7", "China"),
    ("978", "84", "Spain"),
    ("978", "88", "Italy"),
    ("978", "90", "Netherlands"),
    ("978", "605", "Turkey"),
    ("978", "975", "Turkey"),
    ("979", "10", "France"),
    ("979", "11", "Republic of Korea"),
    ("979", "12", "Italy"),
];

/// Book number format, accepting both ISBN-10 and ISBN-13.
#[derive(Debug, Clone, Copy, Default)]
pub struct Isbn;

impl Isbn {
    /// ISBN-10 check character for a 9-digit payload.
    pub fn isbn10_check(payload: &str) -> Option<char> {
        let digits = digit_values(payload)?;
        if digits.len() != ISBN10_LENGTH - 1 {
            return None;
        }
        let sum: u32 = digits
            .iter()
            .enumerate()
            .map(|(i, &d)| (10 - i as u32) * d)
            .sum();
        match (11 - sum % 11) % 11 {
            10 => Some('X'),
            check => Some(digit_char(check)),
        }
    }

    /// ISBN-13 check digit for a 12-digit payload.
    pub fn isbn13_check(payload: &str) -> Option<char> {
        let digits = digit_values(payload)?;
        if digits.len() != ISBN13_LENGTH - 1 {
            return None;
        }
        let sum: u32 = digits
            .iter()
            .enumerate()
            .map(|(i, &d)| if i % 2 == 0 { d } else { d * 3 })
            .sum();
        Some(digit_char((10 - sum % 10) % 10))
    }

    /// Hyphenate a cleaned ISBN: `1-3-5-1` for ten characters,
    /// `3-1-3-5-1` for thirteen. Any other length is returned unchanged.
    pub fn format_isbn(cleaned: &str) -> String {
        match cleaned.len() {
            ISBN10_LENGTH => group(cleaned, &[1, 3, 5, 1], '-'),
            ISBN13_LENGTH => group(cleaned, &[3, 1, 3, 5, 1], '-'),
            _ => cleaned.to_string(),
        }
    }

    /// Convert a valid ISBN-10 to its `978` ISBN-13 form.
    pub fn to_isbn13(isbn10: &str) -> Option<String> {
        let cleaned = clean(isbn10);
        if cleaned.len() != ISBN10_LENGTH || !Isbn.validate(&cleaned) {
            return None;
        }
        let payload = format!("978{}", &cleaned[..ISBN10_LENGTH - 1]);
        let check = Self::isbn13_check(&payload)?;
        Some(Self::format_isbn(&format!("{payload}{check}")))
    }

    /// Convert a valid `978` ISBN-13 back to ISBN-10. `979` numbers have no
    /// ISBN-10 form.
    pub fn to_isbn10(isbn13: &str) -> Option<String> {
        let cleaned = clean(isbn13);
        if cleaned.len() != ISBN13_LENGTH || !cleaned.starts_with("978") || !Isbn.validate(&cleaned)
        {
            return None;
        }
        let payload = &cleaned[3..ISBN13_LENGTH - 1];
        let check = Self::isbn10_check(payload)?;
        Some(Self::format_isbn(&format!("{payload}{check}")))
    }

    /// Registration area for an ISBN-13, from the group table.
    pub fn area(isbn13: &str) -> Option<&'static str> {
        let cleaned = clean(isbn13);
        GROUPS
            .iter()
            .filter(|(ean, grp, _)| cleaned.starts_with(&format!("{ean}{grp}")))
            .max_by_key(|(_, grp, _)| grp.len())
            .map(|(_, _, area)| *area)
    }

    fn has_bookland_prefix(s: &str) -> bool {
        BOOKLAND_PREFIXES.iter().any(|p| s.starts_with(p))
    }

    fn finish10(payload: &str) -> Result<String, FormatError> {
        let check = Self::isbn10_check(payload).ok_or_else(|| {
            FormatError::ChecksumComputation(format!("{NAME}: bad ISBN-10 payload {payload}"))
        })?;
        Ok(Self::format_isbn(&format!("{payload}{check}")))
    }

    fn finish13(payload: &str) -> Result<String, FormatError> {
        let check = Self::isbn13_check(payload).ok_or_else(|| {
            FormatError::ChecksumComputation(format!("{NAME}: bad ISBN-13 payload {payload}"))
        })?;
        Ok(Self::format_isbn(&format!("{payload}{check}")))
    }

    fn inspect10(cleaned: &str, report: &mut ValidationReport) {
        let (payload, check) = cleaned.split_at(ISBN10_LENGTH - 1);
        let check_ok = check.bytes().all(|b| b.is_ascii_digit() || b == b'X');
        if !is_numeric(payload) || !check_ok {
            report.push(ValidationIssue::NonNumeric);
            return;
        }
        if Self::isbn10_check(payload).map(String::from).as_deref() != Some(check) {
            report.push(ValidationIssue::ChecksumMismatch);
        }
    }

    fn inspect13(cleaned: &str, report: &mut ValidationReport) {
        if !is_numeric(cleaned) {
            report.push(ValidationIssue::NonNumeric);
            return;
        }
        if !Self::has_bookland_prefix(cleaned) {
            report.push(ValidationIssue::InvalidPrefix);
            return;
        }
        let (payload, check) = cleaned.split_at(ISBN13_LENGTH - 1);
        if Self::isbn13_check(payload).map(String::from).as_deref() != Some(check) {
            report.push(ValidationIssue::ChecksumMismatch);
        }
    }
}

impl IdentifierFormat for Isbn {
    fn kind(&self) -> FormatKind {
        FormatKind::Isbn
    }

    fn expected_length(&self) -> ExpectedLength {
        ExpectedLength::Range {
            min: ISBN10_LENGTH,
            max: ISBN13_LENGTH,
        }
    }

    fn inspect(&self, input: &str) -> ValidationReport {
        let cleaned = clean(input);
        let mut report = ValidationReport::new(FormatKind::Isbn, cleaned.as_str());
        if cleaned.is_empty() {
            return report.with(ValidationIssue::Empty);
        }
        if !cleaned.is_ascii() {
            return report.with(ValidationIssue::NonNumeric);
        }
        match cleaned.len() {
            ISBN10_LENGTH => Self::inspect10(&cleaned, &mut report),
            ISBN13_LENGTH => Self::inspect13(&cleaned, &mut report),
            actual => report.push(ValidationIssue::InvalidLength {
                expected: format!("{ISBN10_LENGTH} or {ISBN13_LENGTH}"),
                actual,
            }),
        }
        report
    }

    fn validate_optional(&self, input: Option<&str>) -> Result<bool, FormatError> {
        match input {
            Some(s) => Ok(self.validate(s)),
            None => Err(FormatError::MissingInput { format: NAME }),
        }
    }

    fn generate(&self, rng: &mut dyn RngCore) -> String {
        generate_until_ok(FormatKind::Isbn, rng, |rng| {
            if rng.gen_bool(ISBN13_SHARE) {
                let (ean, grp, _) = GROUPS[rng.gen_range(0..GROUPS.len())];
                Self::finish13(&pad_random(&format!("{ean}{grp}"), ISBN13_LENGTH - 1, rng))
            } else {
                let groups: Vec<_> = GROUPS.iter().filter(|(ean, _, _)| *ean == "978").collect();
                let (_, grp, _) = groups[rng.gen_range(0..groups.len())];
                Self::finish10(&pad_random(grp, ISBN10_LENGTH - 1, rng))
            }
        })
    }

    fn complete(&self, partial: &str, rng: &mut dyn RngCore) -> Result<String, FormatError> {
        let cleaned = clean(partial);
        let len = cleaned.chars().count();
        for (i, c) in cleaned.chars().enumerate() {
            let trailing_x = c == 'X' && len == ISBN10_LENGTH && i == len - 1;
            if !c.is_ascii_digit() && !trailing_x {
                return Err(FormatError::InvalidPrefixPattern {
                    format: NAME,
                    reason: format!("unexpected character {c:?} at position {}", i + 1),
                });
            }
        }
        if len < MIN_PREFIX_LENGTH {
            return Err(FormatError::InvalidPrefixLength {
                format: NAME,
                expected: format!("at least {MIN_PREFIX_LENGTH}"),
                actual: len,
            });
        }

        if len < ISBN10_LENGTH {
            return Self::finish10(&pad_random(&cleaned, ISBN10_LENGTH - 1, rng));
        }

        let body = if len == ISBN10_LENGTH
            && (!Self::has_bookland_prefix(&cleaned) || cleaned.ends_with('X'))
        {
            tracing::debug!(partial = %cleaned, "reading 10-character partial as ISBN-10");
            format!("978{}", &cleaned[..ISBN10_LENGTH - 1])
        } else if !Self::has_bookland_prefix(&cleaned) {
            tracing::debug!(partial = %cleaned, "prepending 978 to ISBN partial");
            format!("978{cleaned}")
        } else {
            cleaned
        };

        if body.len() >= ISBN13_LENGTH {
            return Err(FormatError::AlreadyComplete {
                format: NAME,
                length: body.len(),
            });
        }
        Self::finish13(&pad_random(&body, ISBN13_LENGTH - 1, rng))
    }

    fn format(&self, cleaned: &str) -> String {
        Self::format_isbn(cleaned)
    }
}
