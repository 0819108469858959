//! # Tax ID (Vergi Kimlik No)
//!
//! 10-digit tax number. The last digit is a check digit over the first nine:
//! for position `i` (1-indexed) holding digit `d`, `p = (d + 10 - i) mod 10`;
//! `q = 9` when `p == 9`, otherwise `q = (p · 2^(10-i)) mod 9`. The check
//! digit is `(10 - (Σq mod 10)) mod 10`.

use rand::RngCore;

use crate::digits::{clean, digit_char, digit_values, is_numeric, random_digits};
use crate::error::{FormatError, ValidationIssue};
use crate::formats::IdentifierFormat;
use crate::kind::{ExpectedLength, FormatKind};
use crate::report::ValidationReport;

/// Canonical length.
pub const LENGTH: usize = 10;

/// Length of the payload the check digit is computed from.
pub const PAYLOAD_LENGTH: usize = 9;

const NAME: &str = "vkn";

/// Tax identification number format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vkn;

impl Vkn {
    /// Check digit for a 9-digit payload, or `None` if `payload` is not
    /// exactly nine digits.
    pub fn check_digit(payload: &str) -> Option<u32> {
        let digits = digit_values(payload)?;
        if digits.len() != PAYLOAD_LENGTH {
            return None;
        }
        let sum: u32 = digits
            .iter()
            .enumerate()
            .map(|(idx, &d)| {
                let i = idx as u32 + 1;
                let p = (d + 10 - i) % 10;
                if p == 9 {
                    9
                } else {
                    (p * (1 << (10 - i))) % 9
                }
            })
            .sum();
        Some((10 - sum % 10) % 10)
    }
}

impl IdentifierFormat for Vkn {
    fn kind(&self) -> FormatKind {
        FormatKind::Vkn
    }

    fn expected_length(&self) -> ExpectedLength {
        ExpectedLength::Exact(LENGTH)
    }

    fn inspect(&self, input: &str) -> ValidationReport {
        let cleaned = clean(input);
        let mut report = ValidationReport::new(FormatKind::Vkn, cleaned.as_str());
        if cleaned.is_empty() {
            return report.with(ValidationIssue::Empty);
        }
        if cleaned.len() != LENGTH {
            report.push(ValidationIssue::InvalidLength {
                expected: LENGTH.to_string(),
                actual: cleaned.len(),
            });
        }
        if !is_numeric(&cleaned) {
            report.push(ValidationIssue::NonNumeric);
        }
        if !report.is_valid() {
            return report;
        }
        let expected = Self::check_digit(&cleaned[..PAYLOAD_LENGTH]).map(digit_char);
        if expected != cleaned.chars().last() {
            report.push(ValidationIssue::ChecksumMismatch);
        }
        report
    }

    fn generate(&self, rng: &mut dyn RngCore) -> String {
        let payload = random_digits(rng, PAYLOAD_LENGTH);
        let check = Self::check_digit(&payload).unwrap_or(0);
        format!("{payload}{}", digit_char(check))
    }

    fn complete(&self, prefix: &str, _rng: &mut dyn RngCore) -> Result<String, FormatError> {
        let payload = clean(prefix);
        if payload.len() >= LENGTH {
            return Err(FormatError::AlreadyComplete {
                format: NAME,
                length: payload.len(),
            });
        }
        if payload.len() != PAYLOAD_LENGTH {
            return Err(FormatError::InvalidPrefixLength {
                format: NAME,
                expected: PAYLOAD_LENGTH.to_string(),
                actual: payload.len(),
            });
        }
        let check = Self::check_digit(&payload).ok_or_else(|| FormatError::InvalidPrefixPattern {
            format: NAME,
            reason: "prefix must contain only digits".into(),
        })?;
        Ok(format!("{payload}{}", digit_char(check)))
    }

    fn format(&self, cleaned: &str) -> String {
        cleaned.to_string()
    }
}
