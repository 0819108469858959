//! # Mobile Equipment Identifier (IMEI)
//!
//! 15 digits: an 8-digit type allocation code (TAC), a 6-digit serial
//! number and a Luhn check digit. Displayed as `AA-BBBBBB-CCCCCC-D`.

use rand::{Rng, RngCore};

use crate::digits::{clean, digit_char, group, is_numeric, pad_random, random_digits};
use crate::error::{FormatError, ValidationIssue};
use crate::formats::{generate_until_ok, luhn, IdentifierFormat};
use crate::kind::{ExpectedLength, FormatKind};
use crate::report::ValidationReport;

/// Canonical length.
pub const LENGTH: usize = 15;
/// Type allocation code length; also the shortest completable prefix.
pub const TAC_LENGTH: usize = 8;
const SERIAL_LENGTH: usize = 6;

const NAME: &str = "imei";

/// Type allocation codes used for generation.
const TACS: &[&str] = &[
    "35209900", "35332510", "35391110", "35404906", "35682807", "35847631", "35875410",
    "35161508", "35290611", "35925406", "86891203", "86753203", "86449803", "01326300",
    "01332700", "35719808",
];

/// Imei format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Imei;

/// The fields of a 15-digit IMEI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImeiParts {
    pub tac: String,
    pub serial: String,
    pub check: char,
}

impl Imei {
    /// Split a 15-digit IMEI into TAC, serial and check digit. Does not
    /// verify the checksum.
    pub fn parts(input: &str) -> Option<ImeiParts> {
        let cleaned = clean(input);
        if cleaned.len() != LENGTH || !is_numeric(&cleaned) {
            return None;
        }
        Some(ImeiParts {
            tac: cleaned[..TAC_LENGTH].to_string(),
            serial: cleaned[TAC_LENGTH..LENGTH - 1].to_string(),
            check: cleaned.as_bytes()[LENGTH - 1] as char,
        })
    }

    /// Append the Luhn digit to a 14-digit body.
    fn finish(body: &str) -> Result<String, FormatError> {
        let check = luhn::check_digit(body).ok_or_else(|| {
            FormatError::ChecksumComputation(format!("{NAME}: body {body} is not numeric"))
        })?;
        Ok(format!("{body}{}", digit_char(check)))
    }
}

impl IdentifierFormat for Imei {
    fn kind(&self) -> FormatKind {
        FormatKind::Imei
    }

    fn expected_length(&self) -> ExpectedLength {
        ExpectedLength::Exact(LENGTH)
    }

    fn inspect(&self, input: &str) -> ValidationReport {
        let cleaned = clean(input);
        let mut report = ValidationReport::new(FormatKind::Imei, cleaned.as_str());
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
        if report.is_valid() && !luhn::is_valid(&cleaned) {
            report.push(ValidationIssue::ChecksumMismatch);
        }
        report
    }

    fn generate(&self, rng: &mut dyn RngCore) -> String {
        generate_until_ok(FormatKind::Imei, rng, |rng| {
            let tac = TACS[rng.gen_range(0..TACS.len())];
            let body = format!("{tac}{}", random_digits(rng, SERIAL_LENGTH));
            Self::finish(&body).map(|imei| self.format(&imei))
        })
    }

    fn complete(&self, prefix: &str, rng: &mut dyn RngCore) -> Result<String, FormatError> {
        let cleaned = clean(prefix);
        let too_short = || FormatError::InvalidPrefixLength {
            format: NAME,
            expected: format!("{TAC_LENGTH}-{}", LENGTH - 1),
            actual: cleaned.len(),
        };
        if cleaned.is_empty() {
            return Err(too_short());
        }
        if !is_numeric(&cleaned) {
            return Err(FormatError::InvalidPrefixPattern {
                format: NAME,
                reason: "prefix must contain only digits".into(),
            });
        }
        if cleaned.len() >= LENGTH {
            return Err(FormatError::AlreadyComplete {
                format: NAME,
                length: cleaned.len(),
            });
        }
        if cleaned.len() < TAC_LENGTH {
            return Err(too_short());
        }
        let body = pad_random(&cleaned, LENGTH - 1, rng);
        Self::finish(&body).map(|imei| self.format(&imei))
    }

    fn format(&self, cleaned: &str) -> String {
        if cleaned.len() == LENGTH {
            group(cleaned, &[2, 6, 6, 1], '-')
        } else {
            cleaned.to_string()
        }
    }
}
