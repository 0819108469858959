//! # National ID (TC Kimlik No)
//!
//! 11-digit national identity number. The first digit is never `0`, and the
//! last two digits are check digits computed from the first nine:
//!
//! - `t1` = sum of digits 1, 3, 5, 7, 9 (1-indexed)
//! - `t2` = sum of digits 2, 4, 6, 8
//! - `d10 = (10 - ((3·t1 + t2) mod 10)) mod 10`
//! - `d11 = (10 - ((3·(t2 + d10) + t1) mod 10)) mod 10`
//!
//! The ten all-repeating 11-digit strings are rejected regardless of
//! checksum, and the nine all-repeating 9-digit payloads are never
//! completed.

use rand::{Rng, RngCore};

use crate::digits::{clean, digit_char, digit_values, is_numeric, random_digits};
use crate::error::{FormatError, ValidationIssue};
use crate::formats::IdentifierFormat;
use crate::kind::{ExpectedLength, FormatKind};
use crate::report::ValidationReport;

/// Canonical length.
pub const LENGTH: usize = 11;

/// Length of the payload the check digits are computed from.
pub const PAYLOAD_LENGTH: usize = 9;

const NAME: &str = "tckn";

/// National identity number format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tckn;

/// True if every character of `s` is the same.
fn is_repeating(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => false,
    }
}

impl Tckn {
    /// The two check digits for a 9-digit payload, or `None` if `payload`
    /// is not exactly nine digits.
    pub fn check_digits(payload: &str) -> Option<(u32, u32)> {
        let d = digit_values(payload)?;
        if d.len() != PAYLOAD_LENGTH {
            return None;
        }
        let t1 = d[0] + d[2] + d[4] + d[6] + d[8];
        let t2 = d[1] + d[3] + d[5] + d[7];
        let d10 = (10 - (t1 * 3 + t2) % 10) % 10;
        let d11 = (10 - ((t2 + d10) * 3 + t1) % 10) % 10;
        Some((d10, d11))
    }

    fn check_payload(payload: &str) -> Result<(), FormatError> {
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
        if !is_numeric(payload) {
            return Err(FormatError::InvalidPrefixPattern {
                format: NAME,
                reason: "prefix must contain only digits".into(),
            });
        }
        if payload.starts_with('0') {
            return Err(FormatError::InvalidPrefixPattern {
                format: NAME,
                reason: "prefix must not start with 0".into(),
            });
        }
        if is_repeating(payload) {
            return Err(FormatError::InvalidPrefixPattern {
                format: NAME,
                reason: format!("repeating prefix {payload} is not allowed"),
            });
        }
        Ok(())
    }
}

impl IdentifierFormat for Tckn {
    fn kind(&self) -> FormatKind {
        FormatKind::Tckn
    }

    fn expected_length(&self) -> ExpectedLength {
        ExpectedLength::Exact(LENGTH)
    }

    fn inspect(&self, input: &str) -> ValidationReport {
        let cleaned = clean(input);
        let mut report = ValidationReport::new(FormatKind::Tckn, cleaned.as_str());
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
            return report.with(ValidationIssue::NonNumeric);
        }
        if cleaned.starts_with('0') {
            report.push(ValidationIssue::LeadingZero);
        }
        if !report.is_valid() {
            return report;
        }
        if is_repeating(&cleaned) {
            return report.with(ValidationIssue::RepeatingPattern);
        }
        let expected = Self::check_digits(&cleaned[..PAYLOAD_LENGTH])
            .map(|(d10, d11)| format!("{}{}", digit_char(d10), digit_char(d11)));
        if expected.as_deref() != Some(&cleaned[PAYLOAD_LENGTH..]) {
            report.push(ValidationIssue::ChecksumMismatch);
        }
        report
    }

    fn generate(&self, rng: &mut dyn RngCore) -> String {
        loop {
            let first = digit_char(rng.gen_range(1..10));
            let payload = format!("{first}{}", random_digits(rng, PAYLOAD_LENGTH - 1));
            if is_repeating(&payload) {
                continue;
            }
            if let Ok(id) = self.complete(&payload, rng) {
                return id;
            }
        }
    }

    fn complete(&self, prefix: &str, _rng: &mut dyn RngCore) -> Result<String, FormatError> {
        let payload = clean(prefix);
        Self::check_payload(&payload)?;
        let (d10, d11) = Self::check_digits(&payload).ok_or_else(|| {
            FormatError::ChecksumComputation(format!("{NAME}: payload {payload} is not numeric"))
        })?;
        Ok(format!("{payload}{}{}", digit_char(d10), digit_char(d11)))
    }

    fn format(&self, cleaned: &str) -> String {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x7c)
    }

    #[test]
    fn reference_vector() {
        assert_eq!(Tckn::check_digits("123456789"), Some((5, 0)));
        assert_eq!(Tckn.complete("123456789", &mut rng()).unwrap(), "12345678950");
        assert!(Tckn.validate("12345678950"));
    }

    #[test]
    fn completion_is_deterministic() {
        let a = Tckn.complete("387654321", &mut StdRng::seed_from_u64(1)).unwrap();
        let b = Tckn.complete("387654321", &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn validate_accepts_formatted_input() {
        assert!(Tckn.validate(" 123 456 789 50 "));
    }

    #[test]
    fn validate_rejects_wrong_check_digits() {
        let report = Tckn.inspect("12345678951");
        assert_eq!(report.issues, vec![ValidationIssue::ChecksumMismatch]);
    }

    #[test]
    fn validate_rejects_leading_zero() {
        let report = Tckn.inspect("01234567890");
        assert!(report.has(&ValidationIssue::LeadingZero));
    }

    #[test]
    fn validate_rejects_repeating_patterns() {
        for d in 1..=9 {
            let repeated = d.to_string().repeat(LENGTH);
            assert!(!Tckn.validate(&repeated), "{repeated} should be rejected");
        }
        assert!(!Tckn.validate("00000000000"));
    }

    #[test]
    fn validate_boundaries() {
        assert!(!Tckn.validate(""));
        assert!(!Tckn.validate("1234567895"));
        assert!(!Tckn.validate("123456789501"));
        assert!(!Tckn.validate("1234567895X"));
        assert_eq!(Tckn.inspect("   ").issues, vec![ValidationIssue::Empty]);
    }

    #[test]
    fn complete_rejects_bad_prefixes() {
        let mut rng = rng();
        assert!(matches!(
            Tckn.complete("12345678", &mut rng),
            Err(FormatError::InvalidPrefixLength { actual: 8, .. })
        ));
        assert!(matches!(
            Tckn.complete("12345678950", &mut rng),
            Err(FormatError::AlreadyComplete { length: 11, .. })
        ));
        assert!(matches!(
            Tckn.complete("023456789", &mut rng),
            Err(FormatError::InvalidPrefixPattern { .. })
        ));
        assert!(matches!(
            Tckn.complete("777777777", &mut rng),
            Err(FormatError::InvalidPrefixPattern { .. })
        ));
        assert!(matches!(
            Tckn.complete("12345678a", &mut rng),
            Err(FormatError::InvalidPrefixPattern { .. })
        ));
    }

    #[test]
    fn generated_ids_validate() {
        let mut rng = rng();
        for _ in 0..200 {
            let id = Tckn.generate(&mut rng);
            assert_eq!(id.len(), LENGTH);
            assert!(!id.starts_with('0'));
            assert!(Tckn.validate(&id), "generated {id} failed validation");
        }
    }
}
