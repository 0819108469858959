//! # Bank Account Number (TR IBAN)
//!
//! 26 characters: `TR`, two check digits, a 5-digit bank code, one reserved
//! digit that is always `0`, and a 16-digit account number.
//!
//! ```text
//! TR 32 00100 0 9999901234567890
//! │  │  │     │ └ account number (16)
//! │  │  │     └ reserved (0)
//! │  │  └ bank code (5)
//! │  └ check digits (2)
//! └ country code
//! ```
//!
//! ## Checksum
//!
//! ISO 13616 mod-97: move the first four characters to the end, replace
//! letters by `A=10 … Z=35`, and require the resulting decimal number to
//! leave remainder 1 modulo 97. The number is far wider than `u64`, so the
//! remainder is folded in 9-digit chunks.
//!
//! ## Completion
//!
//! Unlike the other formats, [`Iban`] completion is lenient and never
//! rejects user input: a missing `TR` is prepended, user check digits are
//! recomputed, and short inputs are filled with zeros or a fresh account.

use rand::{Rng, RngCore};

use crate::digits::{chunked, clean, is_numeric, random_digits, zero_padded};
use crate::error::{FormatError, ValidationIssue};
use crate::formats::{generate_until_ok, IdentifierFormat};
use crate::kind::{ExpectedLength, FormatKind};
use crate::report::ValidationReport;

/// Canonical length.
pub const LENGTH: usize = 26;

/// ISO 3166 country code this format models.
pub const COUNTRY_CODE: &str = "TR";

/// Digits after the check digits: bank code + reserved digit + account.
const BBAN_LENGTH: usize = 22;
const BANK_CODE_LENGTH: usize = 5;
const ACCOUNT_LENGTH: usize = 16;
/// Index of the reserved digit within the full IBAN.
const RESERVED_INDEX: usize = 9;
/// Digits folded into the running remainder per step.
const CHUNK: usize = 9;

/// Turkish bank codes and the institutions they belong to.
const BANKS: &[(&str, &str)] = &[
    ("00010", "T.C. Ziraat Bankası"),
    ("00012", "Türkiye Halk Bankası"),
    ("00015", "Türkiye Vakıflar Bankası"),
    ("00032", "Türk Ekonomi Bankası"),
    ("00046", "Akbank"),
    ("00059", "Şekerbank"),
    ("00062", "Türkiye Garanti Bankası"),
    ("00064", "Türkiye İş Bankası"),
    ("00067", "Yapı ve Kredi Bankası"),
    ("00099", "ING Bank"),
    ("00111", "QNB Finansbank"),
    ("00123", "HSBC Bank"),
    ("00124", "Alternatifbank"),
    ("00134", "Denizbank"),
    ("00135", "Anadolubank"),
    ("00143", "Aktif Yatırım Bankası"),
    ("00146", "Odea Bank"),
    ("00203", "Albaraka Türk Katılım Bankası"),
    ("00205", "Kuveyt Türk Katılım Bankası"),
    ("00206", "Türkiye Finans Katılım Bankası"),
    ("00209", "Ziraat Katılım Bankası"),
    ("00210", "Vakıf Katılım Bankası"),
];

const NAME: &str = "iban";

/// Turkish IBAN format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Iban;

/// The fields of a 26-character TR IBAN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IbanParts {
    /// `TR`.
    pub country: String,
    /// Two check digits.
    pub check_digits: String,
    /// Five-digit bank code.
    pub bank_code: String,
    /// Reserved digit, `0` in a valid IBAN.
    pub reserved: char,
    /// Sixteen-digit account number.
    pub account: String,
}

/// Remainder of a decimal string modulo 97, folded in fixed-size chunks.
///
/// # Errors
///
/// Returns [`FormatError::ChecksumComputation`] if `numeric` contains a
/// non-digit.
pub fn mod97(numeric: &str) -> Result<u32, FormatError> {
    let mut remainder: u64 = 0;
    let bytes = numeric.as_bytes();
    for chunk in bytes.chunks(CHUNK) {
        let part = std::str::from_utf8(chunk)
            .ok()
            .filter(|s| is_numeric(s))
            .ok_or_else(|| {
                FormatError::ChecksumComputation(format!("non-numeric chunk in {numeric:?}"))
            })?;
        let block = format!("{remainder}{part}");
        let value: u64 = block.parse().map_err(|e| {
            FormatError::ChecksumComputation(format!("cannot parse block {block:?}: {e}"))
        })?;
        remainder = value % 97;
    }
    Ok(remainder as u32)
}

/// Move the first four characters to the end and expand letters to their
/// two-digit codes (`A=10 … Z=35`).
fn rearranged_numeric(iban: &str) -> Result<String, FormatError> {
    if iban.len() < 4 || !iban.is_ascii() {
        return Err(FormatError::ChecksumComputation(format!(
            "cannot rearrange {iban:?}"
        )));
    }
    let rotated = format!("{}{}", &iban[4..], &iban[..4]);
    let mut out = String::with_capacity(rotated.len() * 2);
    for c in rotated.chars() {
        match c {
            '0'..='9' => out.push(c),
            'A'..='Z' => out.push_str(&(c as u32 - 'A' as u32 + 10).to_string()),
            other => {
                return Err(FormatError::ChecksumComputation(format!(
                    "unexpected character {other:?} in {iban:?}"
                )))
            }
        }
    }
    Ok(out)
}

impl Iban {
    /// Mod-97 remainder of a full IBAN after rearrangement. A valid IBAN
    /// yields 1.
    pub fn remainder(iban: &str) -> Result<u32, FormatError> {
        mod97(&rearranged_numeric(iban)?)
    }

    /// Two check digits for a 22-digit BBAN under country code `TR`.
    pub fn check_digits(bban: &str) -> Result<String, FormatError> {
        let provisional = format!("{COUNTRY_CODE}00{bban}");
        let remainder = Self::remainder(&provisional)?;
        Ok(zero_padded(98 - remainder, 2))
    }

    /// Assemble `TR` + check digits + `bban`.
    fn assemble(bban: &str) -> Result<String, FormatError> {
        let check = Self::check_digits(bban)?;
        Ok(format!("{COUNTRY_CODE}{check}{bban}"))
    }

    /// Institution name for a 5-digit bank code.
    pub fn bank_name(code: &str) -> Option<&'static str> {
        BANKS
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| *name)
    }

    /// The bank code table.
    pub fn banks() -> &'static [(&'static str, &'static str)] {
        BANKS
    }

    /// Split a 26-character IBAN into its fields. Does not verify the
    /// checksum.
    pub fn parts(input: &str) -> Option<IbanParts> {
        let cleaned = clean(input);
        if cleaned.len() != LENGTH || !cleaned.is_ascii() {
            return None;
        }
        Some(IbanParts {
            country: cleaned[..2].to_string(),
            check_digits: cleaned[2..4].to_string(),
            bank_code: cleaned[4..9].to_string(),
            reserved: cleaned.as_bytes()[RESERVED_INDEX] as char,
            account: cleaned[10..].to_string(),
        })
    }

    fn random_bban(rng: &mut dyn RngCore) -> String {
        let (bank_code, _) = BANKS[rng.gen_range(0..BANKS.len())];
        format!("{bank_code}0{}", random_digits(rng, ACCOUNT_LENGTH))
    }

    fn generate_raw(rng: &mut dyn RngCore) -> Result<String, FormatError> {
        Self::assemble(&Self::random_bban(rng))
    }
}

impl IdentifierFormat for Iban {
    fn kind(&self) -> FormatKind {
        FormatKind::Iban
    }

    fn expected_length(&self) -> ExpectedLength {
        ExpectedLength::Exact(LENGTH)
    }

    fn inspect(&self, input: &str) -> ValidationReport {
        let cleaned = clean(input);
        let mut report = ValidationReport::new(FormatKind::Iban, cleaned.as_str());
        if cleaned.is_empty() {
            return report.with(ValidationIssue::Empty);
        }
        if !cleaned.starts_with(COUNTRY_CODE) {
            report.push(ValidationIssue::InvalidCountryCode);
        }
        if cleaned.len() != LENGTH {
            report.push(ValidationIssue::InvalidLength {
                expected: LENGTH.to_string(),
                actual: cleaned.len(),
            });
        }
        if !cleaned.is_ascii() || !is_numeric(cleaned.get(2..).unwrap_or_default()) {
            report.push(ValidationIssue::NonNumeric);
        }
        if !report.is_valid() {
            return report;
        }
        if cleaned.as_bytes()[RESERVED_INDEX] != b'0' {
            return report.with(ValidationIssue::ReservedDigitNotZero);
        }
        match Self::remainder(&cleaned) {
            Ok(1) => {}
            _ => report.push(ValidationIssue::ChecksumMismatch),
        }
        report
    }

    fn generate(&self, rng: &mut dyn RngCore) -> String {
        generate_until_ok(FormatKind::Iban, rng, |rng| {
            Self::generate_raw(rng).map(|iban| self.format(&iban))
        })
    }

    /// Lenient completion; never fails for user input.
    fn complete(&self, prefix: &str, rng: &mut dyn RngCore) -> Result<String, FormatError> {
        let mut cleaned = clean(prefix);
        if !cleaned.starts_with(COUNTRY_CODE) {
            cleaned.insert_str(0, COUNTRY_CODE);
        }
        let body = &cleaned[COUNTRY_CODE.len()..];

        if body.len() <= 2 || !is_numeric(body) {
            tracing::debug!(prefix = %cleaned, "IBAN prefix has no usable BBAN, generating fresh");
            return Ok(self.generate(rng));
        }

        let given = &body[2..];
        let bban = if given.len() <= BANK_CODE_LENGTH {
            format!(
                "{given:0<width$}0{account}",
                width = BANK_CODE_LENGTH,
                account = random_digits(rng, ACCOUNT_LENGTH)
            )
        } else {
            let mut padded = format!("{given:0<BBAN_LENGTH$}");
            padded.truncate(BBAN_LENGTH);
            padded
        };

        if bban.as_bytes()[BANK_CODE_LENGTH] != b'0' {
            tracing::warn!(
                prefix = %cleaned,
                "IBAN reserved digit is not 0; completed IBAN will not validate"
            );
        }

        let iban = Self::assemble(&bban)?;
        Ok(self.format(&iban))
    }

    fn format(&self, cleaned: &str) -> String {
        chunked(cleaned, 4, ' ')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x1ba)
    }

    #[test]
    fn reference_vector() {
        assert!(Iban.validate("TR320010009999901234567890"));
        assert_eq!(Iban::remainder("TR320010009999901234567890"), Ok(1));
    }

    #[test]
    fn formatted_and_lowercase_input_validates() {
        assert!(Iban.validate("tr32 0010 0099 9990 1234 5678 90"));
    }

    #[test]
    fn check_digits_recomputed() {
        assert_eq!(
            Iban::check_digits("0010009999901234567890").unwrap(),
            "32"
        );
    }

    #[test]
    fn mod97_matches_small_values() {
        assert_eq!(mod97("97"), Ok(0));
        assert_eq!(mod97("98"), Ok(1));
        assert_eq!(mod97("123456789012345678901234567890"), Ok(
            (123456789012345678901234567890u128 % 97) as u32
        ));
        assert!(matches!(
            mod97("12a4"),
            Err(FormatError::ChecksumComputation(_))
        ));
    }

    #[test]
    fn validate_rejects_structural_problems() {
        let report = Iban.inspect("DE320010009999901234567890");
        assert!(report.has(&ValidationIssue::InvalidCountryCode));

        let report = Iban.inspect("TR320010019999901234567890");
        assert_eq!(report.issues, vec![ValidationIssue::ReservedDigitNotZero]);

        let report = Iban.inspect("TR33001000999990123456789");
        assert!(report.has(&ValidationIssue::InvalidLength {
            expected: "26".into(),
            actual: 25
        }));

        assert!(!Iban.validate("TR330010009999901234567890"));
        assert!(!Iban.validate(""));
        assert!(!Iban.validate("00000000000000000000000000"));
        assert!(!Iban.validate("TR3200100099999012345678901"));
    }

    #[test]
    fn parts_split_fields() {
        let parts = Iban::parts("TR32 0010 0099 9990 1234 5678 90").unwrap();
        assert_eq!(parts.country, "TR");
        assert_eq!(parts.check_digits, "32");
        assert_eq!(parts.bank_code, "00100");
        assert_eq!(parts.reserved, '0');
        assert_eq!(parts.account, "9999901234567890");
        assert!(Iban::parts("TR32").is_none());
    }

    #[test]
    fn bank_lookup() {
        assert_eq!(Iban::bank_name("00062"), Some("Türkiye Garanti Bankası"));
        assert_eq!(Iban::bank_name("99999"), None);
    }

    #[test]
    fn generated_ibans_validate() {
        let mut rng = rng();
        for _ in 0..200 {
            let iban = Iban.generate(&mut rng);
            assert_eq!(iban.len(), LENGTH + 6, "expected 7 groups in {iban}");
            assert!(Iban.validate(&iban), "generated {iban} failed validation");
            let parts = Iban::parts(&iban).unwrap();
            assert!(Iban::bank_name(&parts.bank_code).is_some());
        }
    }

    #[test]
    fn complete_prepends_country_code() {
        let mut rng = rng();
        let iban = Iban.complete("00 00062 0", &mut rng).unwrap();
        let cleaned = clean(&iban);
        assert!(cleaned.starts_with("TR"));
        assert_eq!(&cleaned[4..10], "000620");
        assert!(Iban.validate(&iban));
    }

    #[test]
    fn complete_short_bank_code_is_zero_padded() {
        let mut rng = rng();
        let iban = Iban.complete("TR0000", &mut rng).unwrap();
        let parts = Iban::parts(&iban).unwrap();
        assert_eq!(parts.bank_code, "00000");
        assert!(Iban.validate(&iban));
    }

    #[test]
    fn complete_long_prefix_is_zero_padded() {
        let mut rng = rng();
        let iban = Iban.complete("TR99 0006 2000 1234", &mut rng).unwrap();
        let cleaned = clean(&iban);
        assert!(cleaned.starts_with("TR"));
        assert_eq!(&cleaned[4..16], "000620001234");
        assert!(cleaned.ends_with("0000000000"));
        assert!(Iban.validate(&iban));
    }

    #[test]
    fn complete_never_fails_on_garbage() {
        let mut rng = rng();
        for input in ["", "TR", "X", "TRAB12", "hello world", "TR1"] {
            let iban = Iban.complete(input, &mut rng).unwrap();
            assert!(Iban.validate(&iban), "{input:?} -> {iban}");
        }
    }

    #[test]
    fn complete_keeps_nonzero_reserved_digit() {
        let mut rng = rng();
        let iban = Iban.complete("TR00000621", &mut rng).unwrap();
        let parts = Iban::parts(&iban).unwrap();
        assert_eq!(parts.reserved, '1');
        assert!(!Iban.validate(&iban));
    }

    #[test]
    fn complete_truncates_overlong_input() {
        let mut rng = rng();
        let iban = Iban.complete("TR000006200000000000000000000099", &mut rng).unwrap();
        assert_eq!(clean(&iban).len(), LENGTH);
        assert!(Iban.validate(&iban));
    }
}
