//! # Digit-String Utilities
//!
//! Shared helpers for turning free-form input into a canonical candidate
//! string and for rendering identifiers back into grouped display form.
//! Every format cleans its input through [`clean`] before looking at it.

use rand::{Rng, RngCore};

/// Strip formatting characters and normalize case.
///
/// Removes whitespace, hyphens and dots, and uppercases ASCII letters.
/// Every other character is kept in its original order, so digits are never
/// dropped or reordered. Whitespace-only input yields an empty string.
pub fn clean(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '.')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// True if `s` is non-empty and consists only of ASCII digits.
pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Numeric values of each character, or `None` if any character is not an
/// ASCII digit.
pub fn digit_values(s: &str) -> Option<Vec<u32>> {
    s.chars().map(|c| c.to_digit(10)).collect()
}

/// Convert a value in `0..=9` to its ASCII digit.
pub(crate) fn digit_char(value: u32) -> char {
    char::from_digit(value % 10, 10).unwrap_or('0')
}

/// Insert `sep` between groups of the given sizes.
///
/// Characters beyond the sum of `sizes` form one trailing group; a short
/// string simply ends early.
///
/// ```
/// use idforge_core::digits::group;
/// assert_eq!(group("4532015112830366", &[4, 4, 4, 4], ' '), "4532 0151 1283 0366");
/// assert_eq!(group("12345", &[2, 2], '-'), "12-34-5");
/// ```
pub fn group(s: &str, sizes: &[usize], sep: char) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(chars.len() + sizes.len());
    let mut pos = 0;
    for &size in sizes {
        if pos >= chars.len() {
            break;
        }
        let end = (pos + size).min(chars.len());
        if pos > 0 {
            out.push(sep);
        }
        out.extend(&chars[pos..end]);
        pos = end;
    }
    if pos < chars.len() {
        if pos > 0 {
            out.push(sep);
        }
        out.extend(&chars[pos..]);
    }
    out
}

/// Split into fixed-size chunks joined by `sep` (last chunk may be short).
pub fn chunked(s: &str, size: usize, sep: char) -> String {
    let sizes = vec![size; s.len().div_ceil(size.max(1))];
    group(s, &sizes, sep)
}

/// `n` uniformly random decimal digits.
pub fn random_digits(rng: &mut dyn RngCore, n: usize) -> String {
    (0..n).map(|_| digit_char(rng.gen_range(0..10))).collect()
}

/// Extend `prefix` with random digits up to `len` characters.
///
/// A prefix already at or past `len` is truncated to `len`.
pub fn pad_random(prefix: &str, len: usize, rng: &mut dyn RngCore) -> String {
    if prefix.len() >= len {
        return prefix[..len].to_string();
    }
    let mut out = String::with_capacity(len);
    out.push_str(prefix);
    out.push_str(&random_digits(rng, len - prefix.len()));
    out
}

/// Zero-padded decimal rendering of `value` in exactly `width` digits.
pub(crate) fn zero_padded(value: u32, width: usize) -> String {
    format!("{value:0width$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn clean_strips_separators() {
        assert_eq!(clean("123 456-789.01"), "12345678901");
        assert_eq!(clean("tr32 0010 0099"), "TR3200100099");
        assert_eq!(clean("0-201-61622-x"), "020161622X");
    }

    #[test]
    fn clean_empty_and_whitespace() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   \t\n "), "");
    }

    #[test]
    fn clean_keeps_other_characters_in_order() {
        assert_eq!(clean("12a/3"), "12A/3");
    }

    #[test]
    fn numeric_checks() {
        assert!(is_numeric("0123"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("12X"));
        assert_eq!(digit_values("907"), Some(vec![9, 0, 7]));
        assert_eq!(digit_values("9a7"), None);
    }

    #[test]
    fn group_exact_and_remainder() {
        assert_eq!(group("978020161622", &[3, 1, 3, 5], '-'), "978-0-201-61622");
        assert_eq!(group("1234567890123", &[3, 1, 3, 5], '-'), "123-4-567-89012-3");
        assert_eq!(group("", &[4], ' '), "");
        assert_eq!(group("12", &[4, 4], ' '), "12");
    }

    #[test]
    fn chunked_groups_of_four() {
        assert_eq!(
            chunked("TR320010009999901234567890", 4, ' '),
            "TR32 0010 0099 9990 1234 5678 90"
        );
    }

    #[test]
    fn pad_random_extends_and_truncates() {
        let mut rng = StdRng::seed_from_u64(7);
        let padded = pad_random("35", 8, &mut rng);
        assert_eq!(padded.len(), 8);
        assert!(padded.starts_with("35"));
        assert!(is_numeric(&padded));

        assert_eq!(pad_random("123456", 4, &mut rng), "1234");
    }

    #[test]
    fn zero_padding() {
        assert_eq!(zero_padded(7, 2), "07");
        assert_eq!(zero_padded(46, 5), "00046");
    }
}
