//! Luhn (mod 10) checksum, shared by payment cards and IMEIs.

use crate::digits::digit_values;

/// Weighted Luhn sum. `double_first` selects whether the rightmost digit of
/// `digits` is doubled (true when computing a check digit for a payload).
fn luhn_sum(digits: &[u32], double_first: bool) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            let doubled = (i % 2 == 0) == double_first;
            if doubled {
                let v = d * 2;
                if v > 9 {
                    v - 9
                } else {
                    v
                }
            } else {
                d
            }
        })
        .sum()
}

/// True if `number` is all digits and its Luhn sum is divisible by 10.
pub fn is_valid(number: &str) -> bool {
    match digit_values(number) {
        Some(digits) if !digits.is_empty() => luhn_sum(&digits, false) % 10 == 0,
        _ => false,
    }
}

/// Check digit that makes `payload` + digit pass [`is_valid`], or `None`
/// if `payload` is not numeric.
pub fn check_digit(payload: &str) -> Option<u32> {
    let digits = digit_values(payload)?;
    Some((10 - luhn_sum(&digits, true) % 10) % 10)
}
