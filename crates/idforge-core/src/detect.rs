//! # Format Detection
//!
//! Maps a raw string to the formats it could plausibly belong to, using
//! shape alone (country code, length, digit set, card prefixes). Checksums
//! are not consulted, so a candidate may still fail validation under every
//! detected format.
//!
//! Several formats share lengths (a 10-digit string is both a tax ID and an
//! ISBN-10, 15 digits fit an IMEI and an Amex card), so the result is a
//! list. [`detect_single`] answers only when the list has one entry.

use crate::digits::{clean, is_numeric};
use crate::formats::card::{CardNetwork, MAX_LENGTH, MIN_LENGTH};
use crate::kind::FormatKind;

fn push_unique(found: &mut Vec<FormatKind>, kind: FormatKind) {
    if !found.contains(&kind) {
        found.push(kind);
    }
}

/// Every format `input` could belong to, in detection order.
pub fn detect_possible(input: &str) -> Vec<FormatKind> {
    let cleaned = clean(input);
    let mut found = Vec::new();
    if cleaned.is_empty() {
        return found;
    }
    if cleaned.starts_with("TR") {
        found.push(FormatKind::Iban);
        return found;
    }

    let len = cleaned.len();
    let digits_and_x = cleaned.bytes().all(|b| b.is_ascii_digit() || b == b'X');
    if digits_and_x {
        let bookland = cleaned.starts_with("978") || cleaned.starts_with("979");
        if len == 10 || (len == 13 && bookland) {
            push_unique(&mut found, FormatKind::Isbn);
        }
    }

    if !is_numeric(&cleaned) {
        tracing::trace!(input = %cleaned, candidates = ?found, "non-numeric candidate");
        return found;
    }

    match len {
        8 | 12 | 13 => push_unique(&mut found, FormatKind::Ean),
        10 => push_unique(&mut found, FormatKind::Vkn),
        11 => push_unique(&mut found, FormatKind::Tckn),
        15 => push_unique(&mut found, FormatKind::Imei),
        _ => {}
    }
    if (MIN_LENGTH..=MAX_LENGTH).contains(&len) && CardNetwork::detect(&cleaned).is_some() {
        push_unique(&mut found, FormatKind::Card);
    }

    tracing::trace!(input = %cleaned, candidates = ?found, "detected formats");
    found
}

/// The format `input` belongs to when detection is unambiguous.
pub fn detect_single(input: &str) -> Option<FormatKind> {
    match detect_possible(input).as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}
