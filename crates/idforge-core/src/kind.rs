//! # Format Kinds
//!
//! Defines [`FormatKind`], the one enum naming every supported identifier
//! format, and its alias table. Every `match` on `FormatKind` is
//! exhaustive, so adding a format forces the registry, the detection engine
//! and the CLI to handle it at compile time.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::FormatError;

/// Every identifier format idforge understands.
///
/// | Kind | Name | Identifier |
/// |------|------|------------|
/// | `Tckn` | `tckn` | Turkish national identity number (11 digits) |
/// | `Vkn` | `vkn` | Turkish tax number (10 digits) |
/// | `Iban` | `iban` | Turkish IBAN (`TR` + 24 digits) |
/// | `Card` | `card` | Payment card number (13–19 digits, Luhn) |
/// | `Imei` | `imei` | Mobile equipment identifier (15 digits, Luhn) |
/// | `Isbn` | `isbn` | ISBN-10 / ISBN-13 |
/// | `Ean` | `ean` | EAN-13 / UPC-A / EAN-8 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    /// National identity number.
    Tckn,
    /// Tax identification number.
    Vkn,
    /// Bank account number.
    Iban,
    /// Payment card number.
    Card,
    /// Mobile equipment identifier.
    Imei,
    /// Book number.
    Isbn,
    /// Retail barcode.
    Ean,
}

/// Total number of formats.
pub const FORMAT_COUNT: usize = 7;

/// Alias table. Lookups are case-insensitive; canonical names are resolved
/// separately through [`FormatKind::as_str`].
const ALIASES: &[(&str, FormatKind)] = &[
    ("national-id", FormatKind::Tckn),
    ("tc", FormatKind::Tckn),
    ("tc-kimlik", FormatKind::Tckn),
    ("kimlik", FormatKind::Tckn),
    ("tax-id", FormatKind::Vkn),
    ("vergi", FormatKind::Vkn),
    ("vergi-no", FormatKind::Vkn),
    ("bank", FormatKind::Iban),
    ("bank-account", FormatKind::Iban),
    ("account", FormatKind::Iban),
    ("credit-card", FormatKind::Card),
    ("cc", FormatKind::Card),
    ("payment-card", FormatKind::Card),
    ("kart", FormatKind::Card),
    ("equipment-id", FormatKind::Imei),
    ("phone", FormatKind::Imei),
    ("device", FormatKind::Imei),
    ("book", FormatKind::Isbn),
    ("isbn10", FormatKind::Isbn),
    ("isbn13", FormatKind::Isbn),
    ("barcode", FormatKind::Ean),
    ("ean13", FormatKind::Ean),
    ("ean8", FormatKind::Ean),
    ("upc", FormatKind::Ean),
    ("upc-a", FormatKind::Ean),
];

impl FormatKind {
    /// All formats in canonical order.
    pub fn all() -> &'static [FormatKind] {
        &[
            Self::Tckn,
            Self::Vkn,
            Self::Iban,
            Self::Card,
            Self::Imei,
            Self::Isbn,
            Self::Ean,
        ]
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tckn => "tckn",
            Self::Vkn => "vkn",
            Self::Iban => "iban",
            Self::Card => "card",
            Self::Imei => "imei",
            Self::Isbn => "isbn",
            Self::Ean => "ean",
        }
    }

    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Tckn => "National ID (TC Kimlik No)",
            Self::Vkn => "Tax ID (Vergi Kimlik No)",
            Self::Iban => "IBAN (TR)",
            Self::Card => "Payment Card",
            Self::Imei => "IMEI",
            Self::Isbn => "ISBN",
            Self::Ean => "EAN / UPC Barcode",
        }
    }

    /// Position in [`FormatKind::all`]; used as the registry slot index.
    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Tckn => 0,
            Self::Vkn => 1,
            Self::Iban => 2,
            Self::Card => 3,
            Self::Imei => 4,
            Self::Isbn => 5,
            Self::Ean => 6,
        }
    }

    /// The alias table.
    pub fn aliases() -> &'static [(&'static str, FormatKind)] {
        ALIASES
    }

    /// Aliases registered for this kind.
    pub fn aliases_of(&self) -> impl Iterator<Item = &'static str> + '_ {
        ALIASES
            .iter()
            .filter(move |(_, kind)| kind == self)
            .map(|(alias, _)| *alias)
    }

    /// Resolve a canonical name or alias, ignoring case and surrounding
    /// whitespace.
    pub fn resolve(name: &str) -> Option<FormatKind> {
        let needle = name.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == needle)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == needle)
                    .map(|(_, kind)| *kind)
            })
    }
}

impl std::fmt::Display for FormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for FormatKind {
    type Err = FormatError;

    /// Parse a canonical name or alias (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s).ok_or_else(|| FormatError::UnknownFormat {
            input: s.to_string(),
        })
    }
}

/// Canonical length of a fully formed identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedLength {
    /// One fixed length.
    Exact(usize),
    /// Any length within `min..=max` that the format defines.
    Range {
        /// Shortest canonical length.
        min: usize,
        /// Longest canonical length.
        max: usize,
    },
}

impl ExpectedLength {
    /// True if `len` lies within this length constraint.
    pub fn admits(&self, len: usize) -> bool {
        match *self {
            Self::Exact(n) => len == n,
            Self::Range { min, max } => (min..=max).contains(&len),
        }
    }
}

impl std::fmt::Display for ExpectedLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::Range { min, max } => write!(f, "{min}-{max}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_count_matches_constant() {
        assert_eq!(FormatKind::all().len(), FORMAT_COUNT);
    }

    #[test]
    fn index_matches_position() {
        for (i, kind) in FormatKind::all().iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn as_str_roundtrip() {
        for kind in FormatKind::all() {
            let parsed: FormatKind = kind.as_str().parse().unwrap();
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn aliases_case_insensitive() {
        assert_eq!(FormatKind::resolve("Credit-Card"), Some(FormatKind::Card));
        assert_eq!(FormatKind::resolve("  UPC "), Some(FormatKind::Ean));
        assert_eq!(FormatKind::resolve("IBAN"), Some(FormatKind::Iban));
        assert_eq!(FormatKind::resolve("kimlik"), Some(FormatKind::Tckn));
    }

    #[test]
    fn every_kind_has_an_alias() {
        for kind in FormatKind::all() {
            assert!(kind.aliases_of().count() > 0, "{kind} has no alias");
        }
    }

    #[test]
    fn aliases_do_not_shadow_canonical_names() {
        for (alias, _) in FormatKind::aliases() {
            assert!(
                FormatKind::all().iter().all(|k| k.as_str() != *alias),
                "alias {alias} duplicates a canonical name"
            );
        }
    }

    #[test]
    fn unknown_name_keeps_input() {
        let err = "Passport".parse::<FormatKind>().unwrap_err();
        assert_eq!(
            err,
            FormatError::UnknownFormat {
                input: "Passport".into()
            }
        );
    }

    #[test]
    fn serde_matches_as_str() {
        for kind in FormatKind::all() {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn expected_length_admits() {
        assert!(ExpectedLength::Exact(11).admits(11));
        assert!(!ExpectedLength::Exact(11).admits(10));
        let range = ExpectedLength::Range { min: 13, max: 19 };
        assert!(range.admits(13) && range.admits(19));
        assert!(!range.admits(20));
        assert_eq!(range.to_string(), "13-19");
    }
}
