//! # Error Types
//!
//! Defines the error and validation-issue types used throughout idforge.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - [`FormatError`] is returned by operations that construct identifiers
//!   (`complete`, registry lookups). Each variant names the format involved
//!   so the caller can surface it without extra context.
//! - [`ValidationIssue`] is *not* an error. It classifies why a candidate
//!   failed validation and is collected into a
//!   [`ValidationReport`](crate::report::ValidationReport).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for identifier operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The name or alias does not resolve to any known format.
    #[error("unknown format: {input:?}")]
    UnknownFormat {
        /// The input exactly as the caller supplied it.
        input: String,
    },

    /// The prefix has a length the format cannot extend.
    #[error("{format}: invalid prefix length {actual}, expected {expected}")]
    InvalidPrefixLength {
        /// Canonical format name.
        format: &'static str,
        /// Human-readable description of the accepted lengths.
        expected: String,
        /// Length of the cleaned prefix.
        actual: usize,
    },

    /// The prefix contains illegal characters or a forbidden pattern.
    #[error("{format}: invalid prefix: {reason}")]
    InvalidPrefixPattern {
        /// Canonical format name.
        format: &'static str,
        /// What is wrong with the prefix.
        reason: String,
    },

    /// The prefix is already at (or beyond) the canonical length.
    #[error("{format}: prefix of length {length} is already complete")]
    AlreadyComplete {
        /// Canonical format name.
        format: &'static str,
        /// Length of the cleaned prefix.
        length: usize,
    },

    /// No payment card network matches the leading digits.
    #[error("no card network matches prefix {prefix:?}")]
    UndetectableNetwork {
        /// The cleaned prefix that was tested.
        prefix: String,
    },

    /// Internal arithmetic failure while computing a checksum. Not a user
    /// input error.
    #[error("checksum computation failed: {0}")]
    ChecksumComputation(String),

    /// A required input was absent.
    #[error("{format}: input is required")]
    MissingInput {
        /// Canonical format name.
        format: &'static str,
    },
}

impl FormatError {
    /// Returns true if this error was caused by caller input rather than an
    /// internal failure.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, FormatError::ChecksumComputation(_))
    }
}

/// Reason a candidate failed validation.
///
/// Kinds only; the CLI renders them into text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// Nothing left after cleaning.
    Empty,
    /// Cleaned length is not a canonical length for the format.
    InvalidLength {
        /// Accepted lengths, rendered (e.g. `"11"` or `"10 or 13"`).
        expected: String,
        /// Cleaned length of the candidate.
        actual: usize,
    },
    /// Contains characters other than the format allows.
    NonNumeric,
    /// Starts with a digit the format forbids in first position.
    LeadingZero,
    /// Matches a denylisted all-repeating pattern.
    RepeatingPattern,
    /// Country code is not the one the format models.
    InvalidCountryCode,
    /// Reserved IBAN digit is not `0`.
    ReservedDigitNotZero,
    /// Leading digits match no payment card network.
    UnknownNetwork,
    /// Required prefix (e.g. ISBN-13 `978`/`979`) is missing.
    InvalidPrefix,
    /// Check digit(s) do not match the payload.
    ChecksumMismatch,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "input is empty"),
            Self::InvalidLength { expected, actual } => {
                write!(f, "length {actual}, expected {expected}")
            }
            Self::NonNumeric => write!(f, "contains non-numeric characters"),
            Self::LeadingZero => write!(f, "must not start with 0"),
            Self::RepeatingPattern => write!(f, "repeating-digit pattern is not allowed"),
            Self::InvalidCountryCode => write!(f, "country code is not TR"),
            Self::ReservedDigitNotZero => write!(f, "reserved digit must be 0"),
            Self::UnknownNetwork => write!(f, "no known card network matches"),
            Self::InvalidPrefix => write!(f, "required prefix is missing"),
            Self::ChecksumMismatch => write!(f, "checksum mismatch"),
        }
    }
}
