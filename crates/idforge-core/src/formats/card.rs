//! # Payment Card Numbers
//!
//! 13 to 19 digits: an issuer prefix identifying the card network, an
//! account body, and a trailing Luhn check digit.
//!
//! ## Networks
//!
//! Each [`CardNetwork`] carries its prefix rules and legal lengths. The
//! first legal length is the network's primary length, used for completion.
//! Detection walks networks in declaration order and the first match wins.
//!
//! | Network | Prefixes | Lengths |
//! |---------|----------|---------|
//! | Visa | `4` | 16, 13, 19 |
//! | Mastercard | `51`–`55`, `2221`–`2720` | 16 |
//! | American Express | `34`, `37` | 15 |
//! | Discover | `6011`, `644`–`649`, `65` | 16, 19 |
//! | Diners Club | `300`–`305`, `36`, `38` | 14 |
//! | JCB | `3528`–`3589` | 16 |

use std::fmt;
use std::str::FromStr;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::digits::{chunked, clean, digit_char, group, is_numeric, pad_random, zero_padded};
use crate::error::{FormatError, ValidationIssue};
use crate::formats::{generate_until_ok, luhn, IdentifierFormat};
use crate::kind::{ExpectedLength, FormatKind};
use crate::report::ValidationReport;

/// Shortest legal card number.
pub const MIN_LENGTH: usize = 13;
/// Longest legal card number.
pub const MAX_LENGTH: usize = 19;
/// Shortest prefix accepted by completion.
pub const MIN_PREFIX_LENGTH: usize = 4;

/// Leading and trailing digits left visible by [`PaymentCard::mask`].
const MASK_KEEP_HEAD: usize = 6;
const MASK_KEEP_TAIL: usize = 4;

const NAME: &str = "card";

/// An issuer prefix rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixRule {
    /// The number starts with exactly these digits.
    Exact(&'static str),
    /// The first `width` digits, read as a number, fall in `low..=high`.
    Range {
        /// Number of leading digits compared.
        width: usize,
        /// Inclusive lower bound.
        low: u32,
        /// Inclusive upper bound.
        high: u32,
    },
}

impl PrefixRule {
    /// True if `digits` starts with this prefix.
    pub fn matches(&self, digits: &str) -> bool {
        match *self {
            PrefixRule::Exact(prefix) => digits.starts_with(prefix),
            PrefixRule::Range { width, low, high } => digits
                .get(..width)
                .filter(|head| is_numeric(head))
                .and_then(|head| head.parse::<u32>().ok())
                .is_some_and(|value| (low..=high).contains(&value)),
        }
    }

    /// A concrete prefix satisfying this rule. Ranges draw uniformly from
    /// the whole interval, bounds included.
    fn synthesize(&self, rng: &mut dyn RngCore) -> String {
        match *self {
            PrefixRule::Exact(prefix) => prefix.to_string(),
            PrefixRule::Range { width, low, high } => {
                zero_padded(rng.gen_range(low..=high), width)
            }
        }
    }
}

/// Card network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardNetwork {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Diners,
    Jcb,
}

impl CardNetwork {
    /// All networks in detection order.
    pub fn all() -> &'static [CardNetwork] {
        &[
            Self::Visa,
            Self::Mastercard,
            Self::Amex,
            Self::Discover,
            Self::Diners,
            Self::Jcb,
        ]
    }

    /// Short lowercase key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Discover => "discover",
            Self::Diners => "diners",
            Self::Jcb => "jcb",
        }
    }

    /// Human-readable network name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Amex => "American Express",
            Self::Discover => "Discover",
            Self::Diners => "Diners Club",
            Self::Jcb => "JCB",
        }
    }

    /// Issuer prefix rules.
    pub fn prefixes(&self) -> &'static [PrefixRule] {
        use PrefixRule::{Exact, Range};
        match self {
            Self::Visa => &[Exact("4")],
            Self::Mastercard => &[
                Range {
                    width: 2,
                    low: 51,
                    high: 55,
                },
                Range {
                    width: 4,
                    low: 2221,
                    high: 2720,
                },
            ],
            Self::Amex => &[Exact("34"), Exact("37")],
            Self::Discover => &[
                Exact("6011"),
                Range {
                    width: 3,
                    low: 644,
                    high: 649,
                },
                Exact("65"),
            ],
            Self::Diners => &[
                Range {
                    width: 3,
                    low: 300,
                    high: 305,
                },
                Exact("36"),
                Exact("38"),
            ],
            Self::Jcb => &[Range {
                width: 4,
                low: 3528,
                high: 3589,
            }],
        }
    }

    /// Legal lengths, primary first.
    pub fn lengths(&self) -> &'static [usize] {
        match self {
            Self::Visa => &[16, 13, 19],
            Self::Mastercard | Self::Jcb => &[16],
            Self::Amex => &[15],
            Self::Discover => &[16, 19],
            Self::Diners => &[14],
        }
    }

    /// Length used when completing a partial number.
    pub fn primary_length(&self) -> usize {
        self.lengths()[0]
    }

    /// True if `digits` carries one of this network's prefixes.
    pub fn matches_prefix(&self, digits: &str) -> bool {
        self.prefixes().iter().any(|rule| rule.matches(digits))
    }

    /// The first network whose prefix matches `number` (cleaned first).
    pub fn detect(number: &str) -> Option<CardNetwork> {
        let cleaned = clean(number);
        Self::all()
            .iter()
            .copied()
            .find(|network| network.matches_prefix(&cleaned))
    }

    fn random_prefix(&self, rng: &mut dyn RngCore) -> String {
        let rules = self.prefixes();
        rules[rng.gen_range(0..rules.len())].synthesize(rng)
    }

    fn lengths_label(&self) -> String {
        self.lengths()
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Every length issued by at least one network, ascending.
fn legal_lengths_label() -> String {
    let mut lengths: Vec<usize> = CardNetwork::all()
        .iter()
        .flat_map(|network| network.lengths().iter().copied())
        .collect();
    lengths.sort_unstable();
    lengths.dedup();
    lengths
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join("/")
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CardNetwork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let network = match key.as_str() {
            "mc" => Some(Self::Mastercard),
            "american-express" => Some(Self::Amex),
            "diners-club" => Some(Self::Diners),
            other => Self::all().iter().copied().find(|n| {
                n.as_str() == other || n.display_name().eq_ignore_ascii_case(other)
            }),
        };
        network.ok_or_else(|| {
            format!(
                "unknown card network '{s}' (expected one of: visa, mastercard, amex, discover, diners, jcb)"
            )
        })
    }
}

/// Generation constraints for [`PaymentCard::generate_with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardOptions {
    /// Network to draw from; random when `None`.
    pub network: Option<CardNetwork>,
    /// Card length; the network's primary length when `None`.
    pub length: Option<usize>,
}

/// Payment card number format.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentCard;

impl PaymentCard {
    /// Generate under explicit constraints.
    ///
    /// # Errors
    ///
    /// [`FormatError::InvalidPrefixLength`] if `options.length` is not legal
    /// for the chosen network. Without a network, only networks issuing that
    /// length are drawn, and the error means no network issues it.
    pub fn generate_with_options(
        &self,
        options: CardOptions,
        rng: &mut dyn RngCore,
    ) -> Result<String, FormatError> {
        let network = match (options.network, options.length) {
            (Some(network), _) => network,
            (None, Some(length)) => {
                let eligible: Vec<CardNetwork> = CardNetwork::all()
                    .iter()
                    .copied()
                    .filter(|network| network.lengths().contains(&length))
                    .collect();
                if eligible.is_empty() {
                    return Err(FormatError::InvalidPrefixLength {
                        format: NAME,
                        expected: format!("one of {}", legal_lengths_label()),
                        actual: length,
                    });
                }
                eligible[rng.gen_range(0..eligible.len())]
            }
            (None, None) => {
                let all = CardNetwork::all();
                all[rng.gen_range(0..all.len())]
            }
        };
        let length = match options.length {
            Some(length) if network.lengths().contains(&length) => length,
            Some(length) => {
                return Err(FormatError::InvalidPrefixLength {
                    format: NAME,
                    expected: format!("{} for {}", network.lengths_label(), network),
                    actual: length,
                })
            }
            None => network.primary_length(),
        };
        let prefix = network.random_prefix(rng);
        Self::finish(&prefix, length, rng).map(|number| self.format(&number))
    }

    /// Mask all but the first six and last four digits. Inputs shorter than
    /// ten digits are masked entirely.
    pub fn mask(&self, number: &str) -> String {
        let cleaned = clean(number);
        let len = cleaned.chars().count();
        if len < MASK_KEEP_HEAD + MASK_KEEP_TAIL {
            return "*".repeat(len);
        }
        let masked: String = cleaned
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if i < MASK_KEEP_HEAD || i >= len - MASK_KEEP_TAIL {
                    c
                } else {
                    '*'
                }
            })
            .collect();
        self.format(&masked)
    }

    /// Pad `prefix` to `length - 1` digits and append the Luhn digit.
    fn finish(prefix: &str, length: usize, rng: &mut dyn RngCore) -> Result<String, FormatError> {
        let payload = pad_random(prefix, length - 1, rng);
        let check = luhn::check_digit(&payload).ok_or_else(|| {
            FormatError::ChecksumComputation(format!("{NAME}: payload {payload} is not numeric"))
        })?;
        Ok(format!("{payload}{}", digit_char(check)))
    }
}

impl IdentifierFormat for PaymentCard {
    fn kind(&self) -> FormatKind {
        FormatKind::Card
    }

    fn expected_length(&self) -> ExpectedLength {
        ExpectedLength::Range {
            min: MIN_LENGTH,
            max: MAX_LENGTH,
        }
    }

    fn inspect(&self, input: &str) -> ValidationReport {
        let cleaned = clean(input);
        let mut report = ValidationReport::new(FormatKind::Card, cleaned.as_str());
        if cleaned.is_empty() {
            return report.with(ValidationIssue::Empty);
        }
        if !is_numeric(&cleaned) {
            return report.with(ValidationIssue::NonNumeric);
        }
        let Some(network) = CardNetwork::detect(&cleaned) else {
            return report.with(ValidationIssue::UnknownNetwork);
        };
        if !network.lengths().contains(&cleaned.len()) {
            report.push(ValidationIssue::InvalidLength {
                expected: network.lengths_label(),
                actual: cleaned.len(),
            });
        }
        if !luhn::is_valid(&cleaned) {
            report.push(ValidationIssue::ChecksumMismatch);
        }
        report
    }

    fn generate(&self, rng: &mut dyn RngCore) -> String {
        generate_until_ok(FormatKind::Card, rng, |rng| {
            self.generate_with_options(CardOptions::default(), rng)
        })
    }

    fn complete(&self, prefix: &str, rng: &mut dyn RngCore) -> Result<String, FormatError> {
        let cleaned = clean(prefix);
        let too_short = || FormatError::InvalidPrefixLength {
            format: NAME,
            expected: format!("at least {MIN_PREFIX_LENGTH}"),
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
        if cleaned.len() < MIN_PREFIX_LENGTH {
            return Err(too_short());
        }
        let network = CardNetwork::detect(&cleaned).ok_or_else(|| {
            FormatError::UndetectableNetwork {
                prefix: cleaned.clone(),
            }
        })?;
        let length = network.primary_length();
        if cleaned.len() >= length {
            return Err(FormatError::AlreadyComplete {
                format: NAME,
                length: cleaned.len(),
            });
        }
        tracing::trace!(network = %network, length, "completing card number");
        Self::finish(&cleaned, length, rng).map(|number| self.format(&number))
    }

    fn format(&self, cleaned: &str) -> String {
        match cleaned.chars().count() {
            15 => group(cleaned, &[4, 6, 5], ' '),
            14 => group(cleaned, &[4, 6, 4], ' '),
            _ => chunked(cleaned, 4, ' '),
        }
    }
}
