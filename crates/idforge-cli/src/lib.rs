//! # idforge-cli: Command-Line Front End
//!
//! Provides the `idforge` binary on top of `idforge-core`.
//!
//! ## Subcommands
//!
//! - `idforge validate` checks values against a format, or against every
//!   format detection suggests.
//! - `idforge generate` produces random valid identifiers.
//! - `idforge complete` extends a prefix to a valid identifier.
//! - `idforge detect` lists the formats a value could belong to.
//! - `idforge formats` lists format names and aliases.
//! - `idforge mask` masks a payment card number.
//!
//! ```bash
//! idforge generate tckn --count 3 --seed 42
//! idforge complete ean 869123 --target ean13
//! idforge --json validate TR320010009999901234567890 4532015112830366
//! ```
//!
//! ## Exit Codes
//!
//! `0` on success, `1` on any error, `2` when a value fails validation or
//! matches no format.

pub mod complete;
pub mod config;
pub mod detect;
pub mod formats;
pub mod generate;
pub mod mask;
pub mod output;
pub mod validate;

use idforge_core::formats::PaymentCard;
use idforge_core::{FormatKind, FormatRegistry};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Settings;

/// Exit code for a value that failed validation or detection.
pub const EXIT_INVALID: u8 = 2;

/// Shared state for one invocation: the format registry and the resolved
/// settings.
#[derive(Debug)]
pub struct Session {
    pub registry: FormatRegistry,
    pub settings: Settings,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            registry: FormatRegistry::new(),
            settings,
        }
    }

    /// A fresh generator: seeded when a seed is configured, otherwise from
    /// OS entropy.
    pub fn rng(&self) -> StdRng {
        match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// `value` as it should be shown to the user. Card numbers are masked
    /// when `mask_cards` is set.
    pub fn display(&self, kind: FormatKind, value: &str) -> String {
        if self.settings.mask_cards && kind == FormatKind::Card {
            PaymentCard.mask(value)
        } else {
            value.to_string()
        }
    }
}
