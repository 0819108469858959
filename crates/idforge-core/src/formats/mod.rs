//! # Identifier Formats
//!
//! One trait, [`IdentifierFormat`], and seven self-contained
//! implementations. Formats do not know about each other; the only shared
//! pieces are digit cleaning ([`crate::digits`]) and the Luhn checksum used
//! by payment cards and IMEIs ([`luhn`]).
//!
//! ## Contract
//!
//! For every format `F` and any random source:
//!
//! - `F.validate(&F.generate(rng))` is `true`.
//! - `F.complete(p, rng)` returns a formatted identifier of canonical length
//!   that validates and, once cleaned, starts with `clean(p)`; or it fails
//!   with a [`FormatError`] when `p` cannot be extended. IBAN completion is
//!   lenient and ISBN completion may prepend `978`; see those modules.
//! - `validate` never panics and never errors. Missing input is modelled by
//!   [`IdentifierFormat::validate_optional`].

pub mod card;
pub mod ean;
pub mod iban;
pub mod imei;
pub mod isbn;
pub mod luhn;
pub mod tckn;
pub mod vkn;

use rand::RngCore;

use crate::error::FormatError;
use crate::kind::{ExpectedLength, FormatKind};
use crate::report::ValidationReport;

pub use card::{CardNetwork, CardOptions, PaymentCard};
pub use ean::{BarcodeKind, Ean};
pub use iban::Iban;
pub use imei::Imei;
pub use isbn::Isbn;
pub use tckn::Tckn;
pub use vkn::Vkn;

/// Behaviour shared by every identifier format.
///
/// Implementations are stateless; randomness is injected per call so that
/// generation is reproducible under a seeded RNG.
pub trait IdentifierFormat: Send + Sync + std::fmt::Debug {
    /// Which format this is.
    fn kind(&self) -> FormatKind;

    /// Canonical lowercase name.
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Canonical length of a complete identifier.
    fn expected_length(&self) -> ExpectedLength;

    /// Detailed validation: clean `input` and list every problem found.
    fn inspect(&self, input: &str) -> ValidationReport;

    /// True if `input` is a well-formed identifier of this format.
    fn validate(&self, input: &str) -> bool {
        self.inspect(input).is_valid()
    }

    /// Validate input that may be absent.
    ///
    /// Absent input is `Ok(false)` by default. Book numbers and retail
    /// barcodes override this and return [`FormatError::MissingInput`].
    fn validate_optional(&self, input: Option<&str>) -> Result<bool, FormatError> {
        Ok(input.is_some_and(|s| self.validate(s)))
    }

    /// Produce a random, valid, display-formatted identifier.
    fn generate(&self, rng: &mut dyn RngCore) -> String;

    /// Extend `prefix` to a complete, valid, display-formatted identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] when the prefix is too short, too long,
    /// non-numeric or structurally forbidden for this format.
    fn complete(&self, prefix: &str, rng: &mut dyn RngCore) -> Result<String, FormatError>;

    /// Render a cleaned identifier with the format's separators. Lengths the
    /// format does not group are returned unchanged.
    fn format(&self, cleaned: &str) -> String;
}

/// Run `attempt` until it yields an identifier.
///
/// Generators only hand checksum routines digits they drew themselves, so an
/// attempt is not expected to fail. A failure is logged and retried with
/// fresh randomness; `generate` never returns a placeholder.
pub(crate) fn generate_until_ok(
    kind: FormatKind,
    rng: &mut dyn RngCore,
    mut attempt: impl FnMut(&mut dyn RngCore) -> Result<String, FormatError>,
) -> String {
    loop {
        match attempt(&mut *rng) {
            Ok(value) => return value,
            Err(e) => tracing::error!(format = %kind, error = %e, "generation failed, retrying"),
        }
    }
}

/// Construct the implementation for `kind`.
pub(crate) fn instantiate(kind: FormatKind) -> Box<dyn IdentifierFormat> {
    match kind {
        FormatKind::Tckn => Box::new(Tckn),
        FormatKind::Vkn => Box::new(Vkn),
        FormatKind::Iban => Box::new(Iban),
        FormatKind::Card => Box::new(PaymentCard),
        FormatKind::Imei => Box::new(Imei),
        FormatKind::Isbn => Box::new(Isbn),
        FormatKind::Ean => Box::new(Ean),
    }
}
