//! # idforge-core: Structured Identifier Algorithms
//!
//! Validation, generation and completion for seven independent identifier
//! formats, plus name resolution and shape-based format detection.
//!
//! | Format | Module | Checksum |
//! |--------|--------|----------|
//! | National ID | [`formats::tckn`] | two weighted mod-10 digits |
//! | Tax ID | [`formats::vkn`] | positional mod-9/mod-10 digit |
//! | IBAN (TR) | [`formats::iban`] | ISO 13616 mod-97 |
//! | Payment card | [`formats::card`] | Luhn |
//! | IMEI | [`formats::imei`] | Luhn |
//! | ISBN-10 / ISBN-13 | [`formats::isbn`] | mod-11 / weighted mod-10 |
//! | EAN-13 / UPC-A / EAN-8 | [`formats::ean`] | weighted mod-10 |
//!
//! ## Usage
//!
//! ```
//! use idforge_core::{FormatRegistry, FormatKind};
//! use rand::SeedableRng;
//!
//! let registry = FormatRegistry::new();
//! let tckn = registry.get_service("national-id").unwrap();
//! assert!(tckn.validate("12345678950"));
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let generated = tckn.generate(&mut rng);
//! assert!(tckn.validate(&generated));
//!
//! assert_eq!(registry.detect_single("12345678950"), Some(FormatKind::Tckn));
//! ```
//!
//! ## Crate Policy
//!
//! - No I/O and no global state. Randomness is always passed in as
//!   `&mut dyn RngCore`, so seeded generators give reproducible output.
//! - `validate` never panics and never errors; structured failures are
//!   available through `inspect`.
//! - No `unsafe` code. No `.unwrap()` outside tests.
//! - Generated numbers are structurally valid, not secret.

pub mod detect;
pub mod digits;
pub mod error;
pub mod formats;
pub mod kind;
pub mod registry;
pub mod report;

pub use detect::{detect_possible, detect_single};
pub use error::{FormatError, ValidationIssue};
pub use formats::{
    BarcodeKind, CardNetwork, CardOptions, Ean, IdentifierFormat, Iban, Imei, Isbn, PaymentCard,
    Tckn, Vkn,
};
pub use kind::{ExpectedLength, FormatKind, FORMAT_COUNT};
pub use registry::FormatRegistry;
pub use report::ValidationReport;
