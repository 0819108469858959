//! # Format Registry
//!
//! Resolves format names and aliases to [`IdentifierFormat`] instances.
//!
//! The registry is an explicit value rather than a process-wide singleton:
//! callers construct one with [`FormatRegistry::new`] and share it by
//! reference. Each format has one [`OnceLock`] slot, filled on first access,
//! so concurrent lookups of the same format race safely and every caller
//! sees the same instance afterwards.

use std::sync::OnceLock;

use crate::detect;
use crate::error::FormatError;
use crate::formats::{self, IdentifierFormat};
use crate::kind::{FormatKind, FORMAT_COUNT};

/// Lazily populated cache of format implementations.
#[derive(Debug, Default)]
pub struct FormatRegistry {
    slots: [OnceLock<Box<dyn IdentifierFormat>>; FORMAT_COUNT],
}

impl FormatRegistry {
    /// A registry with every slot empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// The implementation for `kind`, created on first use.
    pub fn service(&self, kind: FormatKind) -> &dyn IdentifierFormat {
        self.slots[kind.index()]
            .get_or_init(|| {
                tracing::debug!(format = %kind, "initializing format service");
                formats::instantiate(kind)
            })
            .as_ref()
    }

    /// Resolve a canonical name or alias (case-insensitive, trimmed).
    ///
    /// # Errors
    ///
    /// [`FormatError::UnknownFormat`] carrying `name` as given.
    pub fn get_service(&self, name: &str) -> Result<&dyn IdentifierFormat, FormatError> {
        let kind = name.parse::<FormatKind>()?;
        tracing::trace!(name, format = %kind, "resolved format name");
        Ok(self.service(kind))
    }

    /// Every supported format, in canonical order.
    pub fn available_formats(&self) -> &'static [FormatKind] {
        FormatKind::all()
    }

    /// The alias table.
    pub fn aliases(&self) -> &'static [(&'static str, FormatKind)] {
        FormatKind::aliases()
    }

    /// Every format `input` could belong to. See [`detect::detect_possible`].
    pub fn detect_possible(&self, input: &str) -> Vec<FormatKind> {
        detect::detect_possible(input)
    }

    /// The single format `input` belongs to, if unambiguous.
    pub fn detect_single(&self, input: &str) -> Option<FormatKind> {
        detect::detect_single(input)
    }
}
