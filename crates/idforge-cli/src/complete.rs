//! # `idforge complete`
//!
//! Extends a prefix to a complete, valid identifier. For retail barcodes
//! `--target` picks the symbology instead of inferring it from the prefix
//! length.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use idforge_core::formats::{BarcodeKind, Ean};
use idforge_core::FormatKind;

use crate::output;
use crate::Session;

#[derive(Args, Debug)]
pub struct CompleteArgs {
    /// Format name or alias.
    pub format: String,

    /// Partial identifier to extend.
    pub prefix: String,

    /// Barcode symbology for `ean` (ean13, upc-a, ean8).
    #[arg(long)]
    pub target: Option<BarcodeKind>,
}

#[derive(Debug, Serialize)]
pub struct Completed {
    pub format: FormatKind,
    pub prefix: String,
    pub value: String,
}

/// Complete without printing.
pub fn complete_value(args: &CompleteArgs, session: &Session) -> Result<Completed> {
    let format = session.registry.get_service(&args.format)?;
    let kind = format.kind();
    let mut rng = session.rng();
    let value = match (kind, args.target) {
        (FormatKind::Ean, Some(target)) => Ean.complete_to(target, &args.prefix, &mut rng),
        (_, Some(target)) => {
            anyhow::bail!("--target {target} only applies to barcodes, not {kind}")
        }
        (_, None) => format.complete(&args.prefix, &mut rng),
    }
    .with_context(|| format!("cannot complete {:?} as {kind}", args.prefix))?;
    tracing::debug!(format = %kind, prefix = %args.prefix, "completed identifier");

    Ok(Completed {
        format: kind,
        prefix: session.display(kind, &args.prefix),
        value: session.display(kind, &value),
    })
}

/// Execute the complete subcommand.
pub fn run_complete(args: &CompleteArgs, session: &Session) -> Result<u8> {
    let completed = complete_value(args, session)?;
    output::emit(session.settings.output, &completed, |c| c.value.clone())?;
    Ok(0)
}
