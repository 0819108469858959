//! # `idforge mask`

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use idforge_core::formats::{CardNetwork, PaymentCard};
use idforge_core::IdentifierFormat;

use crate::output;
use crate::Session;

#[derive(Args, Debug)]
pub struct MaskArgs {
    /// Card number to mask.
    pub number: String,
}

#[derive(Debug, Serialize)]
pub struct Masked {
    pub masked: String,
    pub network: Option<CardNetwork>,
    pub valid: bool,
}

pub fn mask_number(number: &str) -> Masked {
    let valid = PaymentCard.validate(number);
    if !valid {
        tracing::warn!("input is not a valid card number; masking anyway");
    }
    Masked {
        masked: PaymentCard.mask(number),
        network: CardNetwork::detect(number),
        valid,
    }
}

/// Execute the mask subcommand.
pub fn run_mask(args: &MaskArgs, session: &Session) -> Result<u8> {
    let masked = mask_number(&args.number);
    output::emit(session.settings.output, &masked, |m| m.masked.clone())?;
    Ok(0)
}
