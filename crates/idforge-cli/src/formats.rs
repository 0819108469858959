//! # `idforge formats`
//!
//! Lists every supported format with its aliases and canonical length.

use anyhow::Result;
use serde::Serialize;

use idforge_core::{ExpectedLength, FormatKind};

use crate::output;
use crate::Session;

#[derive(Debug, Serialize)]
pub struct FormatInfo {
    pub name: FormatKind,
    pub title: &'static str,
    pub aliases: Vec<&'static str>,
    pub length: ExpectedLength,
}

pub fn list_formats(session: &Session) -> Vec<FormatInfo> {
    session
        .registry
        .available_formats()
        .iter()
        .map(|kind| FormatInfo {
            name: *kind,
            title: kind.title(),
            aliases: kind.aliases_of().collect(),
            length: session.registry.service(*kind).expected_length(),
        })
        .collect()
}

/// Execute the formats subcommand.
pub fn run_formats(session: &Session) -> Result<u8> {
    let formats = list_formats(session);
    output::emit(session.settings.output, &formats, |formats| {
        formats
            .iter()
            .map(|f| {
                format!(
                    "{:<6} {:<28} length {:<6} aliases: {}",
                    f.name,
                    f.title,
                    f.length.to_string(),
                    f.aliases.join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    Ok(0)
}
