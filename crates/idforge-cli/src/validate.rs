//! # `idforge validate`
//!
//! Checks each value against an explicit format, or, without `--format`,
//! against every format detection proposes. A value passes when any
//! candidate format accepts it.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use idforge_core::{FormatKind, ValidationReport};

use crate::output;
use crate::{Session, EXIT_INVALID};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Format name or alias; auto-detected per value when omitted.
    #[arg(long, short)]
    pub format: Option<String>,

    /// Values to validate.
    #[arg(required = true)]
    pub values: Vec<String>,
}

/// Outcome for one value.
#[derive(Debug, Serialize)]
pub struct ValidationRow {
    pub input: String,
    pub valid: bool,
    /// One report per format checked; empty when nothing matched.
    pub reports: Vec<ValidationReport>,
}

impl ValidationRow {
    fn summary(&self) -> String {
        if self.reports.is_empty() {
            return format!("UNKNOWN  {}  no matching format", self.input);
        }
        if let Some(ok) = self.reports.iter().find(|r| r.is_valid()) {
            return format!("VALID    {}  {}", self.input, ok.format);
        }
        let details: Vec<String> = self
            .reports
            .iter()
            .map(|r| {
                let issues: Vec<String> = r.issues.iter().map(ToString::to_string).collect();
                format!("{}: {}", r.format, issues.join("; "))
            })
            .collect();
        format!("INVALID  {}  {}", self.input, details.join(" | "))
    }
}

/// Check one value. `format` restricts validation to a single kind.
pub fn check_value(session: &Session, format: Option<FormatKind>, value: &str) -> ValidationRow {
    let kinds = match format {
        Some(kind) => vec![kind],
        None => session.registry.detect_possible(value),
    };
    let reports: Vec<ValidationReport> = kinds
        .iter()
        .map(|kind| {
            let mut report = session.registry.service(*kind).inspect(value);
            report.cleaned = session.display(*kind, &report.cleaned);
            report
        })
        .collect();
    let valid = reports.iter().any(ValidationReport::is_valid);
    let input = match reports.iter().find(|r| r.is_valid()).or(reports.first()) {
        Some(report) => session.display(report.format, value),
        None => value.to_string(),
    };
    tracing::debug!(input = %input, valid, checked = kinds.len(), "validated value");
    ValidationRow {
        input,
        valid,
        reports,
    }
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, session: &Session) -> Result<u8> {
    let format = match &args.format {
        Some(name) => Some(session.registry.get_service(name)?.kind()),
        None => None,
    };
    let rows: Vec<ValidationRow> = args
        .values
        .iter()
        .map(|value| check_value(session, format, value))
        .collect();

    output::emit(session.settings.output, &rows, |rows| {
        rows.iter()
            .map(ValidationRow::summary)
            .collect::<Vec<_>>()
            .join("\n")
    })?;

    if rows.iter().all(|row| row.valid) {
        Ok(0)
    } else {
        Ok(EXIT_INVALID)
    }
}
