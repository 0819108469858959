//! # idforge CLI entry point
//!
//! Parses command-line arguments, resolves layered settings, and dispatches
//! to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use idforge_cli::complete::{run_complete, CompleteArgs};
use idforge_cli::config::{Overrides, Settings};
use idforge_cli::detect::{run_detect, DetectArgs};
use idforge_cli::formats::run_formats;
use idforge_cli::generate::{run_generate, GenerateArgs};
use idforge_cli::mask::{run_mask, MaskArgs};
use idforge_cli::validate::{run_validate, ValidateArgs};
use idforge_cli::Session;

/// idforge: validate, generate and complete structured identifiers.
///
/// Supports Turkish national and tax IDs, TR IBANs, payment cards, IMEIs,
/// ISBNs and EAN/UPC barcodes.
#[derive(Parser, Debug)]
#[command(name = "idforge", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for reproducible generation.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate values against a format, or against every detected format.
    Validate(ValidateArgs),

    /// Generate random valid identifiers.
    Generate(GenerateArgs),

    /// Extend a prefix to a complete, valid identifier.
    Complete(CompleteArgs),

    /// List the formats a value could belong to.
    Detect(DetectArgs),

    /// List supported formats and their aliases.
    Formats,

    /// Mask a payment card number.
    Mask(MaskArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("idforge CLI starting");

    let overrides = Overrides {
        seed: cli.seed,
        json: cli.json,
    };
    let settings = match Settings::resolve(cli.config.as_deref(), &overrides) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    let session = Session::new(settings);

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &session),
        Commands::Generate(args) => run_generate(&args, &session),
        Commands::Complete(args) => run_complete(&args, &session),
        Commands::Detect(args) => run_detect(&args, &session),
        Commands::Formats => run_formats(&session),
        Commands::Mask(args) => run_mask(&args, &session),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
