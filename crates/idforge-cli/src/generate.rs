//! # `idforge generate`
//!
//! Produces random valid identifiers. Card generation honours `--network`
//! (or `card_network` from the config file) and `--length`.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use idforge_core::formats::{CardNetwork, CardOptions, PaymentCard};
use idforge_core::FormatKind;

use crate::output;
use crate::Session;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Format name or alias.
    pub format: String,

    /// How many identifiers to produce (defaults to the configured count).
    #[arg(long, short = 'n')]
    pub count: Option<usize>,

    /// Card network (visa, mastercard, amex, discover, diners, jcb).
    #[arg(long)]
    pub network: Option<String>,

    /// Card length; must be legal for the network.
    #[arg(long)]
    pub length: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct Generated {
    pub format: FormatKind,
    pub values: Vec<String>,
}

/// Card options from flags, falling back to the configured network.
fn card_options(args: &GenerateArgs, session: &Session) -> Result<CardOptions> {
    let network = args
        .network
        .as_deref()
        .or(session.settings.card_network.as_deref())
        .map(|name| name.parse::<CardNetwork>().map_err(anyhow::Error::msg))
        .transpose()?;
    Ok(CardOptions {
        network,
        length: args.length,
    })
}

/// Generate values without printing them.
pub fn generate_values(args: &GenerateArgs, session: &Session) -> Result<Generated> {
    let format = session.registry.get_service(&args.format)?;
    let kind = format.kind();
    let count = args.count.unwrap_or(session.settings.count);
    if count == 0 {
        anyhow::bail!("--count must be at least 1");
    }
    if kind != FormatKind::Card && (args.network.is_some() || args.length.is_some()) {
        anyhow::bail!("--network and --length only apply to card numbers, not {kind}");
    }

    let mut rng = session.rng();
    let values = if kind == FormatKind::Card {
        let options = card_options(args, session)?;
        (0..count)
            .map(|_| {
                PaymentCard
                    .generate_with_options(options, &mut rng)
                    .context("cannot generate card number")
            })
            .collect::<Result<Vec<_>>>()?
    } else {
        (0..count).map(|_| format.generate(&mut rng)).collect()
    };
    tracing::info!(format = %kind, count, "generated identifiers");

    Ok(Generated {
        format: kind,
        values: values.iter().map(|v| session.display(kind, v)).collect(),
    })
}

/// Execute the generate subcommand.
pub fn run_generate(args: &GenerateArgs, session: &Session) -> Result<u8> {
    let generated = generate_values(args, session)?;
    output::emit(session.settings.output, &generated, |g| g.values.join("\n"))?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use idforge_core::digits::clean;

    fn seeded() -> Session {
        Session::new(Settings {
            seed: Some(42),
            ..Settings::default()
        })
    }

    fn args(format: &str) -> GenerateArgs {
        GenerateArgs {
            format: format.into(),
            count: None,
            network: None,
            length: None,
        }
    }

    #[test]
    fn generates_requested_count() {
        let session = seeded();
        let generated = generate_values(
            &GenerateArgs {
                count: Some(5),
                ..args("national-id")
            },
            &session,
        )
        .unwrap();
        assert_eq!(generated.format, FormatKind::Tckn);
        assert_eq!(generated.values.len(), 5);
        let tckn = session.registry.service(FormatKind::Tckn);
        assert!(generated.values.iter().all(|v| tckn.validate(v)));
    }

    #[test]
    fn uses_configured_count() {
        let session = Session::new(Settings {
            seed: Some(1),
            count: 3,
            ..Settings::default()
        });
        assert_eq!(generate_values(&args("iban"), &session).unwrap().values.len(), 3);
    }

    #[test]
    fn seed_makes_output_reproducible() {
        let a = generate_values(&args("isbn"), &seeded()).unwrap();
        let b = generate_values(&args("isbn"), &seeded()).unwrap();
        assert_eq!(a.values, b.values);
    }

    #[test]
    fn card_network_and_length() {
        let generated = generate_values(
            &GenerateArgs {
                network: Some("visa".into()),
                length: Some(13),
                count: Some(4),
                ..args("card")
            },
            &seeded(),
        )
        .unwrap();
        for value in &generated.values {
            let cleaned = clean(value);
            assert_eq!(cleaned.len(), 13);
            assert!(cleaned.starts_with('4'));
        }
    }

    #[test]
    fn configured_card_network_applies() {
        let session = Session::new(Settings {
            seed: Some(9),
            card_network: Some("amex".into()),
            ..Settings::default()
        });
        let generated = generate_values(&args("cc"), &session).unwrap();
        assert_eq!(
            CardNetwork::detect(&generated.values[0]),
            Some(CardNetwork::Amex)
        );
    }

    #[test]
    fn rejects_bad_combinations() {
        let session = seeded();
        assert!(generate_values(
            &GenerateArgs {
                network: Some("visa".into()),
                ..args("tckn")
            },
            &session
        )
        .is_err());
        assert!(generate_values(
            &GenerateArgs {
                network: Some("maestro".into()),
                ..args("card")
            },
            &session
        )
        .is_err());
        assert!(generate_values(
            &GenerateArgs {
                count: Some(0),
                ..args("vkn")
            },
            &session
        )
        .is_err());
        assert!(generate_values(&args("passport"), &session).is_err());
    }

    #[test]
    fn json_output_shape() {
        let generated = generate_values(&args("ean"), &seeded()).unwrap();
        let json = serde_json::to_value(&generated).unwrap();
        assert_eq!(json["format"], "ean");
        assert_eq!(json["values"].as_array().unwrap().len(), 1);
    }
}
