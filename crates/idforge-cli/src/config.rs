//! # CLI Configuration
//!
//! Settings are layered, highest precedence first:
//!
//! 1. command-line flags (`--seed`, `--json`, per-command options)
//! 2. environment (`IDFORGE_SEED`, `IDFORGE_OUTPUT`)
//! 3. a YAML file given with `--config`
//! 4. built-in defaults
//!
//! ```yaml
//! seed: 42
//! count: 5
//! output: json
//! card_network: visa
//! mask_cards: true
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable holding the RNG seed.
pub const ENV_SEED: &str = "IDFORGE_SEED";
/// Environment variable holding the output format.
pub const ENV_OUTPUT: &str = "IDFORGE_OUTPUT";

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("unknown output format '{other}' (expected text or json)"),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Seed for reproducible generation; entropy when absent.
    pub seed: Option<u64>,
    /// Identifiers produced per `generate` call.
    pub count: usize,
    /// Output rendering.
    pub output: OutputFormat,
    /// Default network for generated payment cards.
    pub card_network: Option<String>,
    /// Mask card numbers in everything the CLI prints.
    pub mask_cards: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            count: 1,
            output: OutputFormat::Text,
            card_network: None,
            mask_cards: false,
        }
    }
}

/// Global flags that override file and environment settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub json: bool,
}

impl Settings {
    /// Parse a YAML settings file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(settings)
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_SEED) {
            self.seed = Some(
                raw.trim()
                    .parse()
                    .with_context(|| {
                        format!("{ENV_SEED} must be an unsigned integer, got '{raw}'")
                    })?,
            );
        }
        if let Some(raw) = lookup(ENV_OUTPUT) {
            self.output = raw.parse().with_context(|| format!("invalid {ENV_OUTPUT}"))?;
        }
        Ok(())
    }

    /// Apply global command-line flags.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
        if overrides.json {
            self.output = OutputFormat::Json;
        }
    }

    /// Build settings from every layer, reading the process environment.
    pub fn resolve(config: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut settings = match config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        settings.apply_overrides(overrides);
        tracing::debug!(?settings, "resolved settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.count, 1);
        assert_eq!(settings.output, OutputFormat::Text);
        assert!(settings.seed.is_none());
        assert!(!settings.mask_cards);
    }

    #[test]
    fn loads_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idforge.yaml");
        std::fs::write(
            &path,
            "seed: 42\ncount: 5\noutput: json\ncard_network: amex\nmask_cards: true\n",
        )
        .unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.count, 5);
        assert_eq!(settings.output, OutputFormat::Json);
        assert_eq!(settings.card_network.as_deref(), Some("amex"));
        assert!(settings.mask_cards);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.yaml");
        std::fs::write(&path, "count: 3\n").unwrap();
        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.count, 3);
        assert_eq!(settings.output, OutputFormat::Text);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "colour: blue\n").unwrap();
        let err = Settings::from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config file"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::from_file(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn env_overrides_file() {
        let mut settings = Settings {
            seed: Some(1),
            ..Settings::default()
        };
        settings
            .apply_env(env(&[(ENV_SEED, "99"), (ENV_OUTPUT, "JSON")]))
            .unwrap();
        assert_eq!(settings.seed, Some(99));
        assert_eq!(settings.output, OutputFormat::Json);
    }

    #[test]
    fn bad_env_values_are_errors() {
        let mut settings = Settings::default();
        assert!(settings.apply_env(env(&[(ENV_SEED, "many")])).is_err());
        assert!(settings.apply_env(env(&[(ENV_OUTPUT, "xml")])).is_err());
    }

    #[test]
    fn flags_override_env() {
        let mut settings = Settings::default();
        settings.apply_env(env(&[(ENV_SEED, "5")])).unwrap();
        settings.apply_overrides(&Overrides {
            seed: Some(7),
            json: true,
        });
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.output, OutputFormat::Json);
    }

    #[test]
    fn absent_flags_leave_settings_alone() {
        let mut settings = Settings {
            seed: Some(3),
            output: OutputFormat::Json,
            ..Settings::default()
        };
        settings.apply_overrides(&Overrides::default());
        assert_eq!(settings.seed, Some(3));
        assert_eq!(settings.output, OutputFormat::Json);
    }
}
