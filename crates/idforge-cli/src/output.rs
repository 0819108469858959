//! Rendering of command results as text or JSON.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::OutputFormat;

/// Render `value` as pretty JSON, or through `text` for console output.
pub fn render<T, F>(format: OutputFormat, value: &T, text: F) -> Result<String>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Text => Ok(text(value)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("failed to serialize output as JSON")
        }
    }
}

/// Render and print to stdout.
pub fn emit<T, F>(format: OutputFormat, value: &T, text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    let rendered = render(format, value, text)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
        count: usize,
    }

    #[test]
    fn text_uses_callback() {
        let sample = Sample { name: "tckn", count: 2 };
        let out =
            render(OutputFormat::Text, &sample, |s| format!("{} x{}", s.name, s.count)).unwrap();
        assert_eq!(out, "tckn x2");
    }

    #[test]
    fn json_ignores_callback() {
        let sample = Sample { name: "vkn", count: 1 };
        let out = render(OutputFormat::Json, &sample, |_| unreachable!()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["name"], "vkn");
        assert_eq!(value["count"], 1);
    }
}
