//! # `idforge detect`

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use idforge_core::FormatKind;

use crate::output;
use crate::{Session, EXIT_INVALID};

#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Value to classify.
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct Detection {
    pub input: String,
    pub candidates: Vec<FormatKind>,
    /// Set only when exactly one format matches.
    pub single: Option<FormatKind>,
}

pub fn detect_value(session: &Session, value: &str) -> Detection {
    let candidates = session.registry.detect_possible(value);
    let single = session.registry.detect_single(value);
    Detection {
        input: value.to_string(),
        candidates,
        single,
    }
}

/// Execute the detect subcommand.
pub fn run_detect(args: &DetectArgs, session: &Session) -> Result<u8> {
    let detection = detect_value(session, &args.value);
    output::emit(session.settings.output, &detection, |d| {
        if d.candidates.is_empty() {
            return "no matching format".to_string();
        }
        d.candidates
            .iter()
            .map(|kind| format!("{kind:<6} {}", kind.title()))
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    if detection.candidates.is_empty() {
        Ok(EXIT_INVALID)
    } else {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn single_and_ambiguous() {
        let session = Session::new(Settings::default());
        let d = detect_value(&session, "12345678950");
        assert_eq!(d.candidates, vec![FormatKind::Tckn]);
        assert_eq!(d.single, Some(FormatKind::Tckn));

        let d = detect_value(&session, "378282246310005");
        assert_eq!(d.candidates, vec![FormatKind::Imei, FormatKind::Card]);
        assert_eq!(d.single, None);
    }

    #[test]
    fn nothing_matches() {
        let session = Session::new(Settings::default());
        let args = DetectArgs {
            value: "hello".into(),
        };
        assert_eq!(run_detect(&args, &session).unwrap(), EXIT_INVALID);
    }
}
