//! Persona definitions and loading.

use std::fs;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::github::PublishError;

/// A named AI writing style configured by the operator.
///
/// The name doubles as the deduplication key on discussions, so it must be
/// unique within a configuration; [`load_personas`] enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Display name credited in the comment header.
    pub name: String,
    /// What this persona cares about; steers the drafting prompt.
    pub description: String,
    /// Voice the drafted comment should adopt.
    pub tone: String,
}

/// The built-in persona trio used when no personas file is configured.
#[must_use]
pub fn default_personas() -> Vec<Persona> {
    vec![
        Persona {
            name: "Curious Reader".to_owned(),
            description: "Asks a thoughtful question about something the post left open."
                .to_owned(),
            tone: "friendly and inquisitive".to_owned(),
        },
        Persona {
            name: "Devil's Advocate".to_owned(),
            description: "Politely challenges one of the post's assumptions or conclusions."
                .to_owned(),
            tone: "respectful but sceptical".to_owned(),
        },
        Persona {
            name: "Industry Veteran".to_owned(),
            description: "Relates the post to hard-won experience from practice.".to_owned(),
            tone: "pragmatic and anecdotal".to_owned(),
        },
    ]
}

/// Loads personas from a JSON file (an array of persona objects).
///
/// # Errors
///
/// Returns `PublishError::Io` when the file cannot be read and
/// `PublishError::Configuration` when it is not valid persona JSON, is
/// empty, contains blank names, or repeats a name.
pub fn load_personas(path: &Utf8Path) -> Result<Vec<Persona>, PublishError> {
    let raw = fs::read_to_string(path).map_err(|error| PublishError::Io {
        message: format!("reading personas file {path}: {error}"),
    })?;

    let personas: Vec<Persona> =
        serde_json::from_str(&raw).map_err(|error| PublishError::Configuration {
            message: format!("personas file {path} is not valid: {error}"),
        })?;

    validate_personas(&personas).map_err(|message| PublishError::Configuration {
        message: format!("personas file {path}: {message}"),
    })?;

    Ok(personas)
}

fn validate_personas(personas: &[Persona]) -> Result<(), String> {
    if personas.is_empty() {
        return Err("at least one persona is required".to_owned());
    }

    let mut seen = std::collections::BTreeSet::new();
    for persona in personas {
        let name = persona.name.trim();
        if name.is_empty() {
            return Err("persona names must not be blank".to_owned());
        }
        if !seen.insert(name) {
            return Err(format!("duplicate persona name '{name}'"));
        }
    }

    Ok(())
}
