//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.banter.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `BANTER_TOKEN`, or legacy `GITHUB_TOKEN`
//!    and `OPENAI_API_KEY`
//! 4. **Command-line arguments** – `--owner`/`-o`, `--repo`/`-r`, and so on
//!
//! # Configuration File
//!
//! Place `.banter.toml` in the current directory, home directory, or XDG
//! config directory with:
//!
//! ```toml
//! owner = "octocat"
//! repo = "blog"
//! category = "Blog Comments"
//! label_prefix = "🤖 **AI-Generated Comment**"
//! personas_file = "personas.json"
//! ```

use std::env;
use std::time::Duration;

use camino::Utf8Path;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::ai::{OpenAiDrafterConfig, Persona, default_personas, load_personas};
use crate::github::error::PublishError;

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `BANTER_SOURCE` or `--source`: Post URL or markdown path
/// - `BANTER_TOKEN`, `GITHUB_TOKEN`, or `--token`: GitHub token
/// - `BANTER_OWNER` or `--owner`: Repository owner
/// - `BANTER_REPO` or `--repo`: Repository name
/// - `BANTER_CATEGORY` or `--category`: Discussion category name
/// - `BANTER_AI_API_KEY`, `OPENAI_API_KEY`, or `--ai-api-key`: Drafting key
///
/// # Example
///
/// ```no_run
/// use banter::BanterConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = BanterConfig::load().expect("failed to load configuration");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "BANTER",
    discovery(
        dotfile_name = ".banter.toml",
        config_file_name = "banter.toml",
        app_name = "banter"
    )
)]
pub struct BanterConfig {
    /// Blog post source: a URL or a local markdown path.
    ///
    /// Positional arguments take precedence; this field serves config files
    /// and single-post invocations.
    #[ortho_config(cli_short = 's')]
    pub source: Option<String>,

    /// Personal access token with discussion read/write scope.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `BANTER_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Repository owner (e.g., "octocat").
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name (e.g., "blog").
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Discussion category name, matched case-insensitively.
    #[ortho_config(cli_short = 'c')]
    pub category: Option<String>,

    /// Markdown prefix marking comments as AI-generated.
    ///
    /// Doubles as the parsing anchor for deduplication, so changing it on an
    /// established repository makes earlier bot comments invisible to the
    /// scanner.
    #[ortho_config()]
    pub label_prefix: String,

    /// Path to a JSON file defining personas.
    ///
    /// When unset, a built-in persona trio is used.
    #[ortho_config()]
    pub personas_file: Option<String>,

    /// API key for the OpenAI-compatible drafting endpoint.
    #[ortho_config()]
    pub ai_api_key: Option<String>,

    /// Base URL of the drafting endpoint.
    #[ortho_config()]
    pub ai_base_url: String,

    /// Model identifier for drafting requests.
    #[ortho_config()]
    pub ai_model: String,

    /// HTTP timeout for drafting requests, in seconds.
    #[ortho_config()]
    pub ai_timeout_seconds: u64,

    /// Extracts and drafts but prints instead of writing to GitHub.
    ///
    /// Can be provided via:
    /// - CLI: `--dry-run` / `-n`
    /// - Config file: `dry_run = true`
    ///
    /// Note: Environment variable `BANTER_DRY_RUN` is not supported because
    /// `ortho_config` does not load boolean values from the environment.
    #[ortho_config(cli_short = 'n')]
    pub dry_run: bool,
}

const DEFAULT_LABEL_PREFIX: &str = "🤖 **AI-Generated Comment**";
const DEFAULT_AI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_AI_TIMEOUT_SECONDS: u64 = 20;

impl Default for BanterConfig {
    fn default() -> Self {
        Self {
            source: None,
            token: None,
            owner: None,
            repo: None,
            category: None,
            label_prefix: DEFAULT_LABEL_PREFIX.to_owned(),
            personas_file: None,
            ai_api_key: None,
            ai_base_url: DEFAULT_AI_BASE_URL.to_owned(),
            ai_model: DEFAULT_AI_MODEL.to_owned(),
            ai_timeout_seconds: DEFAULT_AI_TIMEOUT_SECONDS,
            dry_run: false,
        }
    }
}

impl BanterConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::MissingToken`] when no token source provides
    /// a value.
    pub fn resolve_token(&self) -> Result<String, PublishError> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(PublishError::MissingToken)
    }

    /// Resolves the drafting API key from configuration or the legacy
    /// `OPENAI_API_KEY` environment variable.
    #[must_use]
    pub fn resolve_ai_api_key(&self) -> Option<String> {
        self.ai_api_key
            .clone()
            .or_else(|| env::var("OPENAI_API_KEY").ok())
    }

    /// Returns owner and repo if both are configured.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Configuration`] when owner or repo is missing.
    pub fn require_repository_info(&self) -> Result<(&str, &str), PublishError> {
        match (&self.owner, &self.repo) {
            (Some(owner), Some(repo)) => Ok((owner.as_str(), repo.as_str())),
            (None, _) => Err(PublishError::Configuration {
                message: "repository owner is required (use --owner or -o)".to_owned(),
            }),
            (_, None) => Err(PublishError::Configuration {
                message: "repository name is required (use --repo or -r)".to_owned(),
            }),
        }
    }

    /// Returns the discussion category name.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Configuration`] when no category is set.
    pub fn require_category(&self) -> Result<&str, PublishError> {
        self.category
            .as_deref()
            .ok_or_else(|| PublishError::Configuration {
                message: "discussion category is required (use --category or -c)".to_owned(),
            })
    }

    /// Combines positional sources with the configured one.
    ///
    /// Positional arguments win; the `source` field only applies when none
    /// are given.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::MissingSource`] when no source is available
    /// from either channel.
    pub fn resolve_sources(&self, positional: Vec<String>) -> Result<Vec<String>, PublishError> {
        if !positional.is_empty() {
            return Ok(positional);
        }
        self.source
            .clone()
            .map(|single| vec![single])
            .ok_or(PublishError::MissingSource)
    }

    /// Loads personas from the configured file, or the built-in defaults.
    ///
    /// # Errors
    ///
    /// Propagates [`PublishError`] from persona file loading/validation.
    pub fn resolve_personas(&self) -> Result<Vec<Persona>, PublishError> {
        match self.personas_file.as_deref() {
            Some(path) => load_personas(Utf8Path::new(path)),
            None => Ok(default_personas()),
        }
    }

    /// Builds the drafting configuration from the AI settings.
    #[must_use]
    pub fn drafter_config(&self) -> OpenAiDrafterConfig {
        OpenAiDrafterConfig::new(
            self.ai_base_url.clone(),
            self.ai_model.clone(),
            self.resolve_ai_api_key(),
            Duration::from_secs(self.ai_timeout_seconds),
        )
    }
}
