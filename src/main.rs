//! Banter CLI entrypoint for publishing AI discussion starters.

use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use banter::ai::OpenAiCommentDrafter;
use banter::content::{ContentExtractor, PostSource};
use banter::run::{PostStatus, RunReport, RunSettings, preview_posts, publish_posts};
use banter::{
    BanterConfig, OctocrabDiscussionGateway, PersonalAccessToken, PublishError, RepositoryTarget,
};
use ortho_config::OrthoConfig;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<bool, PublishError> {
    let (positional, filtered) = extract_positional_sources(env::args_os().collect());
    let config = load_config(filtered)?;

    let report = execute(&config, positional).await?;
    write_summary(&report)?;
    Ok(report.all_succeeded())
}

async fn execute(
    config: &BanterConfig,
    positional: Vec<String>,
) -> Result<RunReport, PublishError> {
    let sources = config
        .resolve_sources(positional)?
        .iter()
        .map(|raw| PostSource::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let personas = config.resolve_personas()?;
    let extractor = ContentExtractor::new()?;
    let drafter = OpenAiCommentDrafter::new(config.drafter_config());

    if config.dry_run {
        return Ok(preview_posts(&drafter, &extractor, &personas, &sources).await);
    }

    let (owner, repo) = config.require_repository_info()?;
    let target = RepositoryTarget::from_owner_repo(owner, repo)?;
    let category = config.require_category()?.to_owned();
    let token = PersonalAccessToken::new(config.resolve_token()?)?;
    let gateway = OctocrabDiscussionGateway::for_token(&token, &target)?;

    let settings = RunSettings {
        target,
        category,
        label_prefix: config.label_prefix.clone(),
        personas,
    };

    Ok(publish_posts(&gateway, &drafter, &extractor, &settings, &sources).await)
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`PublishError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config(args: Vec<OsString>) -> Result<BanterConfig, PublishError> {
    BanterConfig::load_from_iter(args).map_err(|error| PublishError::Configuration {
        message: error.to_string(),
    })
}

/// Flags whose following argument is a value, not a positional source.
const VALUE_FLAGS: [&str; 16] = [
    "-s",
    "--source",
    "-t",
    "--token",
    "-o",
    "--owner",
    "-r",
    "--repo",
    "-c",
    "--category",
    "--label-prefix",
    "--personas-file",
    "--ai-api-key",
    "--ai-base-url",
    "--ai-model",
    "--ai-timeout-seconds",
];

/// Splits positional post sources from flag arguments.
///
/// Returns the positional sources and the remaining arguments (program name
/// and flags, in their original order) for ortho-config to parse.
fn extract_positional_sources(args: Vec<OsString>) -> (Vec<String>, Vec<OsString>) {
    let mut positional = Vec::new();
    let mut remaining = Vec::new();
    let mut iter = args.into_iter();

    if let Some(program) = iter.next() {
        remaining.push(program);
    }

    let mut skip_value = false;
    for arg in iter {
        if skip_value {
            remaining.push(arg);
            skip_value = false;
            continue;
        }

        let text = arg.to_string_lossy().into_owned();
        if text.starts_with('-') {
            if VALUE_FLAGS.contains(&text.as_str()) {
                skip_value = true;
            }
            remaining.push(arg);
        } else {
            positional.push(text);
        }
    }

    (positional, remaining)
}

fn write_summary(report: &RunReport) -> Result<(), PublishError> {
    let mut stdout = io::stdout().lock();

    for post in &report.posts {
        let line = match &post.status {
            PostStatus::Published(outcome) => format!(
                "{}: published [{}], skipped [{}]\nDiscussion: {}",
                post.source,
                outcome.published.join(", "),
                outcome.skipped.join(", "),
                outcome.discussion.url
            ),
            PostStatus::DryRun { title, drafted } => format!(
                "[dry-run] {}: would publish [{}] to discussion '{title}'",
                post.source,
                drafted.join(", ")
            ),
            PostStatus::Failed(failure) => format!(
                "{}: failed after publishing [{}]: {}",
                post.source,
                failure.published.join(", "),
                failure.error
            ),
        };

        writeln!(stdout, "{line}").map_err(|error| PublishError::Io {
            message: error.to_string(),
        })?;

        for draft_failure in &post.draft_failures {
            writeln!(stdout, "  note: {draft_failure}").map_err(|error| PublishError::Io {
                message: error.to_string(),
            })?;
        }
    }

    Ok(())
}
