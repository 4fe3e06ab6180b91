//! Blog post content extraction from URLs and markdown files.
//!
//! Publication needs a post title (the discussion identity) and a body
//! excerpt for drafting prompts. Markdown files supply both through YAML
//! front matter; URLs are fetched and scraped. A post whose title cannot be
//! determined is a fatal extraction error because there is nothing to key
//! the discussion on.

pub mod front_matter;
pub mod web;


use std::fmt;
use std::fs;
use std::time::Duration;

use camino::Utf8PathBuf;
use url::Url;

use crate::github::PublishError;

const FETCH_TIMEOUT_SECS: u64 = 20;

/// Extracted post content used for discussion identity and prompting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent {
    /// Post title; becomes the discussion title verbatim.
    pub title: String,
    /// Post body or a plain-text excerpt of it.
    pub body: String,
    /// The source the content came from, for backlinks and diagnostics.
    pub source: String,
}

/// A blog post source: either a URL to fetch or a local markdown file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostSource {
    /// Remote post fetched over HTTP.
    Url(Url),
    /// Local markdown file with YAML front matter.
    File(Utf8PathBuf),
}

impl PostSource {
    /// Classifies an input string as a URL or a file path.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::InvalidUrl` when the input looks like a URL
    /// but does not parse.
    pub fn parse(input: &str) -> Result<Self, PublishError> {
        if input.starts_with("http://") || input.starts_with("https://") {
            let url =
                Url::parse(input).map_err(|error| PublishError::InvalidUrl(error.to_string()))?;
            Ok(Self::Url(url))
        } else {
            Ok(Self::File(Utf8PathBuf::from(input)))
        }
    }
}

impl fmt::Display for PostSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => formatter.write_str(url.as_str()),
            Self::File(path) => formatter.write_str(path.as_str()),
        }
    }
}

/// Extracts [`PostContent`] from either source kind.
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    http: reqwest::Client,
}

impl ContentExtractor {
    /// Builds an extractor with a default HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::Configuration` when the HTTP client cannot be
    /// constructed.
    pub fn new() -> Result<Self, PublishError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|error| PublishError::Configuration {
                message: format!("failed to configure content HTTP client: {error}"),
            })?;
        Ok(Self { http })
    }

    /// Extracts title and body from the given source.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::Extraction` when the source cannot be read or
    /// no title can be determined, and `PublishError::Io` for local file
    /// read failures.
    pub async fn extract(&self, source: &PostSource) -> Result<PostContent, PublishError> {
        match source {
            PostSource::Url(url) => web::extract_from_url(&self.http, url).await,
            PostSource::File(path) => {
                let raw = fs::read_to_string(path).map_err(|error| PublishError::Io {
                    message: format!("reading {path}: {error}"),
                })?;
                front_matter::extract_markdown(path.as_str(), &raw)
            }
        }
    }
}
