//! Error types exposed by the discussion publication layer.

use thiserror::Error;

/// Errors surfaced while parsing input or communicating with GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PublishError {
    /// No blog post source was supplied.
    #[error("at least one post source (URL or markdown path) is required")]
    MissingSource,

    /// The repository coordinates were incomplete.
    #[error("repository must be identified as <owner>/<repo>")]
    MissingRepositorySegments,

    /// A provided URL could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// The requested discussion category does not exist in the repository.
    #[error(
        "discussion category '{category}' not found in {owner}/{repository}; \
         available categories: {}",
        available.join(", ")
    )]
    CategoryNotFound {
        /// Repository owner.
        owner: String,
        /// Repository name.
        repository: String,
        /// Category name that was requested.
        category: String,
        /// Category names the repository actually defines.
        available: Vec<String>,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A post's title or body could not be extracted from its source.
    #[error("could not extract post content from {origin}: {message}")]
    Extraction {
        /// The URL or file path that was being read.
        origin: String,
        /// Details about the extraction failure.
        message: String,
    },

    /// Drafting a comment for one persona failed.
    #[error("drafting for persona '{persona}' failed: {message}")]
    Draft {
        /// Persona whose comment could not be drafted.
        persona: String,
        /// Details from the drafting provider.
        message: String,
    },
}
