//! Identity wrappers and repository targeting for discussion publication.

use url::Url;

use super::error::PublishError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, PublishError> {
        if value.is_empty() {
            return Err(PublishError::MissingRepositorySegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, PublishError> {
        if value.is_empty() {
            return Err(PublishError::MissingRepositorySegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, PublishError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PublishError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Derives the GitHub API base URL from a host string.
fn derive_api_base_from_host(
    scheme: &str,
    host: &str,
    port: Option<u16>,
) -> Result<Url, PublishError> {
    if host.eq_ignore_ascii_case("github.com") {
        Url::parse("https://api.github.com")
            .map_err(|error| PublishError::InvalidUrl(error.to_string()))
    } else {
        let authority = if host.contains(':') {
            format!("[{host}]")
        } else {
            host.to_owned()
        };
        let mut api_url = Url::parse(&format!("{scheme}://{authority}"))
            .map_err(|error| PublishError::InvalidUrl(error.to_string()))?;

        api_url
            .set_port(port)
            .map_err(|()| PublishError::InvalidUrl("invalid port".to_owned()))?;
        api_url.set_path("api/v3");
        Ok(api_url)
    }
}

/// A repository hosting the discussions this run writes to.
///
/// Unlike a full discussion URL, the target only pins `owner/repo` and the
/// derived API base; discussions themselves are located or created by title.
///
/// # Example
///
/// ```
/// use banter::github::RepositoryTarget;
///
/// let target = RepositoryTarget::from_owner_repo("octo", "blog")
///     .expect("should create repository target");
/// assert_eq!(target.owner().as_str(), "octo");
/// assert_eq!(target.repository().as_str(), "blog");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTarget {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryTarget {
    /// Creates a target from owner and repository name strings.
    ///
    /// Uses `github.com` as the default host.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::MissingRepositorySegments` when owner or repo
    /// is empty.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, PublishError> {
        let validated_owner = RepositoryOwner::new(owner)?;
        let repository = RepositoryName::new(repo)?;
        let api_base = Url::parse("https://api.github.com")
            .map_err(|error| PublishError::InvalidUrl(error.to_string()))?;

        Ok(Self {
            api_base,
            owner: validated_owner,
            repository,
        })
    }

    /// Parses a GitHub repository URL in the form
    /// `https://github.com/<owner>/<repo>`.
    ///
    /// GitHub Enterprise hosts derive an `api/v3` base from the URL host.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::InvalidUrl` when parsing fails or
    /// `MissingRepositorySegments` when the URL path is not `/owner/repo`.
    pub fn parse(input: &str) -> Result<Self, PublishError> {
        let parsed =
            Url::parse(input).map_err(|error| PublishError::InvalidUrl(error.to_string()))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| PublishError::InvalidUrl("URL must include a host".to_owned()))?;

        let mut segments = parsed
            .path_segments()
            .ok_or(PublishError::MissingRepositorySegments)?;

        let owner_segment = segments
            .next()
            .ok_or(PublishError::MissingRepositorySegments)?;
        let repository_segment = segments
            .next()
            .ok_or(PublishError::MissingRepositorySegments)?;

        let owner = RepositoryOwner::new(owner_segment)?;
        let repository = RepositoryName::new(repository_segment)?;
        let api_base = derive_api_base_from_host(parsed.scheme(), host, parsed.port())?;

        Ok(Self {
            api_base,
            owner,
            repository,
        })
    }

    /// API base URL derived from the repository host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Returns the `repo:owner/name` qualifier used in discussion searches.
    pub(crate) fn search_qualifier(&self) -> String {
        format!(
            "repo:{}/{}",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }
}
