//! Data models representing discussions, categories, and comments.

/// Opaque GraphQL node id for a discussion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscussionId(String);

impl DiscussionId {
    /// Wraps a raw GraphQL node id.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw id value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Opaque GraphQL node id for a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryId(String);

impl RepositoryId {
    /// Wraps a raw GraphQL node id.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw id value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Opaque GraphQL node id for a discussion category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryId(String);

impl CategoryId {
    /// Wraps a raw GraphQL node id.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw id value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Opaque GraphQL node id for a discussion comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentId(String);

impl CommentId {
    /// Wraps a raw GraphQL node id.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw id value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// A located or newly created discussion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionRef {
    /// Discussion node id used for follow-up mutations.
    pub id: DiscussionId,
    /// HTML URL for displaying to a user.
    pub url: String,
}

/// A discussion returned by the remote title search.
///
/// The remote search is fuzzy; candidates carry their exact title so the
/// locator can filter to byte-exact matches locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionCandidate {
    /// Discussion node id.
    pub id: DiscussionId,
    /// Exact discussion title as stored remotely.
    pub title: String,
    /// HTML URL of the discussion.
    pub url: String,
}

/// A discussion category defined by a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionCategory {
    /// Category node id required by the create-discussion mutation.
    pub id: CategoryId,
    /// Human-readable category name.
    pub name: String,
}

/// Repository id plus its discussion categories, resolved in one read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryDiscussionInfo {
    /// Repository node id required by the create-discussion mutation.
    pub repository_id: RepositoryId,
    /// Categories the repository defines, in API order.
    pub categories: Vec<DiscussionCategory>,
}

/// An existing top-level comment on a discussion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionComment {
    /// Raw comment body as stored remotely.
    pub body: String,
}
