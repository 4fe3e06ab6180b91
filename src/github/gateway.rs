//! Gateways for reading and writing GitHub Discussions through Octocrab.
//!
//! This module provides trait-based gateways for communicating with the
//! GitHub GraphQL API. The trait-based design enables mocking in tests while
//! the Octocrab implementation handles real HTTP requests.

use async_trait::async_trait;
use http::{StatusCode, Uri};
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::error::PublishError;
use super::graphql::{
    ADD_COMMENT_MUTATION, AddCommentData, COMMENT_PAGE_SIZE, CREATE_DISCUSSION_MUTATION,
    CreateDiscussionData, DISCUSSION_COMMENTS_QUERY, DISCUSSION_SEARCH_QUERY,
    DiscussionCommentsData, GraphQlEnvelope, REPOSITORY_INFO_QUERY, RepositoryInfoData,
    SEARCH_WINDOW, SearchData,
};
use super::locator::{PersonalAccessToken, RepositoryTarget};
use super::models::{
    CategoryId, CommentId, DiscussionCandidate, DiscussionCategory, DiscussionComment,
    DiscussionId, DiscussionRef, RepositoryDiscussionInfo, RepositoryId,
};

/// Builds an Octocrab client for the given token and API base URL.
///
/// # Errors
///
/// Returns `PublishError::InvalidUrl` when the base URI cannot be parsed or
/// `PublishError::Api` when Octocrab fails to construct a client.
fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &str,
) -> Result<Octocrab, PublishError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| PublishError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .base_uri(base_uri)
        .map_err(|error| PublishError::Api {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}

/// Gateway exposing the five Discussions operations the publisher needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscussionGateway: Send + Sync {
    /// Fetch the repository node id and its discussion categories.
    async fn repository_discussion_info(
        &self,
        target: &RepositoryTarget,
    ) -> Result<RepositoryDiscussionInfo, PublishError>;

    /// Search discussions in the repository whose titles resemble `title`.
    ///
    /// The remote search is fuzzy and may both over- and under-match; callers
    /// must filter the returned candidates themselves.
    async fn search_discussions(
        &self,
        target: &RepositoryTarget,
        title: &str,
    ) -> Result<Vec<DiscussionCandidate>, PublishError>;

    /// Create a new discussion. Not idempotent: calling twice creates two.
    async fn create_discussion(
        &self,
        repository_id: &RepositoryId,
        category_id: &CategoryId,
        title: &str,
        body: &str,
    ) -> Result<DiscussionRef, PublishError>;

    /// Fetch one bounded page of the discussion's top-level comments.
    async fn discussion_comments(
        &self,
        discussion_id: &DiscussionId,
    ) -> Result<Vec<DiscussionComment>, PublishError>;

    /// Append one top-level comment (never a reply) to the discussion.
    async fn add_discussion_comment(
        &self,
        discussion_id: &DiscussionId,
        body: &str,
    ) -> Result<CommentId, PublishError>;
}

/// Octocrab-backed gateway speaking GraphQL.
pub struct OctocrabDiscussionGateway {
    client: Octocrab,
}

impl OctocrabDiscussionGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and repository target.
    ///
    /// The credential is injected here, at construction time; the gateway
    /// never consults process-wide environment state.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::InvalidUrl` when the base URI cannot be parsed
    /// or `PublishError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        target: &RepositoryTarget,
    ) -> Result<Self, PublishError> {
        let octocrab = build_octocrab_client(token, target.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }

    async fn execute<T>(
        &self,
        operation: &str,
        payload: &serde_json::Value,
    ) -> Result<T, PublishError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(operation, "issuing GraphQL request");

        let envelope: GraphQlEnvelope<T> = self
            .client
            .graphql(payload)
            .await
            .map_err(|error| map_octocrab_error(operation, &error))?;

        if let Some(errors) = envelope.errors
            && !errors.is_empty()
        {
            let joined = errors
                .iter()
                .map(|entry| entry.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(PublishError::Api {
                message: format!("{operation} failed: {joined}"),
            });
        }

        envelope.data.ok_or_else(|| PublishError::Api {
            message: format!("{operation} returned no data"),
        })
    }
}

#[async_trait]
impl DiscussionGateway for OctocrabDiscussionGateway {
    async fn repository_discussion_info(
        &self,
        target: &RepositoryTarget,
    ) -> Result<RepositoryDiscussionInfo, PublishError> {
        let payload = json!({
            "query": REPOSITORY_INFO_QUERY,
            "variables": {
                "owner": target.owner().as_str(),
                "name": target.repository().as_str(),
            },
        });

        let data: RepositoryInfoData = self.execute("repository info", &payload).await?;
        let repository = data.repository.ok_or_else(|| PublishError::Api {
            message: format!(
                "repository {}/{} was not found or is not accessible",
                target.owner().as_str(),
                target.repository().as_str()
            ),
        })?;

        Ok(RepositoryDiscussionInfo {
            repository_id: RepositoryId::new(repository.id),
            categories: repository
                .discussion_categories
                .nodes
                .into_iter()
                .map(|node| DiscussionCategory {
                    id: CategoryId::new(node.id),
                    name: node.name,
                })
                .collect(),
        })
    }

    async fn search_discussions(
        &self,
        target: &RepositoryTarget,
        title: &str,
    ) -> Result<Vec<DiscussionCandidate>, PublishError> {
        let search_query = format!("{} in:title {title}", target.search_qualifier());
        let payload = json!({
            "query": DISCUSSION_SEARCH_QUERY,
            "variables": {
                "searchQuery": search_query,
                "first": SEARCH_WINDOW,
            },
        });

        let data: SearchData = self.execute("discussion search", &payload).await?;
        Ok(data
            .search
            .nodes
            .into_iter()
            .filter_map(|node| match (node.id, node.title, node.url) {
                (Some(id), Some(node_title), Some(url)) => Some(DiscussionCandidate {
                    id: DiscussionId::new(id),
                    title: node_title,
                    url,
                }),
                _ => None,
            })
            .collect())
    }

    async fn create_discussion(
        &self,
        repository_id: &RepositoryId,
        category_id: &CategoryId,
        title: &str,
        body: &str,
    ) -> Result<DiscussionRef, PublishError> {
        let payload = json!({
            "query": CREATE_DISCUSSION_MUTATION,
            "variables": {
                "repositoryId": repository_id.as_str(),
                "categoryId": category_id.as_str(),
                "title": title,
                "body": body,
            },
        });

        let data: CreateDiscussionData = self.execute("create discussion", &payload).await?;
        let discussion =
            data.create_discussion
                .discussion
                .ok_or_else(|| PublishError::Api {
                    message: format!("create discussion for '{title}' returned no discussion"),
                })?;

        tracing::info!(title, url = discussion.url.as_str(), "created discussion");

        Ok(DiscussionRef {
            id: DiscussionId::new(discussion.id),
            url: discussion.url,
        })
    }

    async fn discussion_comments(
        &self,
        discussion_id: &DiscussionId,
    ) -> Result<Vec<DiscussionComment>, PublishError> {
        let payload = json!({
            "query": DISCUSSION_COMMENTS_QUERY,
            "variables": {
                "id": discussion_id.as_str(),
                "first": COMMENT_PAGE_SIZE,
            },
        });

        let data: DiscussionCommentsData = self.execute("list comments", &payload).await?;
        let Some(node) = data.node else {
            return Err(PublishError::Api {
                message: format!(
                    "discussion {} was not found when listing comments",
                    discussion_id.as_str()
                ),
            });
        };

        Ok(node
            .comments
            .map(|connection| {
                connection
                    .nodes
                    .into_iter()
                    .filter_map(|comment| comment.body)
                    .map(|body| DiscussionComment { body })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn add_discussion_comment(
        &self,
        discussion_id: &DiscussionId,
        body: &str,
    ) -> Result<CommentId, PublishError> {
        let payload = json!({
            "query": ADD_COMMENT_MUTATION,
            "variables": {
                "discussionId": discussion_id.as_str(),
                "body": body,
            },
        });

        let data: AddCommentData = self.execute("add comment", &payload).await?;
        let comment = data
            .add_discussion_comment
            .comment
            .ok_or_else(|| PublishError::Api {
                message: format!(
                    "add comment on discussion {} returned no comment",
                    discussion_id.as_str()
                ),
            })?;

        Ok(CommentId::new(comment.id))
    }
}

// --- Error mapping helpers ---

/// Checks if a GitHub error status indicates an authentication failure.
const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> PublishError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return if is_auth_failure(source.status_code) {
            PublishError::Authentication {
                message: format!(
                    "{operation} failed: GitHub returned {status} {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        } else {
            PublishError::Api {
                message: format!(
                    "{operation} failed with status {status}: {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        };
    }

    if is_network_error(error) {
        return PublishError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    PublishError::Api {
        message: format!("{operation} failed: {error}"),
    }
}
