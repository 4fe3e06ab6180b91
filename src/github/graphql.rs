//! GraphQL documents and response shapes for the Discussions API.
//!
//! GitHub Discussions are only reachable over GraphQL. The documents below
//! are the literal wire contracts; the deserialisation structs mirror the
//! selection sets and are converted into the public models by the gateway.

use serde::Deserialize;

/// Upper bound on discussion categories fetched per repository.
pub(super) const CATEGORY_PAGE_SIZE: u32 = 25;

/// Upper bound on search results inspected for an exact title match.
///
/// A true duplicate outside this window is invisible to the locator; that is
/// an accepted limitation rather than something the locator papers over.
pub(super) const SEARCH_WINDOW: u32 = 25;

/// Upper bound on comments scanned for persona deduplication.
///
/// Personas credited beyond this single page are invisible to the scanner
/// and could be posted again on very high-traffic discussions.
pub(super) const COMMENT_PAGE_SIZE: u32 = 100;

pub(super) const REPOSITORY_INFO_QUERY: &str = "\
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    id
    discussionCategories(first: 25) {
      nodes { id name }
    }
  }
}";

pub(super) const DISCUSSION_SEARCH_QUERY: &str = "\
query($searchQuery: String!, $first: Int!) {
  search(query: $searchQuery, type: DISCUSSION, first: $first) {
    nodes {
      ... on Discussion { id title url }
    }
  }
}";

pub(super) const CREATE_DISCUSSION_MUTATION: &str = "\
mutation($repositoryId: ID!, $categoryId: ID!, $title: String!, $body: String!) {
  createDiscussion(input: {repositoryId: $repositoryId, categoryId: $categoryId, title: $title, body: $body}) {
    discussion { id url }
  }
}";

pub(super) const DISCUSSION_COMMENTS_QUERY: &str = "\
query($id: ID!, $first: Int!) {
  node(id: $id) {
    ... on Discussion {
      comments(first: $first) {
        nodes { body }
      }
    }
  }
}";

pub(super) const ADD_COMMENT_MUTATION: &str = "\
mutation($discussionId: ID!, $body: String!) {
  addDiscussionComment(input: {discussionId: $discussionId, body: $body}) {
    comment { id }
  }
}";

/// Standard GraphQL response envelope.
///
/// GitHub reports resolver failures with HTTP 200 and a populated `errors`
/// array, so the envelope has to be inspected before `data` is trusted.
#[derive(Debug, Deserialize)]
pub(super) struct GraphQlEnvelope<T> {
    pub(super) data: Option<T>,
    pub(super) errors: Option<Vec<GraphQlErrorEntry>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphQlErrorEntry {
    pub(super) message: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RepositoryInfoData {
    pub(super) repository: Option<ApiRepository>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiRepository {
    pub(super) id: String,
    #[serde(rename = "discussionCategories")]
    pub(super) discussion_categories: ApiCategoryConnection,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiCategoryConnection {
    pub(super) nodes: Vec<ApiCategory>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiCategory {
    pub(super) id: String,
    pub(super) name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchData {
    pub(super) search: ApiSearchConnection,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiSearchConnection {
    pub(super) nodes: Vec<ApiSearchNode>,
}

/// Search nodes are a union; non-discussion nodes deserialise with all
/// fields absent and are dropped by the gateway.
#[derive(Debug, Deserialize)]
pub(super) struct ApiSearchNode {
    pub(super) id: Option<String>,
    pub(super) title: Option<String>,
    pub(super) url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateDiscussionData {
    #[serde(rename = "createDiscussion")]
    pub(super) create_discussion: ApiCreateDiscussionPayload,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiCreateDiscussionPayload {
    pub(super) discussion: Option<ApiDiscussion>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiDiscussion {
    pub(super) id: String,
    pub(super) url: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct DiscussionCommentsData {
    pub(super) node: Option<ApiDiscussionNode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiDiscussionNode {
    pub(super) comments: Option<ApiCommentConnection>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiCommentConnection {
    pub(super) nodes: Vec<ApiComment>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiComment {
    pub(super) body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AddCommentData {
    #[serde(rename = "addDiscussionComment")]
    pub(super) add_discussion_comment: ApiAddCommentPayload,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiAddCommentPayload {
    pub(super) comment: Option<ApiCommentRef>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiCommentRef {
    pub(super) id: String,
}
