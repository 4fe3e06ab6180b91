//! Per-run sequencing: extraction, drafting, and publication per post.
//!
//! Each post runs its own locate/create/scan/publish sequence; a failure
//! for one post is recorded in its report and the run continues with the
//! next post.

use crate::ai::{CommentDrafter, Persona, draft_all};
use crate::content::{ContentExtractor, PostSource};
use crate::github::{
    DiscussionGateway, PublicationFailure, PublicationOutcome, PublicationRequest, PublishError,
    Publisher, RepositoryTarget,
};

/// Everything the per-post loop needs besides the sources themselves.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Repository hosting the discussions.
    pub target: RepositoryTarget,
    /// Discussion category name.
    pub category: String,
    /// Label prefix for bot comments.
    pub label_prefix: String,
    /// Personas to attempt, in order.
    pub personas: Vec<Persona>,
}

/// Where one post's publication ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostStatus {
    /// The discussion exists and all drafted comments were handled.
    Published(PublicationOutcome),
    /// Dry run: drafting succeeded but nothing was written to GitHub.
    DryRun {
        /// The post title a discussion would be keyed on.
        title: String,
        /// Personas whose drafts would be posted.
        drafted: Vec<String>,
    },
    /// The post's sequence aborted; partial progress is inside.
    Failed(PublicationFailure),
}

/// Report for one post in the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostReport {
    /// The source that was processed.
    pub source: String,
    /// Final status of the post's publication.
    pub status: PostStatus,
    /// Personas whose drafting failed (they were never attempted).
    pub draft_failures: Vec<PublishError>,
}

impl PostReport {
    /// Whether this post's sequence completed without error.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self.status, PostStatus::Published(_) | PostStatus::DryRun { .. })
    }

    fn failed(source: &PostSource, error: PublishError) -> Self {
        Self {
            source: source.to_string(),
            status: PostStatus::Failed(PublicationFailure {
                error,
                published: Vec::new(),
                skipped: Vec::new(),
            }),
            draft_failures: Vec::new(),
        }
    }
}

/// Report for a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// One report per requested post, in request order.
    pub posts: Vec<PostReport>,
}

impl RunReport {
    /// Whether every post in the run succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.posts.iter().all(PostReport::succeeded)
    }
}

fn discussion_body(source: &PostSource) -> String {
    format!("This discussion mirrors the post: {source}")
}

/// Publishes every source against the given gateway and drafter.
pub async fn publish_posts(
    gateway: &impl DiscussionGateway,
    drafter: &dyn CommentDrafter,
    extractor: &ContentExtractor,
    settings: &RunSettings,
    sources: &[PostSource],
) -> RunReport {
    let publisher = Publisher::new(gateway);
    let mut posts = Vec::new();

    for source in sources {
        let post = match extractor.extract(source).await {
            Ok(post) => post,
            Err(error) => {
                posts.push(PostReport::failed(source, error));
                continue;
            }
        };

        let drafts = draft_all(drafter, &post, &settings.personas).await;
        let request = PublicationRequest {
            target: settings.target.clone(),
            category: settings.category.clone(),
            title: post.title,
            body: discussion_body(source),
            label_prefix: settings.label_prefix.clone(),
            comments: drafts.comments,
        };

        let status = match publisher.publish(&request).await {
            Ok(outcome) => PostStatus::Published(outcome),
            Err(failure) => PostStatus::Failed(failure),
        };

        posts.push(PostReport {
            source: source.to_string(),
            status,
            draft_failures: drafts.failures,
        });
    }

    RunReport { posts }
}

/// Extracts and drafts every source without touching GitHub.
pub async fn preview_posts(
    drafter: &dyn CommentDrafter,
    extractor: &ContentExtractor,
    personas: &[Persona],
    sources: &[PostSource],
) -> RunReport {
    let mut posts = Vec::new();

    for source in sources {
        let post = match extractor.extract(source).await {
            Ok(post) => post,
            Err(error) => {
                posts.push(PostReport::failed(source, error));
                continue;
            }
        };

        let drafts = draft_all(drafter, &post, personas).await;
        posts.push(PostReport {
            source: source.to_string(),
            status: PostStatus::DryRun {
                title: post.title,
                drafted: drafts
                    .comments
                    .iter()
                    .map(|comment| comment.persona.clone())
                    .collect(),
            },
            draft_failures: drafts.failures,
        });
    }

    RunReport { posts }
}
