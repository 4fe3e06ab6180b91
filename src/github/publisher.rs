//! Orchestrates find-or-create-and-publish for one blog post.

use std::collections::VecDeque;

use thiserror::Error;

use crate::telemetry::{TelemetryEvent, TelemetrySink};

use super::error::PublishError;
use super::finder::DiscussionFinder;
use super::gateway::DiscussionGateway;
use super::locator::RepositoryTarget;
use super::models::DiscussionRef;
use super::resolver::CategoryResolver;
use super::scanner::{BotCommentScanner, format_comment_body};

/// One persona's drafted comment, ready to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaComment {
    /// Persona display name; doubles as the deduplication key.
    pub persona: String,
    /// Drafted comment text (without the label header).
    pub text: String,
}

/// The transient unit of work for one post's publication.
///
/// Not persisted; idempotency is derived entirely from re-reading remote
/// state, never from local bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationRequest {
    /// Repository hosting the discussion.
    pub target: RepositoryTarget,
    /// Discussion category name (matched case-insensitively).
    pub category: String,
    /// Post title; maps 1:1 to the discussion title.
    pub title: String,
    /// Body for the discussion if it has to be created.
    pub body: String,
    /// Label prefix marking comments as bot-authored.
    pub label_prefix: String,
    /// Drafted comments to attempt, in caller-supplied order.
    pub comments: Vec<PersonaComment>,
}

/// Result of a completed publication run for one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationOutcome {
    /// The discussion that was found or created.
    pub discussion: DiscussionRef,
    /// Personas whose comments were posted in this call.
    pub published: Vec<String>,
    /// Personas skipped because a labeled comment already existed.
    pub skipped: Vec<String>,
}

/// A publication that failed partway through.
///
/// There is no multi-comment transaction in the remote API, so comments
/// already posted stay posted; the failure reports them rather than rolling
/// anything back. A later run will discover them as already done.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{error}")]
pub struct PublicationFailure {
    /// The error that aborted the remaining steps.
    pub error: PublishError,
    /// Personas published before the failure.
    pub published: Vec<String>,
    /// Personas skipped before the failure.
    pub skipped: Vec<String>,
}

/// Progress of one publication through its five-step sequence.
///
/// Steps are strictly sequential because each step's inputs depend on the
/// previous step's output. Modelling them as data makes every transition
/// testable in isolation and makes partial-failure reporting a matter of
/// reading the last reached step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicationStep {
    /// Searching for an existing discussion with the post's exact title.
    Locating,
    /// No discussion found; resolving ids and creating one.
    Creating,
    /// Reading existing comments to find already-credited personas.
    Scanning {
        /// The discussion that was found or created.
        discussion: DiscussionRef,
    },
    /// Posting one comment per remaining persona.
    Publishing {
        /// The discussion being commented on.
        discussion: DiscussionRef,
        /// Personas still waiting for their comment, in request order.
        pending: VecDeque<PersonaComment>,
        /// Personas already posted by this run.
        published: Vec<String>,
        /// Personas skipped because they were already credited.
        skipped: Vec<String>,
    },
    /// All personas handled.
    Done(PublicationOutcome),
}

impl PublicationStep {
    /// Published/skipped personas accumulated so far at this step.
    fn progress(&self) -> (Vec<String>, Vec<String>) {
        match self {
            Self::Publishing {
                published, skipped, ..
            } => (published.clone(), skipped.clone()),
            Self::Done(outcome) => (outcome.published.clone(), outcome.skipped.clone()),
            _ => (Vec::new(), Vec::new()),
        }
    }
}

static NOOP_TELEMETRY: crate::telemetry::NoopTelemetrySink = crate::telemetry::NoopTelemetrySink;

/// Drives one [`PublicationRequest`] through locate, create, scan, and
/// publish against a [`DiscussionGateway`].
pub struct Publisher<'client, Gateway>
where
    Gateway: DiscussionGateway,
{
    client: &'client Gateway,
    telemetry: &'client dyn TelemetrySink,
}

impl<'client, Gateway> Publisher<'client, Gateway>
where
    Gateway: DiscussionGateway,
{
    /// Create a publisher that drops telemetry events.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self {
            client,
            telemetry: &NOOP_TELEMETRY,
        }
    }

    /// Create a publisher that records telemetry events to the given sink.
    #[must_use]
    pub const fn with_telemetry(
        client: &'client Gateway,
        telemetry: &'client dyn TelemetrySink,
    ) -> Self {
        Self { client, telemetry }
    }

    /// Ensure a discussion exists for the post, then post any missing
    /// persona comments.
    ///
    /// # Errors
    ///
    /// Returns [`PublicationFailure`] when any step fails; the failure
    /// carries the personas already published and skipped so callers can
    /// report partial progress. No rollback is attempted.
    pub async fn publish(
        &self,
        request: &PublicationRequest,
    ) -> Result<PublicationOutcome, PublicationFailure> {
        let mut step = PublicationStep::Locating;

        loop {
            let (published, skipped) = step.progress();
            match self.advance(step, request).await {
                Ok(PublicationStep::Done(outcome)) => return Ok(outcome),
                Ok(next) => step = next,
                Err(error) => {
                    return Err(PublicationFailure {
                        error,
                        published,
                        skipped,
                    });
                }
            }
        }
    }

    /// Perform one transition of the publication sequence.
    ///
    /// `Done` is terminal and transitions to itself.
    ///
    /// # Errors
    ///
    /// Propagates the underlying gateway failure; the caller owns deciding
    /// what partial progress to report.
    pub async fn advance(
        &self,
        step: PublicationStep,
        request: &PublicationRequest,
    ) -> Result<PublicationStep, PublishError> {
        match step {
            PublicationStep::Locating => self.locate(request).await,
            PublicationStep::Creating => self.create(request).await,
            PublicationStep::Scanning { discussion } => self.scan(discussion, request).await,
            PublicationStep::Publishing {
                discussion,
                pending,
                published,
                skipped,
            } => {
                self.publish_next(discussion, pending, published, skipped, request)
                    .await
            }
            PublicationStep::Done(outcome) => Ok(PublicationStep::Done(outcome)),
        }
    }

    async fn locate(&self, request: &PublicationRequest) -> Result<PublicationStep, PublishError> {
        let finder = DiscussionFinder::new(self.client);
        match finder.find(&request.target, &request.title).await? {
            Some(discussion) => {
                tracing::debug!(
                    title = request.title.as_str(),
                    url = discussion.url.as_str(),
                    "reusing existing discussion"
                );
                Ok(PublicationStep::Scanning { discussion })
            }
            None => Ok(PublicationStep::Creating),
        }
    }

    async fn create(&self, request: &PublicationRequest) -> Result<PublicationStep, PublishError> {
        let resolver = CategoryResolver::new(self.client);
        let (repository_id, category_id) = resolver
            .resolve(&request.target, &request.category)
            .await?;

        let discussion = self
            .client
            .create_discussion(&repository_id, &category_id, &request.title, &request.body)
            .await?;

        self.telemetry.record(TelemetryEvent::DiscussionCreated {
            title: request.title.clone(),
            url: discussion.url.clone(),
        });

        Ok(PublicationStep::Scanning { discussion })
    }

    async fn scan(
        &self,
        discussion: DiscussionRef,
        request: &PublicationRequest,
    ) -> Result<PublicationStep, PublishError> {
        let scanner = BotCommentScanner::new(self.client);
        let credited = scanner.scan(&discussion.id, &request.label_prefix).await?;

        let mut pending = VecDeque::new();
        let mut skipped = Vec::new();
        for comment in &request.comments {
            if credited.contains(&comment.persona) {
                self.telemetry.record(TelemetryEvent::PersonaSkipped {
                    persona: comment.persona.clone(),
                });
                skipped.push(comment.persona.clone());
            } else {
                pending.push_back(comment.clone());
            }
        }

        Ok(PublicationStep::Publishing {
            discussion,
            pending,
            published: Vec::new(),
            skipped,
        })
    }

    async fn publish_next(
        &self,
        discussion: DiscussionRef,
        mut pending: VecDeque<PersonaComment>,
        mut published: Vec<String>,
        skipped: Vec<String>,
        request: &PublicationRequest,
    ) -> Result<PublicationStep, PublishError> {
        let Some(next) = pending.pop_front() else {
            return Ok(PublicationStep::Done(PublicationOutcome {
                discussion,
                published,
                skipped,
            }));
        };

        let body = format_comment_body(&request.label_prefix, &next.persona, &next.text);
        self.client
            .add_discussion_comment(&discussion.id, &body)
            .await?;

        self.telemetry.record(TelemetryEvent::CommentPublished {
            persona: next.persona.clone(),
            discussion_url: discussion.url.clone(),
        });
        published.push(next.persona);

        Ok(PublicationStep::Publishing {
            discussion,
            pending,
            published,
            skipped,
        })
    }
}
