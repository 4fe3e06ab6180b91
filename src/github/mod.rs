//! Discussion publication and deduplication engine.
//!
//! This module wraps Octocrab's GraphQL support to locate or create one
//! GitHub Discussion per blog post and to publish at most one labeled
//! comment per persona on it. Idempotency is derived entirely from
//! re-reading remote state immediately before each write decision; the
//! engine keeps no local bookkeeping and is safe to re-run from zero after
//! any crash.

pub mod error;
pub mod finder;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod publisher;
pub mod resolver;
pub mod scanner;

mod graphql;

#[cfg(feature = "test-support")]
pub mod test_support;

pub use error::PublishError;
pub use finder::DiscussionFinder;
pub use gateway::{DiscussionGateway, OctocrabDiscussionGateway};
pub use locator::{PersonalAccessToken, RepositoryName, RepositoryOwner, RepositoryTarget};
pub use models::{
    CategoryId, CommentId, DiscussionCandidate, DiscussionCategory, DiscussionComment,
    DiscussionId, DiscussionRef, RepositoryDiscussionInfo, RepositoryId,
};
pub use publisher::{
    PersonaComment, PublicationFailure, PublicationOutcome, PublicationRequest, PublicationStep,
    Publisher,
};
pub use resolver::CategoryResolver;
pub use scanner::{BotCommentScanner, credited_persona, format_comment_body};

#[cfg(test)]
pub use gateway::MockDiscussionGateway;

#[cfg(test)]
mod tests;
