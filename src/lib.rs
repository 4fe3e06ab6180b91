//! Banter library crate: AI discussion-starter publication for blog posts.
//!
//! Banter drafts persona-voiced comments for a blog post and publishes them
//! as top-level comments on a GitHub Discussion, creating the discussion
//! only when one does not already exist for the post's title and skipping
//! personas that have already commented. The library wraps Octocrab's
//! GraphQL support for the Discussions API, an OpenAI-compatible drafting
//! client, and content extraction for URLs and markdown files.

pub mod ai;
pub mod config;
pub mod content;
pub mod github;
pub mod run;
pub mod telemetry;

pub use config::BanterConfig;
pub use github::{
    DiscussionGateway, OctocrabDiscussionGateway, PersonalAccessToken, PublicationOutcome,
    PublicationRequest, PublishError, Publisher, RepositoryTarget,
};
