//! Shared fixtures for discussion publication tests.
//!
//! Available to unit tests and, via the `test-support` feature, to
//! integration tests:
//!
//! ```
//! use banter::github::test_support::{persona_comments, sample_target};
//!
//! let target = sample_target();
//! let comments = persona_comments(&["Curious Reader"]);
//! assert_eq!(comments.len(), 1);
//! ```

use super::locator::RepositoryTarget;
use super::models::{DiscussionId, DiscussionRef};
use super::publisher::{PersonaComment, PublicationRequest};

/// Label prefix used across the test suite.
pub const SAMPLE_LABEL_PREFIX: &str = "🤖 **AI-Generated Comment**";

/// Builds a `github.com` target for `octo/blog`.
///
/// # Panics
///
/// Panics when the fixed owner and repository fail validation, which cannot
/// happen for non-empty literals.
#[must_use]
#[expect(clippy::expect_used, reason = "Fixture values are statically valid")]
pub fn sample_target() -> RepositoryTarget {
    RepositoryTarget::from_owner_repo("octo", "blog").expect("sample target should build")
}

/// Builds a discussion reference with the given node id and URL.
#[must_use]
pub fn discussion_ref(id: &str, url: &str) -> DiscussionRef {
    DiscussionRef {
        id: DiscussionId::new(id),
        url: url.to_owned(),
    }
}

/// Builds one drafted comment per persona name, in order.
#[must_use]
pub fn persona_comments(personas: &[&str]) -> Vec<PersonaComment> {
    personas
        .iter()
        .map(|persona| PersonaComment {
            persona: (*persona).to_owned(),
            text: format!("Thoughts from {persona}."),
        })
        .collect()
}

/// Builds a publication request against [`sample_target`] for the given
/// title and persona names.
#[must_use]
pub fn publication_request(title: &str, personas: &[&str]) -> PublicationRequest {
    PublicationRequest {
        target: sample_target(),
        category: "Blog Comments".to_owned(),
        title: title.to_owned(),
        body: format!("This discussion mirrors the post: https://blog.test/{title}"),
        label_prefix: SAMPLE_LABEL_PREFIX.to_owned(),
        comments: persona_comments(personas),
    }
}
