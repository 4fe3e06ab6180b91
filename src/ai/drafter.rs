//! Drafting service abstractions and the per-persona tolerance helper.

use async_trait::async_trait;

use crate::content::PostContent;
use crate::github::{PersonaComment, PublishError};

use super::persona::Persona;

/// Shared drafting contract: one comment per persona, independent calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentDrafter: Send + Sync {
    /// Draft one discussion-starter comment in the persona's voice.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when the provider call fails.
    async fn draft(&self, post: &PostContent, persona: &Persona) -> Result<String, PublishError>;
}

/// All drafts produced for one post, plus per-persona failures.
///
/// A single persona's drafting failure must not abort the other personas;
/// failures are reported alongside the drafts that did succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftReport {
    /// Successfully drafted comments, in persona order.
    pub comments: Vec<PersonaComment>,
    /// Drafting failures, one [`PublishError::Draft`] per failed persona.
    pub failures: Vec<PublishError>,
}

/// Drafts comments for every persona, tolerating individual failures.
pub async fn draft_all(
    drafter: &dyn CommentDrafter,
    post: &PostContent,
    personas: &[Persona],
) -> DraftReport {
    let mut comments = Vec::new();
    let mut failures = Vec::new();

    for persona in personas {
        match drafter.draft(post, persona).await {
            Ok(text) => comments.push(PersonaComment {
                persona: persona.name.clone(),
                text,
            }),
            Err(error) => {
                tracing::debug!(
                    persona = persona.name.as_str(),
                    %error,
                    "drafting failed for persona"
                );
                failures.push(PublishError::Draft {
                    persona: persona.name.clone(),
                    message: error.to_string(),
                });
            }
        }
    }

    DraftReport { comments, failures }
}
