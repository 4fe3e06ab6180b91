//! Scans discussion comments for personas that have already posted.

use std::collections::BTreeSet;

use super::error::PublishError;
use super::gateway::DiscussionGateway;
use super::models::DiscussionId;

/// Separator between the label prefix and the persona-name field.
const PERSONA_MARKER: &str = " · Persona: ";

/// Formats a bot comment body in the wire format the scanner parses back.
///
/// The layout is `<labelPrefix> · Persona: <personaName>` on the first line,
/// a blank line, then the drafted text. Round-tripping through
/// [`credited_persona`] is what makes deduplication work, so the two
/// functions must stay in lockstep.
#[must_use]
pub fn format_comment_body(label_prefix: &str, persona: &str, text: &str) -> String {
    format!("{label_prefix}{PERSONA_MARKER}{persona}\n\n{text}")
}

/// Extracts the persona name from a bot comment body, if it is one.
///
/// A body qualifies only when it starts with exactly
/// `"<labelPrefix> · Persona: "`. The persona name is the remainder of the
/// first line, whitespace-trimmed; blank names are rejected. Human replies
/// and bot comments written under a different prefix yield `None`.
#[must_use]
pub fn credited_persona<'body>(body: &'body str, label_prefix: &str) -> Option<&'body str> {
    let after_prefix = body.strip_prefix(label_prefix)?;
    let after_marker = after_prefix.strip_prefix(PERSONA_MARKER)?;
    let first_line = after_marker.lines().next()?;
    let name = first_line.trim();
    if name.is_empty() { None } else { Some(name) }
}

/// Reads a discussion's existing comments and reports which personas are
/// already credited with a labeled comment.
///
/// Only a single bounded page of comments is read; personas credited beyond
/// that page are invisible to the scan and could be posted again. That bound
/// is a documented limitation, not something this type works around.
pub struct BotCommentScanner<'client, Gateway>
where
    Gateway: DiscussionGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> BotCommentScanner<'client, Gateway>
where
    Gateway: DiscussionGateway,
{
    /// Create a new scanner using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Collect the persona names already credited on the discussion.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures (authentication, network, API) unmodified.
    pub async fn scan(
        &self,
        discussion_id: &DiscussionId,
        label_prefix: &str,
    ) -> Result<BTreeSet<String>, PublishError> {
        let comments = self.client.discussion_comments(discussion_id).await?;

        Ok(comments
            .iter()
            .filter_map(|comment| credited_persona(&comment.body, label_prefix))
            .map(ToOwned::to_owned)
            .collect())
    }
}
