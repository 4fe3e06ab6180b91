//! Locates an existing discussion for a post title.

use super::error::PublishError;
use super::gateway::DiscussionGateway;
use super::locator::RepositoryTarget;
use super::models::DiscussionRef;

/// Finds the discussion whose title exactly matches a candidate post title.
///
/// The remote search is fuzzy, so results are filtered locally to byte-exact
/// title equality. Only a bounded window of results is inspected; an exact
/// match ranked outside that window goes undetected, which is an accepted
/// limitation. When several exact matches exist the first one wins.
pub struct DiscussionFinder<'client, Gateway>
where
    Gateway: DiscussionGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> DiscussionFinder<'client, Gateway>
where
    Gateway: DiscussionGateway,
{
    /// Create a new finder using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Search for a discussion titled exactly `title`.
    ///
    /// Returns `None` when no exact match is present; absence is an expected
    /// branch of the protocol, not an error.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures (authentication, network, API) unmodified.
    pub async fn find(
        &self,
        target: &RepositoryTarget,
        title: &str,
    ) -> Result<Option<DiscussionRef>, PublishError> {
        let candidates = self.client.search_discussions(target, title).await?;

        Ok(candidates
            .into_iter()
            .find(|candidate| candidate.title == title)
            .map(|candidate| DiscussionRef {
                id: candidate.id,
                url: candidate.url,
            }))
    }
}
