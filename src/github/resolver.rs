//! Resolves repository and category names to GraphQL node ids.

use super::error::PublishError;
use super::gateway::DiscussionGateway;
use super::locator::RepositoryTarget;
use super::models::{CategoryId, RepositoryId};

/// Resolves `(owner, repo, category name)` to the opaque ids GitHub
/// requires for the create-discussion mutation.
///
/// Category names match case-insensitively. A single remote read, no
/// retries.
pub struct CategoryResolver<'client, Gateway>
where
    Gateway: DiscussionGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> CategoryResolver<'client, Gateway>
where
    Gateway: DiscussionGateway,
{
    /// Create a new resolver using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Look up the repository id and the id of the named category.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::CategoryNotFound`] when the repository defines
    /// no category with the given name; the error lists the names that do
    /// exist so an operator can correct the configuration. Gateway failures
    /// (authentication, network, API) propagate unmodified.
    pub async fn resolve(
        &self,
        target: &RepositoryTarget,
        category_name: &str,
    ) -> Result<(RepositoryId, CategoryId), PublishError> {
        let info = self.client.repository_discussion_info(target).await?;

        let matched = info
            .categories
            .iter()
            .find(|category| category.name.eq_ignore_ascii_case(category_name));

        match matched {
            Some(category) => Ok((info.repository_id, category.id.clone())),
            None => Err(PublishError::CategoryNotFound {
                owner: target.owner().as_str().to_owned(),
                repository: target.repository().as_str().to_owned(),
                category: category_name.to_owned(),
                available: info
                    .categories
                    .into_iter()
                    .map(|category| category.name)
                    .collect(),
            }),
        }
    }
}
