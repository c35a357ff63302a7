use anyhow::{Context, Result};
use tracing::instrument;

use crate::client::GitHubClient;
use crate::endpoints::{exists, path_segment};

impl GitHubClient {
  /// Check whether the authenticated user has starred a repository.
  ///
  /// GitHub answers 204 when starred and 404 when not.
  #[instrument(skip(self), level = "debug")]
  pub async fn is_repository_starred(&self, owner: &str, repo: &str) -> Result<bool> {
    let response = self
      .get(&format!("user/starred/{}/{}", path_segment(owner)?, path_segment(repo)?))
      .await
      .context("Failed to check starred repository")?;
    exists(&response, &format!("star on {owner}/{repo}"))
  }
}
