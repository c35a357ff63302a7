use anyhow::{Context, Result};
use tracing::instrument;

use crate::client::GitHubClient;
use crate::endpoints::{exists, path_segment};

impl GitHubClient {
  /// Check whether a pull request has been merged.
  ///
  /// GitHub answers 204 when merged and 404 when not.
  #[instrument(skip(self), level = "debug")]
  pub async fn is_pull_request_merged(&self, owner: &str, repo: &str, pr_number: u64) -> Result<bool> {
    let response = self
      .get(&format!(
        "repos/{}/{}/pulls/{pr_number}/merge",
        path_segment(owner)?,
        path_segment(repo)?
      ))
      .await
      .with_context(|| format!("Failed to check merge status of pull request #{pr_number}"))?;
    exists(&response, &format!("merge status of pull request #{pr_number}"))
  }
}
