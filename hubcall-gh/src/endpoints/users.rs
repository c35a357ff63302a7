use std::num::NonZeroU32;

use anyhow::{Context, Result};
use tracing::instrument;

use crate::client::GitHubClient;
use crate::endpoints::{decode, decode_page, path_segment};
use crate::models::{GitHubUser, Page, Repository};
use crate::request::EndpointRequest;

impl GitHubClient {
  /// Get the current authenticated user
  #[instrument(skip(self), level = "debug")]
  pub async fn get_current_user(&self) -> Result<GitHubUser> {
    let response = self.get("user").await.context("Failed to fetch GitHub user")?;
    decode(&response, "current user")
  }

  /// Get a user by login
  #[instrument(skip(self), level = "debug")]
  pub async fn get_user(&self, username: &str) -> Result<GitHubUser> {
    let response = self
      .get(&format!("users/{}", path_segment(username)?))
      .await
      .with_context(|| format!("Failed to fetch user {username}"))?;
    decode(&response, &format!("User {username}"))
  }

  /// List public repositories of a user
  #[instrument(skip(self), level = "debug")]
  pub async fn get_user_repos(&self, username: &str, page: Option<NonZeroU32>) -> Result<Page<Repository>> {
    let request = EndpointRequest::get(format!("users/{}/repos", path_segment(username)?)).page_opt(page);
    let response = self
      .request(request)
      .await
      .with_context(|| format!("Failed to fetch repositories of {username}"))?;
    decode_page(&response, &format!("Repositories of {username}"))
  }
}
