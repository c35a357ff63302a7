//! # GitHub Activity Events
//!
//! Wrappers for the event stream endpoints. All of them are paginated; the
//! returned [`Page`] carries the `Link` relations so callers can walk on.

use std::num::NonZeroU32;

use anyhow::{Context, Result};
use tracing::instrument;

use crate::client::GitHubClient;
use crate::endpoints::{decode_page, path_segment};
use crate::models::{Event, Page};
use crate::request::EndpointRequest;

impl GitHubClient {
  async fn get_event_page(&self, path: String, page: Option<NonZeroU32>, what: &str) -> Result<Page<Event>> {
    let response = self
      .request(EndpointRequest::get(path).page_opt(page))
      .await
      .with_context(|| format!("Failed to fetch {what}"))?;
    decode_page(&response, what)
  }

  /// List public events
  #[instrument(skip(self), level = "debug")]
  pub async fn get_events(&self, page: Option<NonZeroU32>) -> Result<Page<Event>> {
    self.get_event_page("events".to_string(), page, "public events").await
  }

  /// List repository events
  #[instrument(skip(self), level = "debug")]
  pub async fn get_repository_events(
    &self,
    owner: &str,
    repo: &str,
    page: Option<NonZeroU32>,
  ) -> Result<Page<Event>> {
    let path = format!("repos/{}/{}/events", path_segment(owner)?, path_segment(repo)?);
    self.get_event_page(path, page, "repository events").await
  }

  /// List issue events for a repository
  #[instrument(skip(self), level = "debug")]
  pub async fn get_repository_issue_events(
    &self,
    owner: &str,
    repo: &str,
    page: Option<NonZeroU32>,
  ) -> Result<Page<Event>> {
    let path = format!("repos/{}/{}/issues/events", path_segment(owner)?, path_segment(repo)?);
    self.get_event_page(path, page, "issue events").await
  }

  /// List public events for a network of repositories
  #[instrument(skip(self), level = "debug")]
  pub async fn get_network_events(&self, owner: &str, repo: &str, page: Option<NonZeroU32>) -> Result<Page<Event>> {
    let path = format!("networks/{}/{}/events", path_segment(owner)?, path_segment(repo)?);
    self.get_event_page(path, page, "network events").await
  }

  /// List public events for an organization
  #[instrument(skip(self), level = "debug")]
  pub async fn get_organization_events(&self, org: &str, page: Option<NonZeroU32>) -> Result<Page<Event>> {
    let path = format!("orgs/{}/events", path_segment(org)?);
    self.get_event_page(path, page, "organization events").await
  }

  /// List events a user has received by watching repositories and following
  /// users. Private events are included when authenticated as that user.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_received_events(&self, username: &str, page: Option<NonZeroU32>) -> Result<Page<Event>> {
    let path = format!("users/{}/received_events", path_segment(username)?);
    self.get_event_page(path, page, "received events").await
  }

  /// List public events a user has received
  #[instrument(skip(self), level = "debug")]
  pub async fn get_received_public_events(&self, username: &str, page: Option<NonZeroU32>) -> Result<Page<Event>> {
    let path = format!("users/{}/received_events/public", path_segment(username)?);
    self.get_event_page(path, page, "public received events").await
  }
}
