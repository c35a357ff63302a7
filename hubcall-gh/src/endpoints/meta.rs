use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::client::GitHubClient;
use crate::endpoints::decode;

impl GitHubClient {
  /// Get the hypermedia index of the API root, mapping names such as
  /// `current_user_url` to URL templates
  #[instrument(skip(self), level = "debug")]
  pub async fn get_api_endpoints(&self) -> Result<Map<String, Value>> {
    let response = self.get("/").await.context("Failed to fetch API root")?;
    decode(&response, "API root")
  }
}
