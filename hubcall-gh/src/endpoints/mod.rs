//! # GitHub API Endpoints
//!
//! Typed wrappers over [`GitHubClient::request`](crate::GitHubClient::request),
//! one module per API area. Each wrapper builds a path, sends it, and turns
//! the response into a model. Status codes are interpreted here and nowhere
//! below.

pub mod events;
pub mod meta;
pub mod pulls;
pub mod starring;
pub mod users;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result, anyhow, bail};
use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::models::Page;
use crate::response::ApiResponse;

/// Percent-encode one caller-supplied path segment.
///
/// `/`, `?` and `#` are escaped so the value cannot leave its segment. Dot
/// segments are rejected outright since URL resolution collapses them even
/// when encoded.
pub(crate) fn path_segment(value: &str) -> Result<String> {
  if value.is_empty() || value == "." || value == ".." {
    bail!("Invalid path segment {value:?}");
  }
  Ok(
    form_urlencoded::byte_serialize(value.as_bytes())
      .collect::<String>()
      .replace('+', "%20"),
  )
}

/// Fail with a readable error unless the response is a 2xx
pub(crate) fn ensure_success(response: &ApiResponse, what: &str) -> Result<()> {
  match response.status() {
    200..=299 => Ok(()),
    401 | 403 => Err(anyhow!(
      "Authentication failed while fetching {what}. Please check your GitHub token.{}",
      message_suffix(response)
    )),
    404 => Err(anyhow!("{what} not found")),
    status => Err(anyhow!("Unexpected error: HTTP {status}{}", message_suffix(response))),
  }
}

/// Check the status and deserialize the body into `T`
pub(crate) fn decode<T: DeserializeOwned>(response: &ApiResponse, what: &str) -> Result<T> {
  ensure_success(response, what)?;
  response
    .json::<T>()
    .with_context(|| format!("Failed to parse {what}"))
}

/// Check the status and deserialize a list body together with its pagination
pub(crate) fn decode_page<T: DeserializeOwned>(response: &ApiResponse, what: &str) -> Result<Page<T>> {
  let items = decode::<Vec<T>>(response, what)?;
  Ok(Page {
    items,
    pagination: response.pagination(),
  })
}

/// Map a 204/404 existence check onto a boolean
pub(crate) fn exists(response: &ApiResponse, what: &str) -> Result<bool> {
  match response.status() {
    204 => Ok(true),
    404 => Ok(false),
    status => {
      ensure_success(response, what)?;
      Err(anyhow!("Unexpected status {status} while checking {what}"))
    }
  }
}

fn message_suffix(response: &ApiResponse) -> String {
  match response.error_message() {
    Some(message) => format!(" GitHub API error: {message}"),
    None => String::new(),
  }
}
