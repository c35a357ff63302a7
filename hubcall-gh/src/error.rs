//! Errors raised by the request executor.
//!
//! Only failures to produce a response are errors here. A response with a
//! 4xx or 5xx status is a successful [`ApiResponse`](crate::ApiResponse)
//! carrying that status.

use thiserror::Error;

/// Errors that can occur while executing a request
#[derive(Debug, Error)]
pub enum RequestError {
  #[error("Invalid request URL '{url}': {source}")]
  InvalidUrl {
    url: String,
    #[source]
    source: url::ParseError,
  },

  #[error("Invalid header '{name}': {reason}")]
  InvalidHeader { name: String, reason: String },

  #[error("Failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("{method} {url} failed: {source}")]
  Transport {
    method: String,
    url: String,
    #[source]
    source: reqwest::Error,
  },
}

impl RequestError {
  /// Whether the request timed out
  pub fn is_timeout(&self) -> bool {
    matches!(self, RequestError::Transport { source, .. } if source.is_timeout())
  }

  /// Whether the connection could not be established
  pub fn is_connect(&self) -> bool {
    matches!(self, RequestError::Transport { source, .. } if source.is_connect())
  }
}
