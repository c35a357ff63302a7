//! # Endpoint Requests
//!
//! The description of a single call to the GitHub API: method, relative path
//! (which may already carry a query string), extra headers, an optional raw
//! body, optional pagination parameters and an optional timeout. A request
//! is built fresh for every call and consumed by
//! [`GitHubClient::request`](crate::GitHubClient::request).

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{PAGE_PARAM, PER_PAGE_PARAM};
use crate::query::QueryBuilder;

/// HTTP methods used by the GitHub REST API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
  #[default]
  Get,
  Post,
  Patch,
  Put,
  Delete,
}

impl HttpMethod {
  pub const fn as_str(self) -> &'static str {
    match self {
      HttpMethod::Get => "GET",
      HttpMethod::Post => "POST",
      HttpMethod::Patch => "PATCH",
      HttpMethod::Put => "PUT",
      HttpMethod::Delete => "DELETE",
    }
  }
}

impl fmt::Display for HttpMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Returned when a string is not one of the supported methods
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unsupported HTTP method '{0}', expected one of GET, POST, PATCH, PUT, DELETE")]
pub struct ParseMethodError(String);

impl FromStr for HttpMethod {
  type Err = ParseMethodError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_uppercase().as_str() {
      "GET" => Ok(HttpMethod::Get),
      "POST" => Ok(HttpMethod::Post),
      "PATCH" => Ok(HttpMethod::Patch),
      "PUT" => Ok(HttpMethod::Put),
      "DELETE" => Ok(HttpMethod::Delete),
      _ => Err(ParseMethodError(s.to_string())),
    }
  }
}

impl From<HttpMethod> for reqwest::Method {
  fn from(method: HttpMethod) -> Self {
    match method {
      HttpMethod::Get => reqwest::Method::GET,
      HttpMethod::Post => reqwest::Method::POST,
      HttpMethod::Patch => reqwest::Method::PATCH,
      HttpMethod::Put => reqwest::Method::PUT,
      HttpMethod::Delete => reqwest::Method::DELETE,
    }
  }
}

/// A single request against the GitHub API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRequest {
  path: String,
  method: HttpMethod,
  headers: Vec<(String, String)>,
  body: Option<Vec<u8>>,
  page: Option<NonZeroU32>,
  per_page: Option<NonZeroU32>,
  timeout: Option<Duration>,
}

impl EndpointRequest {
  /// Create a request for `path` with the given method
  pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      method,
      headers: Vec::new(),
      body: None,
      page: None,
      per_page: None,
      timeout: None,
    }
  }

  pub fn get(path: impl Into<String>) -> Self {
    Self::new(HttpMethod::Get, path)
  }

  pub fn post(path: impl Into<String>) -> Self {
    Self::new(HttpMethod::Post, path)
  }

  pub fn patch(path: impl Into<String>) -> Self {
    Self::new(HttpMethod::Patch, path)
  }

  pub fn put(path: impl Into<String>) -> Self {
    Self::new(HttpMethod::Put, path)
  }

  pub fn delete(path: impl Into<String>) -> Self {
    Self::new(HttpMethod::Delete, path)
  }

  /// Add a header. Caller headers override the client defaults.
  pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.headers.push((name.into(), value.into()));
    self
  }

  /// Attach a raw body. It is sent exactly as given.
  pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
    self.body = Some(body.into());
    self
  }

  /// Serialize `payload` to JSON and attach it as the body, setting
  /// `Content-Type` unless the caller already did.
  pub fn json<T: Serialize + ?Sized>(self, payload: &T) -> Result<Self, serde_json::Error> {
    let body = serde_json::to_vec(payload)?;
    let request = if self.has_header("content-type") {
      self
    } else {
      self.header("Content-Type", "application/json")
    };
    Ok(request.body(body))
  }

  /// Request a specific page
  pub fn page(mut self, page: NonZeroU32) -> Self {
    self.page = Some(page);
    self
  }

  /// Request a specific page, if any
  pub fn page_opt(mut self, page: Option<NonZeroU32>) -> Self {
    self.page = page;
    self
  }

  /// Request a page size
  pub fn per_page(mut self, per_page: NonZeroU32) -> Self {
    self.per_page = Some(per_page);
    self
  }

  /// Request a page size, if any
  pub fn per_page_opt(mut self, per_page: Option<NonZeroU32>) -> Self {
    self.per_page = per_page;
    self
  }

  /// Bound this request by `timeout`, overriding the client-wide timeout
  pub fn timeout(mut self, timeout: Duration) -> Self {
    self.timeout = Some(timeout);
    self
  }

  pub fn path(&self) -> &str {
    &self.path
  }

  pub fn method(&self) -> HttpMethod {
    self.method
  }

  pub fn headers(&self) -> &[(String, String)] {
    &self.headers
  }

  pub fn body_bytes(&self) -> Option<&[u8]> {
    self.body.as_deref()
  }

  /// The timeout set for this request only
  pub fn timeout_override(&self) -> Option<Duration> {
    self.timeout
  }

  /// The outbound path with `page` and then `per_page` appended
  pub fn target(&self) -> String {
    QueryBuilder::new(self.path.as_str())
      .param_opt(PAGE_PARAM, self.page)
      .param_opt(PER_PAGE_PARAM, self.per_page)
      .finish()
  }

  fn has_header(&self, name: &str) -> bool {
    self.headers.iter().any(|(key, _)| key.eq_ignore_ascii_case(name))
  }
}
