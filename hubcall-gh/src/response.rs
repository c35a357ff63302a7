//! # Endpoint Responses
//!
//! The normalized result of one request: status code, response headers and
//! the JSON-decoded body. Non-2xx statuses are ordinary responses; callers
//! branch on [`ApiResponse::status`].

use std::collections::BTreeMap;

use reqwest::header::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::pagination::Pagination;

/// Response headers keyed by lowercased name, each with every value the
/// server sent in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResponseHeaders(BTreeMap<String, Vec<String>>);

impl ResponseHeaders {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a value, keeping any earlier values for the same name
  pub fn append(&mut self, name: &str, value: impl Into<String>) {
    self.0.entry(name.to_ascii_lowercase()).or_default().push(value.into());
  }

  /// Every value of a header, matched case-insensitively
  pub fn get_all(&self, name: &str) -> &[String] {
    self
      .0
      .get(&name.to_ascii_lowercase())
      .map(Vec::as_slice)
      .unwrap_or_default()
  }

  /// The first value of a header
  pub fn get(&self, name: &str) -> Option<&str> {
    self.get_all(name).first().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
    self.0.iter().map(|(name, values)| (name.as_str(), values.as_slice()))
  }
}

impl From<&HeaderMap> for ResponseHeaders {
  fn from(map: &HeaderMap) -> Self {
    let mut headers = ResponseHeaders::new();
    for (name, value) in map {
      headers.append(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
    }
    headers
  }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for ResponseHeaders {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut headers = ResponseHeaders::new();
    for (name, value) in iter {
      headers.append(name.as_ref(), value);
    }
    headers
  }
}

/// The result of a request: status, headers and decoded JSON body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
  status: u16,
  headers: ResponseHeaders,
  body: Value,
}

impl ApiResponse {
  pub fn new(status: u16, headers: ResponseHeaders, body: Value) -> Self {
    Self { status, headers, body }
  }

  /// Build a response from the raw body bytes. Empty or invalid JSON decodes
  /// to `null`.
  pub fn from_raw(status: u16, headers: ResponseHeaders, raw_body: &[u8]) -> Self {
    Self::new(status, headers, decode_body(raw_body))
  }

  pub fn status(&self) -> u16 {
    self.status
  }

  pub fn headers(&self) -> &ResponseHeaders {
    &self.headers
  }

  pub fn body(&self) -> &Value {
    &self.body
  }

  /// Whether the status is in the 2xx range
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }

  /// Pagination links from the `Link` header, if the server sent any
  pub fn pagination(&self) -> Option<Pagination> {
    Pagination::from_headers(&self.headers)
  }

  /// Deserialize the body into `T`
  pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
    T::deserialize(&self.body)
  }

  /// The `message` field GitHub puts in error bodies
  pub fn error_message(&self) -> Option<&str> {
    self.body.get("message").and_then(Value::as_str)
  }

  pub fn into_parts(self) -> (u16, ResponseHeaders, Value) {
    (self.status, self.headers, self.body)
  }
}

fn decode_body(raw: &[u8]) -> Value {
  if raw.iter().all(u8::is_ascii_whitespace) {
    return Value::Null;
  }
  match serde_json::from_slice(raw) {
    Ok(value) => value,
    Err(e) => {
      debug!(error = %e, bytes = raw.len(), "Response body is not valid JSON");
      Value::Null
    }
  }
}
