//! # GitHub HTTP Client
//!
//! The request executor every endpoint goes through. It resolves the request
//! path against the API root, merges the fixed `Accept`, `User-Agent` and
//! `Authorization` headers with the caller's, sends the raw body, and returns
//! status, headers and decoded JSON. Transport failures are errors; HTTP
//! error statuses are not.

use anyhow::{Context, Result};
use hubcall_core::ClientConfig;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use tracing::{debug, instrument, trace};
use url::Url;

use crate::consts::{self, TOKEN_SCHEME};
use crate::error::RequestError;
use crate::request::EndpointRequest;
use crate::response::{ApiResponse, ResponseHeaders};

/// Represents a GitHub API client
#[derive(Debug, Clone)]
pub struct GitHubClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) default_headers: HeaderMap,
}

impl GitHubClient {
  /// Create a new GitHub client from a configuration
  pub fn new(config: &ClientConfig) -> Result<Self, RequestError> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout() {
      builder = builder.timeout(timeout);
    }
    let client = builder.build().map_err(RequestError::Client)?;

    Ok(Self {
      client,
      base_url: config.base_url().trim_end_matches('/').to_string(),
      default_headers: default_headers(config)?,
    })
  }

  /// The API root requests are resolved against
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Execute a single request.
  ///
  /// A 4xx/5xx response is returned as an ordinary [`ApiResponse`]. Only
  /// failures to get a response at all (connection, DNS, TLS, timeout) are
  /// errors. Dropping the returned future cancels the request.
  #[instrument(skip(self, request), fields(method = %request.method(), target = %request.target()), level = "debug")]
  pub async fn request(&self, request: EndpointRequest) -> Result<ApiResponse, RequestError> {
    let url = self.resolve_url(&request.target())?;
    let headers = self.merge_headers(request.headers())?;
    let method = request.method();

    debug!(%url, "Sending GitHub API request");

    let mut builder = self.client.request(method.into(), url.clone()).headers(headers);
    if let Some(body) = request.body_bytes() {
      builder = builder.body(body.to_vec());
    }
    if let Some(timeout) = request.timeout_override() {
      builder = builder.timeout(timeout);
    }

    let transport_error = |source| RequestError::Transport {
      method: method.to_string(),
      url: url.to_string(),
      source,
    };

    let response = builder.send().await.map_err(transport_error)?;
    let status = response.status().as_u16();
    let headers = ResponseHeaders::from(response.headers());
    let raw_body = response.bytes().await.map_err(transport_error)?;

    trace!(status, headers = headers.len(), bytes = raw_body.len(), "Received GitHub API response");

    Ok(ApiResponse::from_raw(status, headers, &raw_body))
  }

  /// Execute a plain GET request
  pub async fn get(&self, path: &str) -> Result<ApiResponse, RequestError> {
    self.request(EndpointRequest::get(path)).await
  }

  /// Resolve a path (optionally with query) against the API root. Absolute
  /// `http(s)://` URLs, such as pagination links, are used as they are.
  pub fn resolve_url(&self, target: &str) -> Result<Url, RequestError> {
    let invalid = |source| RequestError::InvalidUrl {
      url: target.to_string(),
      source,
    };

    if target.starts_with("https://") || target.starts_with("http://") {
      return Url::parse(target).map_err(invalid);
    }

    let base = Url::parse(&format!("{}/", self.base_url)).map_err(invalid)?;
    base.join(target.trim_start_matches('/')).map_err(invalid)
  }

  /// The client defaults overlaid with caller headers. A caller header
  /// replaces the default of the same name; repeated caller headers are all
  /// sent.
  fn merge_headers(&self, extra: &[(String, String)]) -> Result<HeaderMap, RequestError> {
    let mut headers = self.default_headers.clone();
    let mut overridden: Vec<HeaderName> = Vec::new();

    for (name, value) in extra {
      let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| RequestError::InvalidHeader {
        name: name.clone(),
        reason: e.to_string(),
      })?;
      let header_value = HeaderValue::from_str(value).map_err(|e| RequestError::InvalidHeader {
        name: name.clone(),
        reason: e.to_string(),
      })?;

      if overridden.contains(&header_name) {
        headers.append(header_name, header_value);
      } else {
        headers.insert(header_name.clone(), header_value);
        overridden.push(header_name);
      }
    }

    Ok(headers)
  }
}

fn default_headers(config: &ClientConfig) -> Result<HeaderMap, RequestError> {
  let mut headers = HeaderMap::new();
  headers.insert(ACCEPT, HeaderValue::from_static(consts::ACCEPT));

  let user_agent = HeaderValue::from_str(config.user_agent()).map_err(|e| RequestError::InvalidHeader {
    name: USER_AGENT.to_string(),
    reason: e.to_string(),
  })?;
  headers.insert(USER_AGENT, user_agent);

  if let Some(token) = config.token() {
    let mut authorization =
      HeaderValue::from_str(&format!("{TOKEN_SCHEME} {token}")).map_err(|e| RequestError::InvalidHeader {
        name: AUTHORIZATION.to_string(),
        reason: e.to_string(),
      })?;
    authorization.set_sensitive(true);
    headers.insert(AUTHORIZATION, authorization);
  }

  Ok(headers)
}

/// Create a GitHub client from a configuration
pub fn create_github_client(config: &ClientConfig) -> Result<GitHubClient> {
  GitHubClient::new(config).context("Failed to create GitHub client")
}

#[cfg(test)]
mod tests {
  use std::num::NonZeroU32;
  use std::time::Duration;

  use serde_json::json;
  use wiremock::matchers::{body_string, header, method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  fn client_for(server: &MockServer, config: ClientConfig) -> GitHubClient {
    GitHubClient::new(&config.with_base_url(server.uri())).unwrap()
  }

  fn nz(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
  }

  #[test]
  fn test_github_client_creation() {
    let client = GitHubClient::new(&ClientConfig::default()).unwrap();

    assert_eq!(client.base_url(), "https://api.github.com");
    assert_eq!(client.default_headers[ACCEPT], "application/vnd.github.v3+json");
    assert_eq!(client.default_headers[USER_AGENT], "laravel-github");
    assert!(!client.default_headers.contains_key(AUTHORIZATION));
  }

  #[test]
  fn test_token_sets_authorization() {
    let client = GitHubClient::new(&ClientConfig::default().with_token("abc123")).unwrap();

    assert_eq!(client.default_headers[AUTHORIZATION], "token abc123");
    assert!(client.default_headers[AUTHORIZATION].is_sensitive());
  }

  #[test]
  fn test_resolve_url() {
    let client = GitHubClient::new(&ClientConfig::default()).unwrap();

    assert_eq!(
      client.resolve_url("users/octocat/repos").unwrap().as_str(),
      "https://api.github.com/users/octocat/repos"
    );
    assert_eq!(
      client.resolve_url("/repos/o/r/issues?page=2&per_page=50").unwrap().as_str(),
      "https://api.github.com/repos/o/r/issues?page=2&per_page=50"
    );
    assert_eq!(client.resolve_url("/").unwrap().as_str(), "https://api.github.com/");
    assert_eq!(
      client.resolve_url("https://example.com/events?page=3").unwrap().as_str(),
      "https://example.com/events?page=3"
    );
  }

  #[test]
  fn test_resolve_url_keeps_enterprise_prefix() {
    let config = ClientConfig::default().with_base_url("https://ghe.example.com/api/v3/");
    let client = GitHubClient::new(&config).unwrap();

    assert_eq!(
      client.resolve_url("user").unwrap().as_str(),
      "https://ghe.example.com/api/v3/user"
    );
  }

  #[tokio::test]
  async fn test_request_returns_status_headers_and_body() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server, ClientConfig::default());

    Mock::given(method("GET"))
      .and(path("/users/octocat/repos"))
      .and(header("Accept", "application/vnd.github.v3+json"))
      .and(header("User-Agent", "laravel-github"))
      .respond_with(
        ResponseTemplate::new(200)
          .insert_header("X-RateLimit-Remaining", "59")
          .set_body_json(json!([{ "id": 1 }])),
      )
      .mount(&mock_server)
      .await;

    let response = client.request(EndpointRequest::get("users/octocat/repos")).await?;

    assert_eq!(response.status(), 200);
    assert_eq!(response.body(), &json!([{ "id": 1 }]));
    assert_eq!(response.headers().get("x-ratelimit-remaining"), Some("59"));
    assert_eq!(response.pagination(), None);

    Ok(())
  }

  #[tokio::test]
  async fn test_request_sends_token() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let config = ClientConfig::default().with_token("test_token").with_user_agent("octocat");
    let client = client_for(&mock_server, config);

    Mock::given(method("GET"))
      .and(path("/user"))
      .and(header("Authorization", "token test_token"))
      .and(header("User-Agent", "octocat"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login": "octocat", "id": 1 })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let response = client.get("user").await?;
    assert_eq!(response.status(), 200);

    Ok(())
  }

  #[tokio::test]
  async fn test_request_omits_authorization_without_token() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server, ClientConfig::default().with_token(""));

    Mock::given(method("GET"))
      .and(path("/events"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
      .mount(&mock_server)
      .await;

    client.get("events").await?;

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());

    Ok(())
  }

  #[tokio::test]
  async fn test_request_appends_pagination_params() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server, ClientConfig::default());

    Mock::given(method("GET"))
      .and(path("/repos/o/r/issues"))
      .and(query_param("page", "2"))
      .and(query_param("per_page", "50"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
      .mount(&mock_server)
      .await;

    let request = EndpointRequest::get("repos/o/r/issues").page(nz(2)).per_page(nz(50));
    assert_eq!(request.target(), "repos/o/r/issues?page=2&per_page=50");

    let response = client.request(request).await?;
    assert_eq!(response.status(), 200);

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests[0].url.query(), Some("page=2&per_page=50"));

    Ok(())
  }

  #[tokio::test]
  async fn test_error_status_is_not_an_error() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server, ClientConfig::default());

    Mock::given(method("GET"))
      .and(path("/repos/o/missing"))
      .respond_with(ResponseTemplate::new(404).set_body_json(json!({
          "message": "Not Found",
          "documentation_url": "https://docs.github.com/rest"
      })))
      .mount(&mock_server)
      .await;

    let response = client.get("repos/o/missing").await?;

    assert_eq!(response.status(), 404);
    assert!(!response.is_success());
    assert_eq!(response.error_message(), Some("Not Found"));

    Ok(())
  }

  #[tokio::test]
  async fn test_non_json_body_decodes_to_null() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server, ClientConfig::default());

    Mock::given(method("GET"))
      .and(path("/zen"))
      .respond_with(ResponseTemplate::new(200).set_body_string("Keep it logically awesome."))
      .mount(&mock_server)
      .await;

    let response = client.get("zen").await?;

    assert_eq!(response.status(), 200);
    assert!(response.body().is_null());

    Ok(())
  }

  #[tokio::test]
  async fn test_caller_headers_override_defaults_and_body_is_raw() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server, ClientConfig::default());

    Mock::given(method("PATCH"))
      .and(path("/repos/o/r"))
      .and(header("Accept", "application/vnd.github.mercy-preview+json"))
      .and(body_string(r#"{"description":"updated"}"#))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 9 })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let request = EndpointRequest::patch("repos/o/r")
      .header("Accept", "application/vnd.github.mercy-preview+json")
      .body(r#"{"description":"updated"}"#);
    let response = client.request(request).await?;

    assert_eq!(response.body()["id"], 9);

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests[0].headers.get_all("accept").iter().count(), 1);

    Ok(())
  }

  #[tokio::test]
  async fn test_absolute_url_bypasses_base() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let config = ClientConfig::default().with_base_url("http://127.0.0.1:1");
    let client = GitHubClient::new(&config)?;

    Mock::given(method("GET"))
      .and(path("/events"))
      .and(query_param("page", "3"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
      .mount(&mock_server)
      .await;

    let response = client.get(&format!("{}/events?page=3", mock_server.uri())).await?;
    assert_eq!(response.status(), 200);

    Ok(())
  }

  #[tokio::test]
  async fn test_connection_failure_is_an_error() {
    let config = ClientConfig::default().with_base_url("http://127.0.0.1:1");
    let client = GitHubClient::new(&config).unwrap();

    let result = client.get("users/octocat/repos").await;

    let error = result.unwrap_err();
    assert!(error.is_connect());
    assert!(error.to_string().contains("GET http://127.0.0.1:1/users/octocat/repos"));
  }

  #[tokio::test]
  async fn test_timeout_is_an_error() {
    let mock_server = MockServer::start().await;
    let config = ClientConfig::default().with_timeout(Duration::from_secs(1));
    let client = client_for(&mock_server, config);

    Mock::given(method("GET"))
      .and(path("/events"))
      .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
      .mount(&mock_server)
      .await;

    let error = client.get("events").await.unwrap_err();
    assert!(error.is_timeout());
  }

  #[tokio::test]
  async fn test_request_timeout_overrides_client() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server, ClientConfig::default());

    Mock::given(method("GET"))
      .and(path("/events"))
      .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
      .mount(&mock_server)
      .await;
    Mock::given(method("GET"))
      .and(path("/zen"))
      .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
      .mount(&mock_server)
      .await;

    let request = EndpointRequest::get("events").timeout(Duration::from_millis(500));
    let error = client.request(request).await.unwrap_err();
    assert!(error.is_timeout());

    // The next request on the same client is not bounded by it
    let response = client.get("zen").await?;
    assert_eq!(response.status(), 200);

    Ok(())
  }

  #[tokio::test]
  async fn test_invalid_header_is_rejected_before_sending() {
    let client = GitHubClient::new(&ClientConfig::default()).unwrap();

    let result = client
      .request(EndpointRequest::get("user").header("bad header", "value"))
      .await;

    assert!(matches!(result, Err(RequestError::InvalidHeader { .. })));
  }
}
