//! Endpoint tests against a wiremock GitHub.


use hubcall_core::ClientConfig;
use wiremock::MockServer;

use crate::client::GitHubClient;

/// A client with a token pointed at the mock server
fn test_client(server: &MockServer) -> GitHubClient {
  let config = ClientConfig::default()
    .with_token("test_token")
    .with_base_url(server.uri());
  GitHubClient::new(&config).expect("Failed to create test client")
}
