use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A `hubcall` invocation isolated from the caller's environment
fn hubcall(config_path: &Path) -> Command {
  let mut cmd = cargo_bin_cmd!("hubcall");
  cmd
    .env("HUBCALL_CONFIG", config_path)
    .env_remove("HUBCALL_TOKEN")
    .env_remove("GITHUB_TOKEN")
    .env_remove("HUBCALL_USER_AGENT")
    .env_remove("HUBCALL_BASE_URL")
    .env_remove("HUBCALL_TIMEOUT_SECS")
    .env_remove("RUST_LOG")
    .args(["--colors", "never"]);
  cmd
}

#[test]
fn help_lists_subcommands() {
  let temp = TempDir::new().unwrap();

  hubcall(&temp.path().join("config.toml"))
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("request"))
    .stdout(predicate::str::contains("cmd"))
    .stdout(predicate::str::contains("commands"))
    .stdout(predicate::str::contains("config"));
}

#[test]
fn commands_lists_registry() {
  let temp = TempDir::new().unwrap();

  hubcall(&temp.path().join("config.toml"))
    .arg("commands")
    .assert()
    .success()
    .stdout(predicate::str::contains("user-repos <username> [page]"))
    .stdout(predicate::str::contains("getUserRepos"))
    .stdout(predicate::str::contains("is-merged <owner> <repo> <number>"));
}

#[test]
fn unknown_command_is_rejected() {
  let temp = TempDir::new().unwrap();

  hubcall(&temp.path().join("config.toml"))
    .args(["cmd", "deleteEverything"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Unknown command 'deleteEverything'"));
}

#[test]
fn bad_command_arguments_show_usage() {
  let temp = TempDir::new().unwrap();

  hubcall(&temp.path().join("config.toml"))
    .args(["cmd", "events", "zero"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Usage: events [page]"));
}

#[test]
fn config_path_prefers_flag() {
  let temp = TempDir::new().unwrap();
  let explicit = temp.path().join("explicit.toml");

  hubcall(&temp.path().join("config.toml"))
    .arg("--config")
    .arg(&explicit)
    .args(["config", "path"])
    .assert()
    .success()
    .stdout(predicate::str::contains("explicit.toml"));
}

#[test]
fn config_init_then_show_masks_token() {
  let temp = TempDir::new().unwrap();
  let config_path = temp.path().join("nested").join("config.toml");

  hubcall(&config_path)
    .args(["config", "init", "--user-agent", "octocat"])
    .assert()
    .success();
  assert!(config_path.exists());

  // A second init refuses to overwrite
  hubcall(&config_path)
    .args(["config", "init"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--force"));

  hubcall(&config_path)
    .env("HUBCALL_TOKEN", "ghp_supersecret1234")
    .args(["config", "show"])
    .assert()
    .success()
    .stdout(predicate::str::contains("User-Agent: octocat"))
    .stdout(predicate::str::contains("****1234"))
    .stdout(predicate::str::contains("supersecret").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn request_prints_body_and_pagination() {
  let mock_server = MockServer::start().await;
  let temp = TempDir::new().unwrap();
  let next = format!("{}/users/octocat/repos?page=3", mock_server.uri());

  Mock::given(method("GET"))
    .and(path("/users/octocat/repos"))
    .and(query_param("page", "2"))
    .and(header("user-agent", "laravel-github"))
    .respond_with(
      ResponseTemplate::new(200)
        .insert_header("Link", format!("<{next}>; rel=\"next\"").as_str())
        .set_body_json(json!([{ "id": 1, "name": "Hello-World" }])),
    )
    .mount(&mock_server)
    .await;

  hubcall(&temp.path().join("config.toml"))
    .env("HUBCALL_BASE_URL", mock_server.uri())
    .args(["request", "users/octocat/repos", "--page", "2", "--include"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"name\": \"Hello-World\""))
    .stderr(predicate::str::contains("200"))
    .stderr(predicate::str::contains("link: "))
    .stderr(predicate::str::contains("next  page 3"));
}

#[tokio::test(flavor = "multi_thread")]
async fn request_error_status_is_not_a_failure() {
  let mock_server = MockServer::start().await;
  let temp = TempDir::new().unwrap();

  Mock::given(method("GET"))
    .and(path("/repos/o/missing"))
    .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
    .mount(&mock_server)
    .await;

  hubcall(&temp.path().join("config.toml"))
    .env("HUBCALL_BASE_URL", mock_server.uri())
    .args(["request", "repos/o/missing"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"message\": \"Not Found\""))
    .stderr(predicate::str::contains("GitHub answered 404: Not Found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn cmd_sends_token_and_prints_json() {
  let mock_server = MockServer::start().await;
  let temp = TempDir::new().unwrap();

  Mock::given(method("GET"))
    .and(path("/user/starred/octocat/Hello-World"))
    .and(header("authorization", "token ghp_test"))
    .respond_with(ResponseTemplate::new(204))
    .mount(&mock_server)
    .await;

  hubcall(&temp.path().join("config.toml"))
    .env("HUBCALL_BASE_URL", mock_server.uri())
    .env("GITHUB_TOKEN", "ghp_test")
    .args(["cmd", "isRepositoryStarred", "octocat", "Hello-World"])
    .assert()
    .success()
    .stdout(predicate::str::diff("true\n"));
}

#[test]
fn connection_failure_is_an_error() {
  let temp = TempDir::new().unwrap();

  hubcall(&temp.path().join("config.toml"))
    .env("HUBCALL_BASE_URL", "http://127.0.0.1:1")
    .args(["request", "user"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("GET http://127.0.0.1:1/user failed"));
}
