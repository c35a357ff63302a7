use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::pagination::Pagination;

/// Represents a GitHub user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubUser {
  pub login: String,
  pub id: u64,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub html_url: Option<String>,
  /// Every other field GitHub sent
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Represents a GitHub repository as returned by the list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
  pub id: u64,
  pub name: String,
  pub full_name: String,
  #[serde(default)]
  pub private: bool,
  #[serde(default)]
  pub fork: bool,
  pub html_url: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub default_branch: Option<String>,
  #[serde(default)]
  pub stargazers_count: Option<u64>,
  /// Every other field GitHub sent
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// The user that triggered an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventActor {
  pub id: u64,
  pub login: String,
}

/// The repository an event happened in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRepo {
  pub id: u64,
  pub name: String,
}

/// Represents an entry of the GitHub activity event stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
  /// Activity events use string ids, issue events numeric ones
  #[serde(deserialize_with = "string_or_number")]
  pub id: String,
  /// Event kind, e.g. `PushEvent`. Issue events carry `event` instead.
  #[serde(rename = "type", alias = "event", default)]
  pub kind: Option<String>,
  #[serde(default)]
  pub actor: Option<EventActor>,
  #[serde(default)]
  pub repo: Option<EventRepo>,
  #[serde(default)]
  pub public: Option<bool>,
  pub created_at: String,
  #[serde(default)]
  pub payload: Value,
  /// Every other field GitHub sent
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  match Value::deserialize(deserializer)? {
    Value::String(s) => Ok(s),
    Value::Number(n) => Ok(n.to_string()),
    other => Err(serde::de::Error::custom(format!("expected string or number id, got {other}"))),
  }
}

/// One page of a paginated list endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
  pub items: Vec<T>,
  /// `None` when the response was not paginated
  pub pagination: Option<Pagination>,
}

impl<T> Page<T> {
  /// Whether the server reported a following page
  pub fn has_next(&self) -> bool {
    self.pagination.as_ref().is_some_and(|p| p.next.is_some())
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_github_user_deserialization() {
    let json = json!({
        "login": "octocat",
        "id": 1,
        "name": "The Octocat"
    });

    let user: GitHubUser = serde_json::from_value(json).unwrap();

    assert_eq!(user.login, "octocat");
    assert_eq!(user.id, 1);
    assert_eq!(user.name, Some("The Octocat".to_string()));
    assert_eq!(user.html_url, None);
    assert!(user.extra.is_empty());
  }

  #[test]
  fn test_repository_deserialization() {
    let json = json!({
        "id": 1296269,
        "name": "Hello-World",
        "full_name": "octocat/Hello-World",
        "private": false,
        "fork": false,
        "html_url": "https://github.com/octocat/Hello-World",
        "description": "This your first repo!",
        "default_branch": "master",
        "stargazers_count": 80,
        "owner": { "login": "octocat", "id": 1 }
    });

    let repo: Repository = serde_json::from_value(json).unwrap();

    assert_eq!(repo.full_name, "octocat/Hello-World");
    assert_eq!(repo.default_branch.as_deref(), Some("master"));
    assert_eq!(repo.stargazers_count, Some(80));
    assert_eq!(repo.extra["owner"]["login"], "octocat");

    let round_trip = serde_json::to_value(&repo).unwrap();
    assert_eq!(round_trip["owner"]["id"], 1);
    assert_eq!(round_trip["full_name"], "octocat/Hello-World");
  }

  #[test]
  fn test_activity_event_deserialization() {
    let json = json!({
        "id": "22249084947",
        "type": "WatchEvent",
        "actor": { "id": 583231, "login": "octocat" },
        "repo": { "id": 1296269, "name": "octocat/Hello-World" },
        "payload": { "action": "started" },
        "public": true,
        "created_at": "2022-06-09T12:47:28Z"
    });

    let event: Event = serde_json::from_value(json).unwrap();

    assert_eq!(event.kind.as_deref(), Some("WatchEvent"));
    assert_eq!(event.actor.unwrap().login, "octocat");
    assert_eq!(event.payload["action"], "started");
  }

  #[test]
  fn test_issue_event_deserialization() {
    let json = json!({
        "id": 1,
        "event": "closed",
        "actor": { "id": 1, "login": "octocat" },
        "created_at": "2011-04-14T16:00:49Z"
    });

    let event: Event = serde_json::from_value(json).unwrap();

    assert_eq!(event.id, "1");
    assert_eq!(event.kind.as_deref(), Some("closed"));
    assert!(event.repo.is_none());
    assert!(!event.extra.contains_key("event"));
  }

  #[test]
  fn test_page_has_next() {
    let page: Page<u32> = Page {
      items: vec![1, 2],
      pagination: Some(Pagination::parse("<https://api.github.com/events?page=2>; rel=\"next\"")),
    };
    assert!(page.has_next());

    let page: Page<u32> = Page {
      items: vec![],
      pagination: None,
    };
    assert!(!page.has_next());
  }
}
