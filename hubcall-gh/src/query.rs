//! # Query String Builder
//!
//! Appends query parameters to a path that may already carry a query string.
//! The first parameter is joined with `?` and every later one with `&`.
//! Existing parameters are left untouched and are never re-ordered or
//! re-encoded.

use std::fmt::Display;

/// Appends `key=value` pairs to a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
  target: String,
}

impl QueryBuilder {
  /// Start from a path, with or without a query string
  pub fn new(path: impl Into<String>) -> Self {
    Self { target: path.into() }
  }

  /// Append a parameter
  pub fn param(mut self, key: &str, value: impl Display) -> Self {
    let separator = if self.target.contains('?') { '&' } else { '?' };
    self.target.push(separator);
    self.target.push_str(key);
    self.target.push('=');
    self.target.push_str(&value.to_string());
    self
  }

  /// Append a parameter only when a value is present
  pub fn param_opt(self, key: &str, value: Option<impl Display>) -> Self {
    match value {
      Some(value) => self.param(key, value),
      None => self,
    }
  }

  /// The path with all parameters appended
  pub fn finish(self) -> String {
    self.target
  }
}

/// Append a single parameter to `path`
pub fn append_param(path: &str, key: &str, value: impl Display) -> String {
  QueryBuilder::new(path).param(key, value).finish()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_first_param_uses_question_mark() {
    assert_eq!(append_param("events", "page", 2), "events?page=2");
  }

  #[test]
  fn test_existing_query_uses_ampersand() {
    assert_eq!(
      append_param("repos/o/r/pulls?state=all", "page", 3),
      "repos/o/r/pulls?state=all&page=3"
    );
  }

  #[test]
  fn test_params_keep_insertion_order() {
    let target = QueryBuilder::new("repos/o/r/issues")
      .param("page", 2)
      .param("per_page", 50)
      .finish();

    assert_eq!(target, "repos/o/r/issues?page=2&per_page=50");
  }

  #[test]
  fn test_param_opt_skips_none() {
    let target = QueryBuilder::new("events")
      .param_opt("page", None::<u32>)
      .param_opt("per_page", Some(10))
      .finish();

    assert_eq!(target, "events?per_page=10");
  }

  #[test]
  fn test_trailing_question_mark_is_kept() {
    assert_eq!(append_param("events?", "page", 1), "events?&page=1");
  }
}
