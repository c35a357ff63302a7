//! # Link Header Pagination
//!
//! GitHub paginates list endpoints with an RFC 5988 `Link` header:
//!
//! ```text
//! <https://api.github.com/events?page=2>; rel="next", <https://api.github.com/events?page=10>; rel="last"
//! ```
//!
//! [`Pagination::from_headers`] turns that header into a map with all four
//! relations (`first`, `prev`, `next`, `last`). A response without the header
//! has no pagination at all, which is `None` rather than an empty map.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::consts::{LINK_HEADER, PAGE_PARAM};
use crate::response::ResponseHeaders;

// One `key=value` link parameter; the value may be quoted
static PARAM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"^\s*(?P<key>[^=\s]+)\s*=\s*(?:"(?P<quoted>(?:[^"\\]|\\.)*)"|(?P<bare>[^\s"]*))\s*$"#)
    .expect("Failed to compile Link parameter regex")
});

// Relative link targets are resolved against this only to read the query.
static RELATIVE_BASE: LazyLock<Url> =
  LazyLock::new(|| Url::parse("https://api.github.com/").expect("Failed to parse relative base URL"));

/// One pagination target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
  /// The full URL to request
  pub link: String,
  /// The literal `page` query value of `link`
  pub page: String,
}

impl PageLink {
  /// The page as a number
  pub fn page_number(&self) -> Option<u32> {
    self.page.parse().ok()
  }
}

/// Pagination relations offered by a response.
///
/// Relations the server did not offer are `None` and serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
  pub first: Option<PageLink>,
  pub prev: Option<PageLink>,
  pub next: Option<PageLink>,
  pub last: Option<PageLink>,
}

impl Pagination {
  /// Read the `Link` header(s) of a response. Returns `None` when there is no
  /// `Link` header.
  pub fn from_headers(headers: &ResponseHeaders) -> Option<Self> {
    let values = headers.get_all(LINK_HEADER);
    if values.is_empty() {
      return None;
    }

    let mut pagination = Pagination::default();
    for value in values {
      pagination.merge(value);
    }
    Some(pagination)
  }

  /// Parse a single `Link` header value. Malformed entries are skipped.
  pub fn parse(header: &str) -> Self {
    let mut pagination = Pagination::default();
    pagination.merge(header);
    pagination
  }

  fn merge(&mut self, header: &str) {
    for entry in split_outside(header, ',') {
      let Some((link, params)) = parse_target(entry) else {
        if !entry.trim().is_empty() {
          debug!(entry, "Skipping malformed Link entry");
        }
        continue;
      };
      let Some(rels) = find_rel(params) else {
        debug!(link, "Skipping Link entry without rel");
        continue;
      };
      let Some(page) = page_param(link) else {
        debug!(link, "Skipping Link entry without page parameter");
        continue;
      };

      for rel in rels.split_whitespace() {
        let slot = match rel.to_ascii_lowercase().as_str() {
          "first" => &mut self.first,
          "prev" | "previous" => &mut self.prev,
          "next" => &mut self.next,
          "last" => &mut self.last,
          other => {
            debug!(rel = other, link, "Ignoring unknown Link relation");
            continue;
          }
        };
        *slot = Some(PageLink {
          link: link.to_string(),
          page: page.clone(),
        });
      }
    }
  }

  /// Whether no relation is set
  pub fn is_empty(&self) -> bool {
    self.first.is_none() && self.prev.is_none() && self.next.is_none() && self.last.is_none()
  }

  /// The next page number, if there is one
  pub fn next_page(&self) -> Option<u32> {
    self.next.as_ref().and_then(PageLink::page_number)
  }

  /// The last page number, if the server reported one
  pub fn last_page(&self) -> Option<u32> {
    self.last.as_ref().and_then(PageLink::page_number)
  }
}

/// Split on `separator` wherever it is outside `<...>` and quoted strings
fn split_outside(input: &str, separator: char) -> Vec<&str> {
  let mut parts = Vec::new();
  let mut start = 0;
  let mut in_target = false;
  let mut in_quotes = false;
  let mut escaped = false;

  for (i, c) in input.char_indices() {
    if in_quotes {
      match c {
        _ if escaped => escaped = false,
        '\\' => escaped = true,
        '"' => in_quotes = false,
        _ => {}
      }
      continue;
    }
    match c {
      '<' => in_target = true,
      '>' => in_target = false,
      '"' if !in_target => in_quotes = true,
      c if c == separator && !in_target => {
        parts.push(&input[start..i]);
        start = i + c.len_utf8();
      }
      _ => {}
    }
  }
  parts.push(&input[start..]);
  parts
}

/// Split an entry into its `<target>` and the parameters after it
fn parse_target(entry: &str) -> Option<(&str, &str)> {
  let rest = entry.trim_start().strip_prefix('<')?;
  let (link, params) = rest.split_once('>')?;
  Some((link.trim(), params))
}

/// The value of the first `rel` parameter. Parameters are split on `;`
/// outside quotes, so a `rel=` inside another parameter's value is ignored.
fn find_rel(params: &str) -> Option<String> {
  split_outside(params, ';')
    .into_iter()
    .skip(1)
    .filter_map(|param| PARAM_REGEX.captures(param))
    .find(|captures| captures["key"].eq_ignore_ascii_case("rel"))
    .and_then(|captures| {
      let rel = captures
        .name("quoted")
        .or_else(|| captures.name("bare"))
        .map(|m| m.as_str().trim())?;
      (!rel.is_empty()).then(|| rel.to_string())
    })
}

fn page_param(link: &str) -> Option<String> {
  let url = Url::parse(link).or_else(|_| RELATIVE_BASE.join(link)).ok()?;
  url
    .query_pairs()
    .find(|(key, _)| key == PAGE_PARAM)
    .map(|(_, value)| value.into_owned())
    .filter(|page| !page.is_empty() && page.bytes().all(|b| b.is_ascii_digit()))
}
