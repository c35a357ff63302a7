//! # Request Command
//!
//! Sends one request through the executor and prints the status, headers,
//! pagination and JSON body of the response.

use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Args;
use hubcall_core::output::{format_header_line, format_status, print_header, print_warning};
use hubcall_gh::{ApiResponse, EndpointRequest, HttpMethod};
use owo_colors::OwoColorize;
use tokio::runtime::Runtime;

use super::load_client;

/// Arguments for the request command
#[derive(Args)]
pub struct RequestArgs {
  /// API path relative to the root, or an absolute URL
  #[arg(required = true, index = 1)]
  pub path: String,

  /// HTTP method
  #[arg(short = 'X', long = "method", default_value = "GET", value_name = "METHOD")]
  pub method: HttpMethod,

  /// Extra request header, e.g. 'Accept: application/vnd.github.raw+json'
  #[arg(short = 'H', long = "header", value_name = "NAME: VALUE")]
  pub headers: Vec<String>,

  /// Raw request body, sent exactly as given
  #[arg(short = 'd', long = "data", value_name = "BODY")]
  pub data: Option<String>,

  /// Page to request
  #[arg(long)]
  pub page: Option<NonZeroU32>,

  /// Number of items per page
  #[arg(long = "per-page")]
  pub per_page: Option<NonZeroU32>,

  /// Give up on this request after this many seconds
  #[arg(long, value_name = "SECS")]
  pub timeout: Option<NonZeroU32>,

  /// Print the response headers
  #[arg(short = 'i', long)]
  pub include: bool,
}

/// Handle the request command
pub(super) fn handle_request_command(args: RequestArgs, config_file: Option<&Path>) -> Result<()> {
  let request = build_request(&args)?;
  let client = load_client(config_file)?;

  let rt = Runtime::new()?;
  let response = rt.block_on(client.request(request))?;

  print_response(&response, args.include)
}

fn build_request(args: &RequestArgs) -> Result<EndpointRequest> {
  let mut request = EndpointRequest::new(args.method, args.path.as_str())
    .page_opt(args.page)
    .per_page_opt(args.per_page);

  for header in &args.headers {
    let (name, value) = parse_header_arg(header)?;
    request = request.header(name, value);
  }
  if let Some(data) = &args.data {
    request = request.body(data.as_str());
  }
  if let Some(secs) = args.timeout {
    request = request.timeout(Duration::from_secs(secs.get().into()));
  }

  Ok(request)
}

/// Split a `Name: value` header argument
fn parse_header_arg(header: &str) -> Result<(&str, &str)> {
  let (name, value) = header
    .split_once(':')
    .with_context(|| format!("Invalid header '{header}', expected 'Name: value'"))?;
  let name = name.trim();
  if name.is_empty() {
    bail!("Invalid header '{header}', the name is empty");
  }
  Ok((name, value.trim()))
}

fn print_response(response: &ApiResponse, include_headers: bool) -> Result<()> {
  eprintln!("{} {}", "HTTP".bold(), format_status(response.status()));

  if include_headers {
    for (name, values) in response.headers().iter() {
      for value in values {
        eprintln!("{}", format_header_line(name, value));
      }
    }
  }

  if let Some(pagination) = response.pagination().filter(|p| !p.is_empty()) {
    print_header("Pagination");
    for (rel, link) in [
      ("first", &pagination.first),
      ("prev", &pagination.prev),
      ("next", &pagination.next),
      ("last", &pagination.last),
    ] {
      if let Some(link) = link {
        eprintln!("  {rel:<5} page {} {}", link.page, link.link.bright_black());
      }
    }
    eprintln!();
  }

  if !response.is_success() {
    match response.error_message() {
      Some(message) => print_warning(&format!("GitHub answered {}: {message}", response.status())),
      None => print_warning(&format!("GitHub answered {}", response.status())),
    }
  }

  let body = serde_json::to_string_pretty(response.body()).context("Failed to format response body")?;
  println!("{body}");

  Ok(())
}
