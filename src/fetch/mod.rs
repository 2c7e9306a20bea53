mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::parser::parse_feed;

/// MVG disruption messages endpoint.
pub const MESSAGES_URL: &str = "https://www.mvg.de/api/bgw-pt/v3/messages";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Whether a CLI source names an HTTP(S) URL rather than a local file.
pub fn is_remote(source: &str) -> bool {
    let scheme = source.split_once("://").map(|(scheme, _)| scheme);
    matches!(scheme, Some(s) if s.eq_ignore_ascii_case("http") || s.eq_ignore_ascii_case("https"))
}

/// Issues a single GET for `url` and returns the response body.
///
/// # Errors
///
/// Fails on an unparsable URL, on transport errors (including timeouts), and
/// on any non-success status, whose code and body end up in the message.
#[tracing::instrument(skip(client))]
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let target: reqwest::Url = url
        .parse()
        .with_context(|| format!("Invalid feed URL '{url}'"))?;
    let req = reqwest::Request::new(reqwest::Method::GET, target);

    let resp = client
        .execute(req)
        .await
        .with_context(|| format!("Error fetching data from {url}"))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(anyhow!("{url} returned status {status}: {body}"));
    }

    let bytes = resp
        .bytes()
        .await
        .with_context(|| format!("Error reading response body from {url}"))?;
    debug!(bytes = bytes.len(), %status, "Feed bytes received");

    Ok(bytes.to_vec())
}

/// Fetches `url` and decodes the body as JSON.
pub async fn fetch_feed<C: HttpClient>(client: &C, url: &str) -> Result<Value> {
    let bytes = fetch_bytes(client, url).await?;
    parse_feed(&bytes)
}
