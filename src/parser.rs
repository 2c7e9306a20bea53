//! JSON decoding for the MVG messages feed.

use anyhow::{Context, Result};
use serde_json::Value;

/// Decodes a feed body into a generic JSON value.
///
/// No schema is imposed here; shape handling is left to
/// [`extract_messages`](crate::incidents::extract_messages).
///
/// # Errors
///
/// Returns an error if the bytes are not a complete JSON document.
pub fn parse_feed(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).context("Error parsing JSON response")
}
