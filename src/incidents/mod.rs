//! Incident filtering and enrichment.
//!
//! A raw feed is reduced to its `INCIDENT` messages, and each of them passes
//! through three enrichment steps in a fixed order: HTML fields get plain-text
//! companions, timestamps get readable companions, and the `lines` list is
//! deduplicated. Every step returns a new record; inputs are never modified
//! and malformed fields are skipped rather than reported.

pub mod dates;
pub mod feed;
pub mod html_fields;
pub mod lines;

pub use dates::{DisplayZone, add_readable_dates, format_timestamp};
pub use feed::{as_incident, extract_messages};
pub use html_fields::convert_html_fields;
pub use lines::{LineKey, deduplicate_lines};

use serde_json::{Map, Value};

/// A message as an insertion-ordered JSON object.
pub type Record = Map<String, Value>;

/// An enriched incident record.
pub type Incident = Record;

/// Runs the enrichment steps with a chosen timestamp zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct Enricher {
    zone: DisplayZone,
}

impl Enricher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders readable timestamps in `zone` instead of local time.
    pub fn with_zone(mut self, zone: DisplayZone) -> Self {
        self.zone = zone;
        self
    }

    /// Enriches a single incident message.
    pub fn enrich(&self, message: &Record) -> Incident {
        let incident = convert_html_fields(message);
        let incident = add_readable_dates(&incident, self.zone);
        deduplicate_lines(&incident)
    }

    /// Extracts the feed's messages and returns the enriched incidents, in
    /// feed order.
    pub fn filter_and_enrich(&self, feed: &Value) -> Vec<Incident> {
        extract_messages(feed)
            .into_iter()
            .filter_map(as_incident)
            .map(|message| self.enrich(message))
            .collect()
    }
}

/// Filters and enriches a feed, rendering timestamps in local time.
pub fn filter_and_enrich(feed: &Value) -> Vec<Incident> {
    Enricher::new().filter_and_enrich(feed)
}
