use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::incidents::{as_incident, extract_messages};

/// Composition of a fetched feed, for diagnostics.
#[derive(Debug, Default, Serialize)]
pub struct FeedStats {
    pub timestamp: DateTime<Utc>,
    pub total_messages: usize,

    // entries that cannot be messages
    pub non_objects: usize,
    // objects without a string `type`
    pub untyped: usize,

    pub incidents: usize,
    pub by_type: BTreeMap<String, usize>,
}

impl FeedStats {
    pub fn from_feed(feed: &Value) -> Self {
        let messages = extract_messages(feed);
        let mut s = FeedStats {
            timestamp: Utc::now(),
            total_messages: messages.len(),
            ..Default::default()
        };

        for message in messages {
            let Some(record) = message.as_object() else {
                s.non_objects += 1;
                continue;
            };

            match record.get("type").and_then(Value::as_str) {
                Some(kind) => *s.by_type.entry(kind.to_string()).or_default() += 1,
                None => s.untyped += 1,
            }

            if as_incident(message).is_some() {
                s.incidents += 1;
            }
        }

        s
    }
}
