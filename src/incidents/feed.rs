//! Locating messages inside a raw feed document.

use serde_json::Value;

use super::Record;

/// Keys under which a wrapped feed may carry its message list, tried in order.
pub const MESSAGE_KEYS: [&str; 4] = ["messages", "data", "items", "results"];

/// The `type` value that marks a message as an incident.
pub const INCIDENT_TYPE: &str = "INCIDENT";

/// Returns the raw message entries of a feed.
///
/// A top-level array is the message list itself. An object is searched for
/// the first of [`MESSAGE_KEYS`] that holds an array; failing that, an object
/// with a `type` field is taken to be a single message. Anything else has no
/// messages.
pub fn extract_messages(feed: &Value) -> Vec<&Value> {
    match feed {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => {
            if let Some(items) = MESSAGE_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_array))
            {
                items.iter().collect()
            } else if map.contains_key("type") {
                vec![feed]
            } else {
                Vec::new()
            }
        }
        _ => Vec::new(),
    }
}

/// Returns the message as a record if it is an object whose `type` is exactly
/// [`INCIDENT_TYPE`].
pub fn as_incident(message: &Value) -> Option<&Record> {
    let record = message.as_object()?;
    let kind = record.get("type").and_then(Value::as_str)?;
    (kind == INCIDENT_TYPE).then_some(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_level_array() {
        let feed = json!([{"type": "INCIDENT"}, {"type": "INFO"}, 3]);
        assert_eq!(extract_messages(&feed).len(), 3);
    }

    #[test]
    fn test_keys_tried_in_order() {
        let feed = json!({
            "results": [{"id": "r"}],
            "data": [{"id": "d"}],
        });
        let messages = extract_messages(&feed);
        assert_eq!(messages, vec![&json!({"id": "d"})]);
    }

    #[test]
    fn test_non_array_key_is_skipped() {
        let feed = json!({"messages": "oops", "items": [{"id": 1}]});
        assert_eq!(extract_messages(&feed), vec![&json!({"id": 1})]);
    }

    #[test]
    fn test_single_typed_object() {
        let feed = json!({"type": "INCIDENT", "title": "A"});
        assert_eq!(extract_messages(&feed), vec![&feed]);
    }

    #[test]
    fn test_wrapped_list_wins_over_single_object() {
        let feed = json!({"type": "INCIDENT", "messages": []});
        assert!(extract_messages(&feed).is_empty());
    }

    #[test]
    fn test_unrecognized_shapes() {
        for feed in [
            Value::Null,
            json!(123),
            json!(true),
            json!("messages"),
            json!({"status": "ok"}),
        ] {
            assert!(extract_messages(&feed).is_empty(), "{feed}");
        }
    }

    #[test]
    fn test_as_incident_matches_exact_type() {
        assert!(as_incident(&json!({"type": "INCIDENT"})).is_some());
        assert!(as_incident(&json!({"type": "incident"})).is_none());
        assert!(as_incident(&json!({"type": "INCIDENT "})).is_none());
        assert!(as_incident(&json!({"type": null})).is_none());
        assert!(as_incident(&json!({"title": "no type"})).is_none());
        assert!(as_incident(&json!(["INCIDENT"])).is_none());
    }
}
