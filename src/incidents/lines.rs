//! Removing repeated entries from an incident's `lines` list.

use std::collections::HashSet;

use serde_json::Value;

use super::Record;

/// Canonical form of a line entry used to detect duplicates.
///
/// Objects are written with their keys sorted, recursively, so two objects
/// with the same entries compare equal regardless of key order. Other values
/// are written as compact JSON, which makes equal values produce equal keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey(String);

impl LineKey {
    pub fn of(value: &Value) -> Self {
        let mut key = String::new();
        write_canonical(value, &mut key);
        Self(key)
    }
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, value)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::from(key.as_str()).to_string());
                out.push(':');
                write_canonical(value, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Keeps the first occurrence of every distinct line, in order.
pub fn unique_lines(lines: &[Value]) -> Vec<Value> {
    let mut seen = HashSet::new();
    lines
        .iter()
        .filter(|line| seen.insert(LineKey::of(line)))
        .cloned()
        .collect()
}

/// Returns a copy of the record whose `lines` array has duplicates removed.
///
/// Records without a `lines` array are copied unchanged.
pub fn deduplicate_lines(incident: &Record) -> Record {
    let mut converted = incident.clone();

    let unique = match converted.get("lines") {
        Some(Value::Array(lines)) => Some(unique_lines(lines)),
        _ => None,
    };
    if let Some(unique) = unique {
        converted.insert("lines".to_string(), Value::Array(unique));
    }

    converted
}
