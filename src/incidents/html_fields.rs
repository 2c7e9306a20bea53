//! Plain-text companions for the HTML fields of an incident.

use super::Record;
use crate::text::readable_text;

/// Fields holding HTML that get a plain-text `<field>_readable` companion.
pub const HTML_FIELDS: [&str; 2] = ["description", "title"];

/// Adds `description_readable` and `title_readable` to a copy of the record.
///
/// Only string fields are converted; the originals are left untouched.
pub fn convert_html_fields(incident: &Record) -> Record {
    let mut converted = incident.clone();

    for field in HTML_FIELDS {
        let readable = converted
            .get(field)
            .filter(|value| value.is_string())
            .map(readable_text);

        if let Some(readable) = readable {
            converted.insert(format!("{field}_readable"), readable);
        }
    }

    converted
}
