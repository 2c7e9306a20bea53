//! HTML fragment to terminal text conversion.
//!
//! MVG message titles and descriptions carry a small, operator-controlled set
//! of tags. They are rewritten by an ordered list of regex substitutions, each
//! applied to the output of the previous one, followed by whitespace cleanup
//! and named-entity decoding. This is a display transform, not a sanitizer.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Width of the separator line that replaces `<hr>`.
pub const RULE_WIDTH: usize = 50;

/// Named entities decoded after tag removal, applied in this order.
pub const ENTITIES: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&nbsp;", " "),
    ("&hellip;", "..."),
    ("&mdash;", "-"),
    ("&ndash;", "-"),
    ("&copy;", "(c)"),
    ("&reg;", "(R)"),
    ("&trade;", "(TM)"),
];

/// A single substitution step of the markup rewrite.
struct Rewrite {
    pattern: Regex,
    replacement: String,
}

impl Rewrite {
    fn new(pattern: &str, replacement: impl Into<String>) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("markup rewrite regex"),
            replacement: replacement.into(),
        }
    }
}

/// Tag rewrites in application order. Emphasis only matches bare opening tags,
/// while block tags accept attributes.
static REWRITES: LazyLock<Vec<Rewrite>> = LazyLock::new(|| {
    let rule = format!("\n{}\n", "-".repeat(RULE_WIDTH));
    vec![
        Rewrite::new(r"(?i)<br\s*/?>", "\n"),
        Rewrite::new(r"(?i)<p\s*[^>]*>", "\n"),
        Rewrite::new(r"(?i)</p>", "\n"),
        Rewrite::new(r"(?i)<div\s*[^>]*>", "\n"),
        Rewrite::new(r"(?i)</div>", "\n"),
        Rewrite::new(r"(?i)<hr\s*/?>", rule),
        Rewrite::new(r"(?i)<ul\s*[^>]*>", "\n"),
        Rewrite::new(r"(?i)</ul>", "\n"),
        Rewrite::new(r"(?i)<ol\s*[^>]*>", "\n"),
        Rewrite::new(r"(?i)</ol>", "\n"),
        Rewrite::new(r"(?i)<li\s*[^>]*>", "- "),
        Rewrite::new(r"(?i)</li>", "\n"),
        Rewrite::new(r"(?is)<strong>(.*?)</strong>", "**${1}**"),
        Rewrite::new(r"(?is)<b>(.*?)</b>", "**${1}**"),
        Rewrite::new(r"(?is)<em>(.*?)</em>", "*${1}*"),
        Rewrite::new(r"(?is)<i>(.*?)</i>", "*${1}*"),
        Rewrite::new(
            r#"(?is)<a\s+[^>]*href=["']([^"']*)["'][^>]*>(.*?)</a>"#,
            "${2} (${1})",
        ),
        // Whatever survived the rewrites above is dropped.
        Rewrite::new(r"<[^>]+>", ""),
    ]
});

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").expect("BLANK_RUN regex"));

/// Converts an HTML fragment into plain text suitable for a terminal.
///
/// Line-breaking tags become newlines, list items become `- ` bullets,
/// bold and italic become `**` and `*`, links become `text (url)`, and all
/// other tags are removed. Runs of blank lines collapse to a single blank
/// line, the result is trimmed, and the entities in [`ENTITIES`] are decoded.
///
/// Text without markup is returned unchanged.
pub fn html_to_text(html: &str) -> String {
    let mut text = html.to_string();

    for rewrite in REWRITES.iter() {
        text = rewrite
            .pattern
            .replace_all(&text, rewrite.replacement.as_str())
            .into_owned();
    }

    let text = BLANK_RUN.replace_all(&text, "\n\n");
    let mut text = text.trim().to_string();

    for (entity, replacement) in ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, replacement);
        }
    }

    text
}

/// Applies [`html_to_text`] to a JSON string; any other value, `null`
/// included, is returned as is.
pub fn readable_text(value: &Value) -> Value {
    match value {
        Value::String(html) => Value::String(html_to_text(html)),
        other => other.clone(),
    }
}
