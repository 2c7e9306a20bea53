pub mod fetch;
pub mod incidents;
pub mod output;
pub mod parser;
pub mod stats;
pub mod text;

pub use incidents::{Incident, extract_messages, filter_and_enrich};
pub use text::html_to_text;
