//! Serialization of enriched incidents.
//!
//! Output is pretty-printed JSON with two-space indentation. Non-ASCII text
//! such as umlauts in German station names is written as is.

use anyhow::{Context, Result};
use tracing::debug;

use crate::incidents::Incident;
use std::fs::File;
use std::io::{BufWriter, Write};

/// Writes the incidents as a pretty JSON array followed by a newline.
pub fn write_json<W: Write>(mut writer: W, incidents: &[Incident]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, incidents)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}

/// Writes the one-line incident count shown after an export.
pub fn write_summary<W: Write>(mut writer: W, count: usize) -> Result<()> {
    writeln!(writer, "Found {count} incident(s)")?;
    writer.flush()?;

    Ok(())
}

/// Writes the incidents to `path`, replacing any existing file.
pub fn write_to_path(path: &str, incidents: &[Incident]) -> Result<()> {
    debug!(path, count = incidents.len(), "Writing incidents to file");

    let file = File::create(path).with_context(|| format!("Failed to create '{path}'"))?;
    write_json(BufWriter::new(file), incidents)
}
