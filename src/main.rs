//! CLI entry point for the MVG incident parser.
//!
//! Fetches the MVG disruption feed (or reads a saved copy), keeps the
//! incidents, enriches them, and prints them as JSON on stdout. Diagnostics go
//! to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use mvg_incidents::{
    fetch::{BasicClient, DEFAULT_TIMEOUT, MESSAGES_URL, fetch_feed, is_remote},
    incidents::{DisplayZone, Enricher},
    output::{write_json, write_summary, write_to_path},
    parser::parse_feed,
    stats::FeedStats,
};
use serde_json::Value;
use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "mvg_incidents")]
#[command(about = "Print the current MVG incidents as JSON", long_about = None)]
struct Cli {
    /// Feed URL or path to a saved feed file
    #[arg(value_name = "FILE_OR_URL", env = "MVG_MESSAGES_URL", default_value = MESSAGES_URL)]
    source: String,

    /// Write the JSON to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// HTTP timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// Render readable timestamps in UTC instead of local time
    #[arg(long, default_value_t = false)]
    utc: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_logging()?;
    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        error!(error = %e, "Incident export failed");
        return Err(e);
    }

    Ok(())
}

/// Logging setup: coloured stderr, plus a JSON rolling log file when
/// `LOG_FILE_PATH` is set. Stdout is reserved for the result.
fn init_logging() -> Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info")));

    let (json_layer, file_guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let path = Path::new(&log_file_path);
            let log_dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("logs"));
            let log_file_name = path
                .file_name()
                .unwrap_or(OsStr::new("mvg_incidents.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(
                    EnvFilter::try_from_env("RUST_LOG_JSON")
                        .unwrap_or_else(|_| EnvFilter::new("debug")),
                );
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    Ok(file_guard)
}

async fn run(cli: &Cli) -> Result<()> {
    info!(source = %cli.source, "Fetching disruption messages");
    let feed = fetcher(&cli.source, Duration::from_secs(cli.timeout)).await?;

    let stats = FeedStats::from_feed(&feed);
    debug!("{:#?}", stats);
    info!(
        messages = stats.total_messages,
        incidents = stats.incidents,
        untyped = stats.untyped,
        "Feed summary"
    );

    let zone = if cli.utc {
        DisplayZone::Utc
    } else {
        DisplayZone::Local
    };
    let incidents = Enricher::new().with_zone(zone).filter_and_enrich(&feed);

    match &cli.output {
        Some(path) => write_to_path(path, &incidents)?,
        None => write_json(std::io::stdout().lock(), &incidents)?,
    }

    debug!(count = incidents.len(), "Incidents written");
    // Printed regardless of RUST_LOG.
    write_summary(std::io::stderr().lock(), incidents.len())?;
    Ok(())
}

/// Loads the feed from a local file path or fetches it over HTTP.
#[tracing::instrument(skip_all, fields(source = %source))]
async fn fetcher(source: &str, timeout: Duration) -> Result<Value> {
    if is_remote(source) {
        let client = BasicClient::new(timeout)?;
        fetch_feed(&client, source).await
    } else {
        let bytes =
            std::fs::read(source).with_context(|| format!("Error reading feed file '{source}'"))?;
        parse_feed(&bytes)
    }
}
