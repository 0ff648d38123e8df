//! Tracing setup shared by every subcommand.
//!
//! Events always go to `focalstat.log` in the platform cache directory
//! (`~/.cache/focalstat/` on Linux). Setting `FOCALSTAT_LOG` picks the
//! filter and mirrors events to stderr:
//!
//! ```bash
//! FOCALSTAT_LOG=debug focalstat stats ~/Pictures
//! FOCALSTAT_LOG=focalstat::serve=trace focalstat serve ~/Pictures
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "FOCALSTAT_LOG";

const DEFAULT_FILTER: &str = "info";
const LOG_FILE: &str = "focalstat.log";

/// Filter directive and whether stderr output was requested
fn filter_directive(env_value: Option<String>) -> (String, bool) {
    match env_value.filter(|v| !v.trim().is_empty()) {
        Some(directive) => (directive, true),
        None => (DEFAULT_FILTER.to_string(), false),
    }
}

/// Install the global subscriber. The returned guard flushes the file
/// writer on drop, so keep it alive until the program exits.
pub fn init_logging() -> Result<WorkerGuard> {
    let path = log_file_path().context("No cache directory for the log file")?;
    let dir = path.parent().context("Log file has no parent directory")?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let (directive, to_stderr) = filter_directive(std::env::var(LOG_ENV).ok());
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid {} filter: {}", LOG_ENV, directive))?;

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_span_events(FmtSpan::CLOSE);
    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::CLOSE)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

/// Location of the log file, if the platform has a cache directory
pub fn log_file_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "focalstat").map(|dirs| dirs.cache_dir().join(LOG_FILE))
}
