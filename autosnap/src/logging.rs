// File: autosnap/src/logging.rs
use anyhow::{anyhow, Result};
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing::Subscriber;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::constants::defaults::LOG_DIRECTIVE;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(LOG_DIRECTIVE))
}

/// Stdout subscriber for startup, before the configured one can be built.
///
/// Install it with `tracing::subscriber::set_default` around config loading.
pub fn bootstrap() -> impl Subscriber + Send + Sync {
    bootstrap_with(std::io::stdout)
}

fn bootstrap_with<W>(writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    fmt().with_env_filter(env_filter()).with_writer(writer).finish()
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default filter. With a log file, output is
/// appended to it and mirrored to stdout.
pub fn init(log_file: Option<&str>) -> Result<()> {
    let env_filter = env_filter();

    match log_file.filter(|p| !p.is_empty()) {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| anyhow!("Failed to open log file {}: {}", path, e))?;

            fmt()
                .with_env_filter(env_filter)
                .with_ansi(false)
                .with_writer(std::io::stdout.and(Arc::new(file)))
                .try_init()
                .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
        }
        None => fmt()
            .with_env_filter(env_filter)
            .try_init()
            .map_err(|e| anyhow!("Failed to initialize logging: {}", e)),
    }
}
