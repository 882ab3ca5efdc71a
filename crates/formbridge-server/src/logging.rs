//! Structured logging using tracing.
//!
//! Pretty output for development, one JSON object per event for log
//! aggregation. `RUST_LOG` takes precedence over the configured level.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LogFormat;

/// Initialize the global tracing subscriber
pub fn init_logging(log_level: &str, format: LogFormat) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
    }
    .context("Failed to set global default subscriber")?;

    info!(log_level = %log_level, log_format = %format, "Logging initialized");
    Ok(())
}
