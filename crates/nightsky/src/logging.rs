//! File-based logging setup.
//!
//! The terminal belongs to the UI, so events go to `nightsky.log` in the
//! configured directory (or the platform data directory).

use std::fs;

use color_eyre::eyre::{WrapErr, eyre};
use nightsky_config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a filter directive, e.g. `nightsky=debug`.
pub const LOG_FILTER_ENV: &str = "NIGHTSKY_LOG";

const LOG_FILE_NAME: &str = "nightsky.log";

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the program so buffered lines get flushed.
pub fn init(config: &LogConfig) -> color_eyre::Result<WorkerGuard> {
    let dir = match &config.directory {
        Some(dir) => dir.clone(),
        None => nightsky_config::data_dir()
            .ok_or_else(|| eyre!("could not determine a data directory for logs"))?,
    };
    fs::create_dir_all(&dir)
        .wrap_err_with(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_dir = %dir.display(),
        "logging initialized"
    );
    Ok(guard)
}
