use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::config::LoggingConfig;

/// Install the process-wide subscriber.
///
/// Console output always; `error.log` (errors only) and `combined.log`
/// (everything the filter lets through) when file logging is enabled.
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("invalid log level directive: {}", config.level))?;

    let (error_layer, combined_layer) = if config.log_to_files {
        std::fs::create_dir_all(&config.log_dir)
            .with_context(|| format!("failed to create log dir {}", config.log_dir.display()))?;
        let error_log = open_append(&config.log_dir.join("error.log"))?;
        let combined_log = open_append(&config.log_dir.join("combined.log"))?;

        (
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(error_log))
                    .with_filter(LevelFilter::ERROR),
            ),
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(combined_log))),
        )
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(error_layer)
        .with(combined_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}

fn open_append(path: &Path) -> anyhow::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}
