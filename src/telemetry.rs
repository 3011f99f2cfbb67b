use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::Config;

/// Where log lines go
pub enum LogSink {
    Stderr,
    /// Append to `Config::log_file`; used while the terminal UI owns the screen
    File,
}

/// Initialize the tracing subscriber. RUST_LOG wins over `Config::log_level`.
pub fn init(config: &Config, sink: LogSink) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match sink {
        LogSink::Stderr if config.log_json => Registry::default()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        LogSink::Stderr => Registry::default()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?,
        LogSink::File => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.log_file)?;
            let writer = Mutex::new(file);
            if config.log_json {
                Registry::default()
                    .with(env_filter)
                    .with(fmt::layer().json().with_ansi(false).with_writer(writer))
                    .try_init()?
            } else {
                Registry::default()
                    .with(env_filter)
                    .with(fmt::layer().with_ansi(false).with_writer(writer))
                    .try_init()?
            }
        }
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialized");
    Ok(())
}
