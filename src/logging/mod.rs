// Logging module for structured logging using the tracing crate

use std::error::Error;
use std::sync::Once;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

static INIT: Once = Once::new();

/// Output format of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Initialize the tracing subscriber for structured logging
///
/// Log lines go to stderr so that stdout stays free for tool output. The
/// level filter comes from `RUST_LOG` and defaults to `info`.
///
/// Only the first call installs a subscriber; later calls return `Ok(())`
/// without doing anything.
///
/// # Examples
///
/// ```ignore
/// use imprint::logging::{init_subscriber, LogFormat};
///
/// init_subscriber(LogFormat::Json)?;
/// tracing::info!("Application started");
/// ```
pub fn init_subscriber(format: LogFormat) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut result = Ok(());
    INIT.call_once(|| {
        result = install(format);
    });
    result
}

fn install(format: LogFormat) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
    }
    Ok(())
}
