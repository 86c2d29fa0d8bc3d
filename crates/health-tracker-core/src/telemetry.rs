//! Tracing subscriber setup.
//!
//! Console output always; a daily-rotating log file when
//! [`TrackerConfig::log_dir`] is set. `RUST_LOG` overrides the configured
//! filter.

use std::sync::{Mutex, OnceLock, PoisonError};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::TrackerConfig;

/// Tracing setup errors.
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Log file setup failed: {0}")]
    LogFile(#[from] tracing_appender::rolling::InitError),

    #[error("Global subscriber already set: {0}")]
    AlreadySet(#[from] tracing_subscriber::util::TryInitError),
}

/// Keeps the file writer's worker alive for the life of the process.
static LOG_GUARD: OnceLock<Option<WorkerGuard>> = OnceLock::new();

/// Serializes installation so concurrent callers see a consistent result.
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Install the global tracing subscriber.
///
/// Returns `Ok(false)` if this module already installed it.
pub fn init_tracing(config: &TrackerConfig) -> Result<bool, TelemetryError> {
    let _lock = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if LOG_GUARD.get().is_some() {
        return Ok(false);
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;

    let console_layer = fmt::layer().with_target(true).with_thread_ids(true);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(&config.log_file_prefix)
                .filename_suffix("log")
                .max_log_files(config.log_max_files)
                .build(dir)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_thread_ids(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    let file_logging = guard.is_some();
    let _ = LOG_GUARD.set(guard);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        file_logging,
        "logging initialized"
    );
    Ok(true)
}
