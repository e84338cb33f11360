//! Tracing subscriber initialisation and log file layout.
//!
//! Two JSON files rotate daily under the log directory:
//! `{service}.{YYYY-MM-DD}.log` with every enabled event, and
//! `{service}-error.{YYYY-MM-DD}.log` with errors only. Outside production
//! a human-readable layer also writes to stdout.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

const APP_LOG_RETENTION: usize = 14;
const ERROR_LOG_RETENTION: usize = 30;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open log file: {0}")]
    Appender(#[from] InitError),

    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] TryInitError),
}

/// Location and naming of the rotated log files.
#[derive(Debug, Clone)]
pub struct LogFiles {
    dir: PathBuf,
    service_name: String,
}

impl LogFiles {
    pub fn new(dir: impl Into<PathBuf>, service_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            service_name: service_name.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.log_dir, &config.service_name)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn prefix(&self, errors_only: bool) -> String {
        if errors_only {
            format!("{}-error", self.service_name)
        } else {
            self.service_name.clone()
        }
    }

    /// Path of the file written on `date`.
    pub fn path_for(&self, date: NaiveDate, errors_only: bool) -> PathBuf {
        self.dir.join(format!(
            "{}.{}.log",
            self.prefix(errors_only),
            date.format("%Y-%m-%d")
        ))
    }

    fn appender(&self, errors_only: bool) -> Result<RollingFileAppender, InitError> {
        let retention = if errors_only {
            ERROR_LOG_RETENTION
        } else {
            APP_LOG_RETENTION
        };

        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(self.prefix(errors_only))
            .filename_suffix("log")
            .max_log_files(retention)
            .build(&self.dir)
    }
}

/// Keeps the non-blocking writers flushing. Drop it only at shutdown.
#[must_use = "dropping the guards stops file logging"]
pub struct LogGuards {
    _guards: Vec<WorkerGuard>,
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &Config) -> Result<LogGuards, LoggingError> {
    let files = LogFiles::from_config(config);
    std::fs::create_dir_all(files.dir()).map_err(|source| LoggingError::CreateDir {
        path: files.dir().to_path_buf(),
        source,
    })?;

    let (app_writer, app_guard) = tracing_appender::non_blocking(files.appender(false)?);
    let (error_writer, error_guard) = tracing_appender::non_blocking(files.appender(true)?);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let app_layer = fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_writer(app_writer);

    let error_layer = fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_writer(error_writer)
        .with_filter(LevelFilter::ERROR);

    let console_layer = (!config.is_production()).then(|| fmt::layer().with_target(false));

    tracing_subscriber::registry()
        .with(filter)
        .with(app_layer)
        .with(error_layer)
        .with(console_layer)
        .try_init()?;

    Ok(LogGuards {
        _guards: vec![app_guard, error_guard],
    })
}
