//! Tracing setup: a stderr layer plus an optional log file that keeps
//! growing across invocations.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use npbc_core::config::types::LoggingConfig;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Install the global subscriber.
///
/// The returned guard flushes the log file when dropped; hold it for the
/// life of the command.
pub fn init(cfg: &LoggingConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(env_filter(&cfg.level, LevelFilter::WARN));

    let Some(ref path) = cfg.file else {
        tracing_subscriber::registry().with(stderr_layer).init();
        return Ok(None);
    };

    let (writer, guard) = tracing_appender::non_blocking(open_log_file(path)?);
    let file_level = cfg.file_level.as_deref().unwrap_or(&cfg.level);
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(env_filter(file_level, LevelFilter::DEBUG));

    tracing_subscriber::registry().with(stderr_layer).with(file_layer).init();
    Ok(Some(guard))
}

/// `RUST_LOG` wins; otherwise the configured level, or `fallback` if it
/// does not name a level.
fn env_filter(level: &str, fallback: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level_or(level, fallback).into())
        .from_env_lossy()
}

fn level_or(level: &str, fallback: LevelFilter) -> LevelFilter {
    level.trim().parse().unwrap_or(fallback)
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| LoggingError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenFile { path: path.to_path_buf(), source })
}
