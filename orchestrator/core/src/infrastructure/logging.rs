// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Logger construction
//!
//! Each role logs under its own directory (see `ProcessRole::log_dir`). The
//! subscriber has a compact stdout layer and an ANSI-free file layer appending
//! to `<dir>/<prefix>.log`.
//!
//! [`BootstrapLogger`] installs the console part before bootstrap starts, so
//! the early phases are visible; `INIT_LOGGER` then attaches the file layer
//! and applies the configured level through reload handles.
//! [`TracingLoggerFactory`] installs the whole subscriber at `INIT_LOGGER`.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, Subscriber};
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::{fmt, reload, EnvFilter, Layer, Registry};

use crate::domain::error::BootstrapError;

type FilteredRegistry = Layered<reload::Layer<EnvFilter, Registry>, Registry>;
type FileLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Where a constructed logger writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogHandle {
    pub directory: PathBuf,
    pub file: PathBuf,
    pub prefix: String,
}

pub trait LoggerFactory: Send + Sync {
    fn build(&self, directory: &Path, prefix: &str, level: &str) -> Result<LogHandle, BootstrapError>;
}

/// Console logging that gains its file layer once the log directory is known.
#[derive(Clone)]
pub struct BootstrapLogger {
    filter: reload::Handle<EnvFilter, Registry>,
    file: reload::Handle<Option<FileLayer>, FilteredRegistry>,
}

impl BootstrapLogger {
    /// Build the logger and the subscriber it controls, without installing it.
    pub fn new(level: &str) -> Result<(Self, impl Subscriber + Send + Sync + 'static), BootstrapError> {
        let (filter, filter_handle) = reload::Layer::new(env_filter(level)?);
        let (file, file_handle) = reload::Layer::new(None::<FileLayer>);

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(file)
            .with(fmt::layer().compact().with_target(false));

        let logger = Self {
            filter: filter_handle,
            file: file_handle,
        };
        Ok((logger, subscriber))
    }

    /// Install console logging as the global subscriber.
    pub fn install(level: &str) -> Result<Self, BootstrapError> {
        let (logger, subscriber) = Self::new(level)?;
        tracing::subscriber::set_global_default(subscriber).map_err(|e| {
            BootstrapError::Configuration(format!("Failed to install logger: {}", e))
        })?;
        Ok(logger)
    }
}

impl LoggerFactory for BootstrapLogger {
    fn build(&self, directory: &Path, prefix: &str, level: &str) -> Result<LogHandle, BootstrapError> {
        let handle = prepare_log_file(directory, prefix)?;
        let file = open_log_file(&handle.file)?;

        self.filter
            .reload(env_filter(level)?)
            .map_err(|e| BootstrapError::Configuration(format!("Failed to apply log level: {}", e)))?;

        let layer: FileLayer = fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .boxed();
        self.file
            .reload(Some(layer))
            .map_err(|e| BootstrapError::Configuration(format!("Failed to attach log file: {}", e)))?;

        Ok(handle)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLoggerFactory;

impl LoggerFactory for TracingLoggerFactory {
    fn build(&self, directory: &Path, prefix: &str, level: &str) -> Result<LogHandle, BootstrapError> {
        let (logger, subscriber) = BootstrapLogger::new(level)?;

        // Already installed (e.g. a second bootstrap in the same test binary)
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            debug!("Global subscriber already installed; keeping existing logger");
            let handle = prepare_log_file(directory, prefix)?;
            open_log_file(&handle.file)?;
            return Ok(handle);
        }

        logger.build(directory, prefix, level)
    }
}

/// RUST_LOG wins over the configured level.
fn env_filter(level: &str) -> Result<EnvFilter, BootstrapError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| BootstrapError::Configuration(format!("Invalid log level '{}': {}", level, e)))
}

fn open_log_file(path: &Path) -> Result<File, BootstrapError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| BootstrapError::Configuration(format!("Failed to open log file {:?}: {}", path, e)))
}

/// Create the log directory and compute the log file path.
pub fn prepare_log_file(directory: &Path, prefix: &str) -> Result<LogHandle, BootstrapError> {
    std::fs::create_dir_all(directory).map_err(|e| {
        BootstrapError::Configuration(format!(
            "Failed to create log directory {:?}: {}",
            directory, e
        ))
    })?;

    Ok(LogHandle {
        directory: directory.to_path_buf(),
        file: directory.join(format!("{}.log", prefix)),
        prefix: prefix.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Tasks").join("debug");

        let handle = prepare_log_file(&target, "TS").unwrap();
        assert!(target.is_dir());
        assert_eq!(handle.file, target.join("TS.log"));
        assert_eq!(handle.prefix, "TS");
    }

    #[test]
    fn test_file_layer_attaches_at_build() {
        let dir = tempfile::tempdir().unwrap();
        let (logger, subscriber) = BootstrapLogger::new("info").unwrap();

        let handle = tracing::subscriber::with_default(subscriber, || {
            tracing::error!("before the log file exists");
            let handle = logger.build(&dir.path().join("Platform"), "SA", "info").unwrap();
            tracing::error!("after the log file exists");
            handle
        });

        let contents = std::fs::read_to_string(&handle.file).unwrap();
        assert!(contents.contains("after the log file exists"));
        assert!(!contents.contains("before the log file exists"));
    }

    #[test]
    fn test_invalid_level_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let (logger, _subscriber) = BootstrapLogger::new("info").unwrap();
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(matches!(
                logger.build(dir.path(), "SA", "no=such=level"),
                Err(BootstrapError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_factory_opens_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let handle = TracingLoggerFactory
            .build(&dir.path().join("Platform"), "SA", "info")
            .unwrap();
        assert!(handle.file.exists());
    }
}
