// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Environment
//!
//! [`ProcessContext`] is the ambient execution context captured once at
//! startup (working directory and environment variables). The resolver turns
//! it into an [`EnvironmentConfig`], which every later bootstrap phase reads.

use std::collections::HashMap;
use std::ffi::OsString;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Base directory override (defaults to the working directory)
pub const ENV_BASE_PATH: &str = "LODESTAR_BASE_PATH";
/// Optional YAML environment file
pub const ENV_FILE: &str = "LODESTAR_ENV_FILE";
pub const ENV_PROJECT_SCHEMA: &str = "LODESTAR_PROJECT_SCHEMA";
pub const ENV_LOG_PATH: &str = "LODESTAR_LOG_PATH";
pub const ENV_SECRETS_PATH: &str = "LODESTAR_SECRETS_PATH";
pub const ENV_SUPERVISOR_ADDR: &str = "LODESTAR_SUPERVISOR_ADDR";
pub const ENV_LOG_LEVEL: &str = "LODESTAR_LOG_LEVEL";

/// Snapshot of the execution context the process was started in.
#[derive(Debug, Clone, Default)]
pub struct ProcessContext {
    working_dir: Option<PathBuf>,
    vars: HashMap<String, String>,
    /// Variables whose name or value is not valid unicode
    non_unicode: Vec<String>,
}

impl ProcessContext {
    /// Capture the current working directory and environment.
    pub fn capture() -> Self {
        Self::from_vars(std::env::current_dir().ok(), std::env::vars_os())
    }

    /// Build a context from raw OS variables. Entries that are not valid
    /// unicode are left out of [`var`](Self::var) and reported by
    /// [`non_unicode_vars`](Self::non_unicode_vars).
    pub fn from_vars<I>(working_dir: Option<PathBuf>, vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut context = Self::new(working_dir);
        for (key, value) in vars {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    context.vars.insert(key, value);
                }
                (Ok(key), Err(_)) => {
                    debug!("Environment variable {} is not valid unicode", key);
                    context.non_unicode.push(key);
                }
                (Err(key), _) => {
                    let key = key.to_string_lossy().into_owned();
                    debug!("Environment variable name {:?} is not valid unicode", key);
                    context.non_unicode.push(key);
                }
            }
        }
        context
    }

    pub fn new(working_dir: Option<PathBuf>) -> Self {
        Self {
            working_dir,
            vars: HashMap::new(),
            non_unicode: Vec::new(),
        }
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    pub fn non_unicode_vars(&self) -> &[String] {
        &self.non_unicode
    }
}

/// Resolved process configuration. Required paths are always absolute.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentConfig {
    pub base_path: PathBuf,
    pub project_schema_path: PathBuf,
    pub log_files_path: PathBuf,
    pub secrets_path: Option<PathBuf>,
    /// Parent supervisor listening for the readiness message
    pub supervisor_addr: Option<SocketAddr>,
    pub log_level: String,
}
