// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the Lodestar CLI

pub mod platform;
pub mod schema;
pub mod task_server;

pub use self::schema::SchemaCommand;

use std::path::PathBuf;

use lodestar_core::domain::environment::{ProcessContext, ENV_BASE_PATH, ENV_LOG_LEVEL};
use lodestar_core::domain::error::BootstrapError;
use lodestar_core::infrastructure::environment_resolver::DEFAULT_LOG_LEVEL;
use lodestar_core::infrastructure::BootstrapLogger;

/// Capture the process context, applying `--base-path` over the environment.
pub fn process_context(base_path: Option<PathBuf>) -> ProcessContext {
    let mut context = ProcessContext::capture();
    if let Some(path) = base_path {
        context.set_var(ENV_BASE_PATH, path.to_string_lossy());
    }
    context
}

/// Console logging for a role, installed before bootstrap so the early
/// phases are visible. The role's log file is attached at INIT_LOGGER.
pub fn console_logger(process: &ProcessContext) -> Result<BootstrapLogger, BootstrapError> {
    BootstrapLogger::install(process.var(ENV_LOG_LEVEL).unwrap_or(DEFAULT_LOG_LEVEL))
}
