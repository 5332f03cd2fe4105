// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Bootstrap error taxonomy.
//!
//! Every variant is fatal: bootstrap has no retry and no partial-success mode.

use crate::domain::bootstrap::BootstrapPhase;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// Environment or schema source missing, unreadable or malformed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A project's plugin failed to load or exported malformed capabilities
    #[error("Failed to load project '{project}': {reason}")]
    PluginLoad { project: String, reason: String },

    /// The role application failed during its own start sequence
    #[error("Application failed to start: {0}")]
    ApplicationStart(String),

    /// The readiness notification could not be delivered
    #[error("Readiness signal failed: {0}")]
    Readiness(String),
}

impl BootstrapError {
    pub fn plugin_load(project: impl Into<String>, reason: impl ToString) -> Self {
        Self::PluginLoad {
            project: project.into(),
            reason: reason.to_string(),
        }
    }

    /// Process exit code for this error kind.
    ///
    /// `0` is success, `1` is reserved for failures outside bootstrap.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 2,
            Self::PluginLoad { .. } => 3,
            Self::ApplicationStart(_) => 4,
            Self::Readiness(_) => 5,
        }
    }
}

/// A bootstrap error together with the phase it aborted.
#[derive(Debug, thiserror::Error)]
#[error("Bootstrap failed during {phase}: {error}")]
pub struct BootstrapFailure {
    pub phase: BootstrapPhase,
    #[source]
    pub error: BootstrapError,
}

impl BootstrapFailure {
    pub fn exit_code(&self) -> i32 {
        self.error.exit_code()
    }
}
