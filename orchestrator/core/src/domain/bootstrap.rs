// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Bootstrap Domain Types
//!
//! A process runs exactly one [`ProcessRole`]. Each role walks the same
//! ordered [`BootstrapPhase`] sequence, with one role-specific step:
//!
//! | Phase | Platform | TaskServer |
//! |-------|:--------:|:----------:|
//! | `InitEnvironment` | ✓ | ✓ |
//! | `InitNamespaces` | ✓ | ✓ |
//! | `LoadDependencyBundle` | ✓ | ✓ |
//! | `InitLogger` | ✓ | ✓ |
//! | `LoadAppSchemas` | ✓ | ✓ |
//! | `InitSecrets` | | ✓ |
//! | `ParseWorkspaceArgs` | ✓ | |
//! | `StartApplication` | ✓ | ✓ |
//! | `SignalReady` | ✓ | ✓ |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

use crate::domain::error::BootstrapError;
use crate::domain::project::NamespaceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BootstrapPhase {
    InitEnvironment,
    InitNamespaces,
    LoadDependencyBundle,
    InitLogger,
    LoadAppSchemas,
    InitSecrets,
    ParseWorkspaceArgs,
    StartApplication,
    SignalReady,
}

impl BootstrapPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InitEnvironment => "INIT_ENVIRONMENT",
            Self::InitNamespaces => "INIT_NAMESPACES",
            Self::LoadDependencyBundle => "LOAD_DEPENDENCY_BUNDLE",
            Self::InitLogger => "INIT_LOGGER",
            Self::LoadAppSchemas => "LOAD_APP_SCHEMAS",
            Self::InitSecrets => "INIT_SECRETS",
            Self::ParseWorkspaceArgs => "PARSE_WORKSPACE_ARGS",
            Self::StartApplication => "START_APPLICATION",
            Self::SignalReady => "SIGNAL_READY",
        }
    }
}

impl fmt::Display for BootstrapPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum ProcessRole {
    /// Interactive client process
    Platform,
    /// Headless task execution process
    TaskServer { task_id: String },
}

impl ProcessRole {
    /// Task identifier used when the task role is started without one.
    pub const DEFAULT_TASK_ID: &'static str = "debug";

    pub fn task_server(task_id: Option<String>) -> Self {
        Self::TaskServer {
            task_id: task_id.unwrap_or_else(|| Self::DEFAULT_TASK_ID.to_string()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Platform => "Platform",
            Self::TaskServer { .. } => "TaskServer",
        }
    }

    /// Role-specific namespace.
    pub fn namespace(&self) -> NamespaceId {
        match self {
            Self::Platform => NamespaceId::Platform,
            Self::TaskServer { .. } => NamespaceId::TaskServer,
        }
    }

    /// Both namespaces this role initializes, role-specific first.
    pub fn namespaces(&self) -> [NamespaceId; 2] {
        [self.namespace(), NamespaceId::Shared]
    }

    pub fn phases(&self) -> Vec<BootstrapPhase> {
        use BootstrapPhase::*;

        let role_step = match self {
            Self::Platform => ParseWorkspaceArgs,
            Self::TaskServer { .. } => InitSecrets,
        };
        vec![
            InitEnvironment,
            InitNamespaces,
            LoadDependencyBundle,
            InitLogger,
            LoadAppSchemas,
            role_step,
            StartApplication,
            SignalReady,
        ]
    }

    /// `<logRoot>/Platform` or `<logRoot>/Tasks/<taskId>`.
    ///
    /// The task id must be a single plain path segment so the directory
    /// always stays under `<logRoot>/Tasks`.
    pub fn log_dir(&self, log_root: &Path) -> Result<PathBuf, BootstrapError> {
        match self {
            Self::Platform => Ok(log_root.join("Platform")),
            Self::TaskServer { task_id } => {
                let mut components = Path::new(task_id).components();
                match (components.next(), components.next()) {
                    (Some(Component::Normal(_)), None) => Ok(log_root.join("Tasks").join(task_id)),
                    _ => Err(BootstrapError::Configuration(format!(
                        "Task id '{}' must be a single path segment",
                        task_id
                    ))),
                }
            }
        }
    }

    pub fn log_prefix(&self) -> &'static str {
        match self {
            Self::Platform => "SA",
            Self::TaskServer { .. } => "TS",
        }
    }

    pub fn task_id(&self) -> Option<&str> {
        match self {
            Self::Platform => None,
            Self::TaskServer { task_id } => Some(task_id),
        }
    }
}

impl fmt::Display for ProcessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Platform => f.write_str("Platform"),
            Self::TaskServer { task_id } => write!(f, "TaskServer[{}]", task_id),
        }
    }
}

/// A completed bootstrap phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseRecord {
    pub phase: BootstrapPhase,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

/// Summary of a successful bootstrap run.
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapReport {
    pub run_id: Uuid,
    pub role: ProcessRole,
    pub phases: Vec<PhaseRecord>,
}

impl BootstrapReport {
    pub fn completed_phases(&self) -> Vec<BootstrapPhase> {
        self.phases.iter().map(|r| r.phase).collect()
    }

    pub fn total_elapsed(&self) -> Duration {
        self.phases.iter().map(|r| r.elapsed).sum()
    }
}
