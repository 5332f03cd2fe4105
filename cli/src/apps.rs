// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Host applications for the two process roles
//!
//! Both hosts take ownership of the bootstrap context on `start` and then
//! stay up until the process receives Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::signal;
use tracing::{info, warn};

use lodestar_core::application::{BootstrapContext, RoleApplication};
use lodestar_core::domain::workspace::WorkspaceSelector;

/// Interactive client host.
#[derive(Debug, Default)]
pub struct PlatformApp {
    context: Option<BootstrapContext>,
}

impl PlatformApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> Option<&BootstrapContext> {
        self.context.as_ref()
    }

    /// Workspace the client opens first.
    pub fn initial_workspace(&self) -> Option<&WorkspaceSelector> {
        self.context.as_ref().and_then(|c| c.workspace.as_ref())
    }
}

#[async_trait]
impl RoleApplication for PlatformApp {
    async fn start(&mut self, context: BootstrapContext) -> Result<()> {
        info!(
            "Platform v{} starting ({} platform, {} shared capabilities)",
            context.dependencies.version,
            context.role_namespace.len(),
            context.shared_namespace.len()
        );

        match context.workspace.as_ref() {
            Some(WorkspaceSelector::Plugin { project, name }) => {
                if !context.projects.contains(project) {
                    warn!("Workspace project '{}' is not in the project schema", project);
                }
                info!("Opening {} workspace {:?}", project, name);
            }
            Some(WorkspaceSelector::MyWorkspaces { name }) => {
                info!("Opening My-Workspaces {:?}", name);
            }
            Some(WorkspaceSelector::Unspecified) | None => {
                info!("No initial workspace selected");
            }
        }
        if context.flags.no_browser {
            info!("Browser launch disabled");
        }

        self.context = Some(context);
        Ok(())
    }

    async fn serve(&mut self) -> Result<()> {
        shutdown_signal().await;
        info!("Platform shutting down");
        Ok(())
    }
}

/// Headless task execution host.
#[derive(Debug, Default)]
pub struct TaskServerApp {
    context: Option<BootstrapContext>,
}

impl TaskServerApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> Option<&BootstrapContext> {
        self.context.as_ref()
    }
}

#[async_trait]
impl RoleApplication for TaskServerApp {
    async fn start(&mut self, context: BootstrapContext) -> Result<()> {
        let task_id = context
            .role
            .task_id()
            .context("Task server started without a task id")?;
        info!(
            "TaskServer v{} starting task '{}' ({} secrets loaded)",
            context.dependencies.version,
            task_id,
            context.secrets.as_ref().map(|s| s.len()).unwrap_or(0)
        );

        self.context = Some(context);
        Ok(())
    }

    async fn serve(&mut self) -> Result<()> {
        shutdown_signal().await;
        info!("TaskServer shutting down");
        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
