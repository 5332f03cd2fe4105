// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! `lodestar task-server` - start the headless task role

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use lodestar_core::application::BootstrapSequencer;
use lodestar_core::domain::bootstrap::ProcessRole;
use lodestar_core::domain::environment::ProcessContext;

use super::console_logger;
use crate::apps::TaskServerApp;

pub async fn run(task_id: Option<String>, process: ProcessContext) -> Result<()> {
    let role = ProcessRole::task_server(task_id);

    let logger = console_logger(&process)?;

    let running = BootstrapSequencer::new(role, process)
        .with_logger_factory(Arc::new(logger))
        .launch(TaskServerApp::new())
        .await?;

    info!(
        "TaskServer ready after {:?} (run {})",
        running.report().total_elapsed(),
        running.report().run_id
    );

    running.serve().await?;
    Ok(())
}
