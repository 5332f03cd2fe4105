// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! `lodestar platform` - start the interactive role

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use lodestar_core::application::BootstrapSequencer;
use lodestar_core::domain::bootstrap::ProcessRole;
use lodestar_core::domain::environment::ProcessContext;

use super::console_logger;
use crate::apps::PlatformApp;

pub async fn run(args: Vec<String>, process: ProcessContext) -> Result<()> {
    let logger = console_logger(&process)?;

    let running = BootstrapSequencer::new(ProcessRole::Platform, process)
        .with_logger_factory(Arc::new(logger))
        .with_args(args)
        .launch(PlatformApp::new())
        .await?;

    info!(
        "Platform ready after {:?} (run {})",
        running.report().total_elapsed(),
        running.report().run_id
    );

    running.serve().await?;
    Ok(())
}
