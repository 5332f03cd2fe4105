// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use anyhow::Result;
use async_trait::async_trait;

use crate::application::context::BootstrapContext;

/// The role-specific application started at the end of bootstrap.
///
/// `start` receives the fully composed context and must return once the
/// application is up; `serve` then runs until shutdown.
#[async_trait]
pub trait RoleApplication: Send {
    async fn start(&mut self, context: BootstrapContext) -> Result<()>;

    async fn serve(&mut self) -> Result<()> {
        Ok(())
    }
}
