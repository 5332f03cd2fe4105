// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Readiness signaling
//!
//! Both roles announce readiness through [`ReadinessNotifier`]. The backend
//! (supervisor message or local log line) is picked from configuration.

use async_trait::async_trait;

use crate::domain::bootstrap::ProcessRole;
use crate::domain::error::BootstrapError;

/// Message sent to a listening supervisor once the role is up.
pub const READY_PAYLOAD: &str = "Running";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessOutcome {
    /// The supervisor received the readiness message
    SupervisorNotified,
    /// Readiness was only written to the local log
    LoggedLocally,
}

#[async_trait]
pub trait ReadinessNotifier: Send + Sync {
    async fn notify_ready(&self, role: &ProcessRole) -> Result<ReadinessOutcome, BootstrapError>;
}
