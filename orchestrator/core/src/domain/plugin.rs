// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Project plugin interface
//!
//! Every project contributing to a namespace is backed by a [`ProjectPlugin`].
//! Implementations live in infrastructure (static registrations, declarative
//! manifests); the composer only sees this trait.

use async_trait::async_trait;

use crate::domain::namespace::Capabilities;
use crate::domain::project::{NamespaceId, ProjectDefinition};

#[async_trait]
pub trait ProjectPlugin: Send + Sync {
    /// Load the capability set `project` exposes for `namespace`.
    /// An empty set is a valid answer.
    async fn load(
        &self,
        project: &ProjectDefinition,
        namespace: NamespaceId,
    ) -> Result<Capabilities, PluginError>;
}

/// Errors that can occur while loading a project's plugin
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("No plugin registered for entry '{0}'")]
    NotRegistered(String),

    #[error("Entry module not found: {0}")]
    EntryNotFound(String),

    #[error("Malformed exports: {0}")]
    MalformedExports(String),

    #[error("Initialization failed: {0}")]
    Initialization(String),
}
