// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Bootstrap context
//!
//! Everything bootstrap produced, handed by value to the role application.
//! Replaces process-wide globals: the application owns its namespaces.

use uuid::Uuid;

use crate::domain::bootstrap::ProcessRole;
use crate::domain::environment::EnvironmentConfig;
use crate::domain::namespace::Namespace;
use crate::domain::workspace::{LaunchFlags, WorkspaceSelector};
use crate::infrastructure::dependency_bundle::DependencyBundle;
use crate::infrastructure::logging::LogHandle;
use crate::infrastructure::schema_registry::ProjectSchemaRegistry;
use crate::infrastructure::secrets::SecretStore;

#[derive(Debug)]
pub struct BootstrapContext {
    pub run_id: Uuid,
    pub role: ProcessRole,
    pub environment: EnvironmentConfig,
    /// `Platform` or `TaskServer`, depending on role
    pub role_namespace: Namespace,
    pub shared_namespace: Namespace,
    pub dependencies: DependencyBundle,
    pub log: LogHandle,
    pub projects: ProjectSchemaRegistry,
    /// Task role only
    pub secrets: Option<SecretStore>,
    /// Interactive role only
    pub workspace: Option<WorkspaceSelector>,
    pub flags: LaunchFlags,
}
