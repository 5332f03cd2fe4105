// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Layer
//!
//! Pure types for process bootstrap. No I/O.
//!
//! | Module | Key Types |
//! |--------|-----------|
//! | [`project`] | `ProjectDefinition`, `ProjectSchema`, `NamespaceId` |
//! | [`namespace`] | `Namespace`, `Capabilities` |
//! | [`workspace`] | `WorkspaceSelector`, `LaunchFlags` |
//! | [`environment`] | `ProcessContext`, `EnvironmentConfig` |
//! | [`bootstrap`] | `BootstrapPhase`, `ProcessRole`, `BootstrapReport` |
//! | [`plugin`] | `ProjectPlugin`, `PluginError` |
//! | [`readiness`] | `ReadinessNotifier` |
//! | [`error`] | `BootstrapError`, `BootstrapFailure` |

pub mod bootstrap;
pub mod environment;
pub mod error;
pub mod namespace;
pub mod plugin;
pub mod project;
pub mod readiness;
pub mod workspace;
