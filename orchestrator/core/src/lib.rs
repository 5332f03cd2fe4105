// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Lodestar core
//!
//! Bootstraps the two long-lived process roles (the interactive platform and
//! the headless task server) from a project schema.
//!
//! # Architecture
//!
//! - **domain**: roles, phases, namespaces, project schema, workspace selection
//! - **application**: the bootstrap sequencer and namespace composer
//! - **infrastructure**: environment discovery, schema loading, plugins, logging,
//!   secrets and readiness backends

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
