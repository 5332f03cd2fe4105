// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod bootstrap;
pub mod composer;
pub mod context;
pub mod role;

pub use bootstrap::{BootstrapSequencer, RunningRole};
pub use composer::NamespaceComposer;
pub use context::BootstrapContext;
pub use role::RoleApplication;
