// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod dependency_bundle;
pub mod environment_resolver;
pub mod logging;
pub mod plugin_catalog;
pub mod readiness;
pub mod schema_registry;
pub mod secrets;

pub use dependency_bundle::DependencyBundle;
pub use environment_resolver::EnvironmentResolver;
pub use logging::{BootstrapLogger, LogHandle, LoggerFactory, TracingLoggerFactory};
pub use plugin_catalog::{ManifestPlugin, PluginCatalog, StaticPlugin};
pub use readiness::{LocalLogNotifier, ReadinessBackend, SupervisorNotifier};
pub use schema_registry::{ProjectSchemaRegistry, SchemaFormat};
pub use secrets::{DotenvSecrets, SecretStore, SecretsProvider};
