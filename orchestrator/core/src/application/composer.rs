// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Namespace Composer
//!
//! Builds a [`Namespace`] from every project that contributes to it, walking
//! the schema in order. Later projects overwrite keys set by earlier ones.
//!
//! Composition is fail-fast and all-or-nothing: projects are merged into a
//! staging namespace, and the target is only touched once every contributor
//! has loaded. A failure is attributed to the project that caused it.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::error::BootstrapError;
use crate::domain::namespace::Namespace;
use crate::domain::project::{NamespaceId, ProjectSchema};
use crate::infrastructure::plugin_catalog::PluginCatalog;

#[derive(Clone)]
pub struct NamespaceComposer {
    catalog: Arc<PluginCatalog>,
}

impl NamespaceComposer {
    pub fn new(catalog: Arc<PluginCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn compose(
        &self,
        schema: &ProjectSchema,
        namespace: NamespaceId,
        target: &mut Namespace,
    ) -> Result<(), BootstrapError> {
        if target.id() != namespace {
            return Err(BootstrapError::Configuration(format!(
                "Cannot compose {} into a {} namespace",
                namespace,
                target.id()
            )));
        }

        let mut staging = Namespace::new(namespace);
        let mut contributors = 0usize;

        for project in schema.contributors(namespace) {
            let plugin = self
                .catalog
                .resolve(project, schema.base_dir())
                .map_err(|e| BootstrapError::plugin_load(&project.name, e))?;

            let capabilities = plugin
                .load(project, namespace)
                .await
                .map_err(|e| BootstrapError::plugin_load(&project.name, e))?;

            let exported = capabilities.len();
            let overwritten = staging.merge(&project.name, capabilities);
            if overwritten > 0 {
                warn!(
                    "Project '{}' overrides {} capabilities in {}",
                    project.name, overwritten, namespace
                );
            }
            debug!("Merged {} capabilities from '{}' into {}", exported, project.name, namespace);
            contributors += 1;
        }

        info!(
            "Composed {} namespace: {} projects, {} capabilities",
            namespace,
            contributors,
            staging.len()
        );
        target.absorb(staging);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::ProjectDefinition;
    use crate::infrastructure::plugin_catalog::StaticPlugin;
    use serde_json::json;

    #[tokio::test]
    async fn test_mismatched_target_is_rejected() {
        let composer = NamespaceComposer::new(Arc::new(PluginCatalog::new()));
        let mut target = Namespace::new(NamespaceId::Platform);

        let err = composer
            .compose(&ProjectSchema::default(), NamespaceId::Shared, &mut target)
            .await
            .unwrap_err();
        assert!(matches!(err, BootstrapError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_non_contributors_are_not_loaded() {
        // "Ghost" has no plugin; it must not be resolved for Shared
        let schema = ProjectSchema::new(vec![
            ProjectDefinition::new("Ghost").contributing_to(NamespaceId::TaskServer),
            ProjectDefinition::new("Foundations").contributing_to(NamespaceId::Shared),
        ]);
        let catalog = PluginCatalog::new().with_plugin(
            "Foundations",
            Arc::new(StaticPlugin::new().export(NamespaceId::Shared, "utilities", json!(1))),
        );

        let mut target = Namespace::new(NamespaceId::Shared);
        NamespaceComposer::new(Arc::new(catalog))
            .compose(&schema, NamespaceId::Shared, &mut target)
            .await
            .unwrap();
        assert_eq!(target.keys().collect::<Vec<_>>(), vec!["utilities"]);
    }
}
