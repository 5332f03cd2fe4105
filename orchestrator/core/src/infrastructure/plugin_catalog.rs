// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Plugin Catalog - Typed registration table for project plugins
//
// Projects are resolved by entry key: a registered plugin for the project's
// `entryPath`, then one registered under the project name. When manifest
// fallback is enabled, an unregistered entry path is read as a declarative
// export manifest relative to the schema directory:
//
//   Shared:
//     utilities: { ... }
//   Platform:
//     designSpace: { ... }
//
// Namespaces missing from a manifest contribute nothing.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::domain::namespace::Capabilities;
use crate::domain::plugin::{PluginError, ProjectPlugin};
use crate::domain::project::{NamespaceId, ProjectDefinition};
use crate::infrastructure::schema_registry::SchemaFormat;

#[derive(Default, Clone)]
pub struct PluginCatalog {
    plugins: HashMap<String, Arc<dyn ProjectPlugin>>,
    manifest_fallback: bool,
}

impl PluginCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog that resolves unregistered entry paths as export manifests.
    pub fn with_manifest_fallback() -> Self {
        Self {
            plugins: HashMap::new(),
            manifest_fallback: true,
        }
    }

    pub fn register(&mut self, entry_key: impl Into<String>, plugin: Arc<dyn ProjectPlugin>) {
        let entry_key = entry_key.into();
        debug!("Registering plugin for entry '{}'", entry_key);
        self.plugins.insert(entry_key, plugin);
    }

    pub fn with_plugin(mut self, entry_key: impl Into<String>, plugin: Arc<dyn ProjectPlugin>) -> Self {
        self.register(entry_key, plugin);
        self
    }

    pub fn is_registered(&self, entry_key: &str) -> bool {
        self.plugins.contains_key(entry_key)
    }

    /// Resolve the plugin backing `project`. `schema_dir` anchors relative
    /// manifest paths.
    pub fn resolve(
        &self,
        project: &ProjectDefinition,
        schema_dir: Option<&Path>,
    ) -> Result<Arc<dyn ProjectPlugin>, PluginError> {
        if let Some(plugin) = project
            .entry_path
            .as_deref()
            .and_then(|entry| self.plugins.get(entry))
            .or_else(|| self.plugins.get(&project.name))
        {
            return Ok(plugin.clone());
        }

        match (&project.entry_path, self.manifest_fallback) {
            (Some(entry), true) => {
                let path = Path::new(entry);
                let path = match schema_dir {
                    Some(dir) if path.is_relative() => dir.join(path),
                    _ => path.to_path_buf(),
                };
                Ok(Arc::new(ManifestPlugin::new(path)))
            }
            _ => Err(PluginError::NotRegistered(project.entry_key().to_string())),
        }
    }
}

/// Plugin with a fixed, in-memory capability table per namespace.
#[derive(Debug, Clone, Default)]
pub struct StaticPlugin {
    exports: BTreeMap<NamespaceId, Capabilities>,
}

impl StaticPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn export(
        mut self,
        namespace: NamespaceId,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Self {
        self.exports
            .entry(namespace)
            .or_default()
            .insert(key.into(), value);
        self
    }
}

#[async_trait]
impl ProjectPlugin for StaticPlugin {
    async fn load(
        &self,
        _project: &ProjectDefinition,
        namespace: NamespaceId,
    ) -> Result<Capabilities, PluginError> {
        Ok(self.exports.get(&namespace).cloned().unwrap_or_default())
    }
}

/// Plugin whose exports are declared in a YAML/JSON manifest file.
#[derive(Debug, Clone)]
pub struct ManifestPlugin {
    path: PathBuf,
}

impl ManifestPlugin {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProjectPlugin for ManifestPlugin {
    async fn load(
        &self,
        project: &ProjectDefinition,
        namespace: NamespaceId,
    ) -> Result<Capabilities, PluginError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| PluginError::EntryNotFound(format!("{:?}: {}", self.path, e)))?;

        let mut exports: BTreeMap<NamespaceId, Capabilities> = match SchemaFormat::from_path(&self.path) {
            SchemaFormat::Json => serde_json::from_str(&content)
                .map_err(|e| PluginError::MalformedExports(format!("{:?}: {}", self.path, e)))?,
            SchemaFormat::Yaml => serde_yaml::from_str(&content)
                .map_err(|e| PluginError::MalformedExports(format!("{:?}: {}", self.path, e)))?,
        };

        let capabilities = exports.remove(&namespace).unwrap_or_default();
        debug!(
            "Manifest for '{}' exports {} capabilities to {}",
            project.name,
            capabilities.len(),
            namespace
        );
        Ok(capabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_registered_entry_path_takes_precedence() {
        let by_entry = StaticPlugin::new().export(NamespaceId::Shared, "source", json!("entry"));
        let by_name = StaticPlugin::new().export(NamespaceId::Shared, "source", json!("name"));
        let catalog = PluginCatalog::new()
            .with_plugin("Foundations/exports", Arc::new(by_entry))
            .with_plugin("Foundations", Arc::new(by_name));

        let project = ProjectDefinition::new("Foundations")
            .contributing_to(NamespaceId::Shared)
            .with_entry_path("Foundations/exports");

        let plugin = catalog.resolve(&project, None).unwrap();
        let caps = plugin.load(&project, NamespaceId::Shared).await.unwrap();
        assert_eq!(caps["source"], json!("entry"));

        let nameless_entry = ProjectDefinition::new("Foundations");
        let plugin = catalog.resolve(&nameless_entry, None).unwrap();
        let caps = plugin.load(&nameless_entry, NamespaceId::Shared).await.unwrap();
        assert_eq!(caps["source"], json!("name"));
    }

    #[test]
    fn test_unregistered_without_fallback_fails() {
        let catalog = PluginCatalog::new();
        let project = ProjectDefinition::new("Ghost").with_entry_path("Ghost/exports.yaml");
        assert!(matches!(
            catalog.resolve(&project, None),
            Err(PluginError::NotRegistered(key)) if key == "Ghost/exports.yaml"
        ));
    }

    #[tokio::test]
    async fn test_manifest_fallback_reads_relative_to_schema_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("Charts")).unwrap();
        std::fs::write(
            dir.path().join("Charts/exports.yaml"),
            "SA:\n  charting: { engine: canvas }\nPlatform:\n  chartSpace: true\n",
        )
        .unwrap();

        let catalog = PluginCatalog::with_manifest_fallback();
        let project = ProjectDefinition::new("Charts").with_entry_path("Charts/exports.yaml");
        let plugin = catalog.resolve(&project, Some(dir.path())).unwrap();

        let shared = plugin.load(&project, NamespaceId::Shared).await.unwrap();
        assert_eq!(shared["charting"], json!({"engine": "canvas"}));

        let task = plugin.load(&project, NamespaceId::TaskServer).await.unwrap();
        assert!(task.is_empty());
    }

    #[tokio::test]
    async fn test_manifest_missing_or_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let project = ProjectDefinition::new("Broken");

        let missing = ManifestPlugin::new(dir.path().join("missing.json"));
        assert!(matches!(
            missing.load(&project, NamespaceId::Shared).await,
            Err(PluginError::EntryNotFound(_))
        ));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"Nowhere": {}}"#).unwrap();
        assert!(matches!(
            ManifestPlugin::new(path).load(&project, NamespaceId::Shared).await,
            Err(PluginError::MalformedExports(_))
        ));
    }
}
