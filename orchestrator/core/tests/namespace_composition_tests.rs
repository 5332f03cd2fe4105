// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use lodestar_core::application::NamespaceComposer;
use lodestar_core::domain::error::BootstrapError;
use lodestar_core::domain::namespace::{Capabilities, Namespace};
use lodestar_core::domain::plugin::{PluginError, ProjectPlugin};
use lodestar_core::domain::project::{NamespaceId, ProjectDefinition, ProjectSchema};
use lodestar_core::infrastructure::{PluginCatalog, ProjectSchemaRegistry, SchemaFormat, StaticPlugin};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts how often it is asked to load.
struct CountingPlugin {
    loads: Arc<AtomicUsize>,
}

#[async_trait]
impl ProjectPlugin for CountingPlugin {
    async fn load(
        &self,
        _project: &ProjectDefinition,
        _namespace: NamespaceId,
    ) -> Result<Capabilities, PluginError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(Capabilities::new())
    }
}

struct BrokenPlugin;

#[async_trait]
impl ProjectPlugin for BrokenPlugin {
    async fn load(
        &self,
        _project: &ProjectDefinition,
        _namespace: NamespaceId,
    ) -> Result<Capabilities, PluginError> {
        Err(PluginError::Initialization("entry module threw".into()))
    }
}

fn schema(projects: &[(&str, &[NamespaceId])]) -> ProjectSchema {
    ProjectSchema::new(
        projects
            .iter()
            .map(|(name, namespaces)| {
                namespaces
                    .iter()
                    .fold(ProjectDefinition::new(*name), |p, ns| p.contributing_to(*ns))
            })
            .collect(),
    )
}

async fn compose(
    catalog: PluginCatalog,
    schema: &ProjectSchema,
    id: NamespaceId,
) -> Result<Namespace, BootstrapError> {
    let mut namespace = Namespace::new(id);
    NamespaceComposer::new(Arc::new(catalog))
        .compose(schema, id, &mut namespace)
        .await?;
    Ok(namespace)
}

#[tokio::test]
async fn test_later_project_wins_on_key_collision() {
    let schema = schema(&[
        ("Foundations", &[NamespaceId::Platform]),
        ("Theme", &[NamespaceId::Platform]),
    ]);
    let catalog = PluginCatalog::new()
        .with_plugin(
            "Foundations",
            Arc::new(
                StaticPlugin::new()
                    .export(NamespaceId::Platform, "theme", json!("light"))
                    .export(NamespaceId::Platform, "shell", json!("base")),
            ),
        )
        .with_plugin(
            "Theme",
            Arc::new(StaticPlugin::new().export(NamespaceId::Platform, "theme", json!("dark"))),
        );

    let namespace = compose(catalog, &schema, NamespaceId::Platform).await.unwrap();

    assert_eq!(namespace.get("theme"), Some(&json!("dark")));
    assert_eq!(namespace.provider_of("theme"), Some("Theme"));
    assert_eq!(namespace.provider_of("shell"), Some("Foundations"));
    assert_eq!(namespace.len(), 2);
}

#[tokio::test]
async fn test_composition_is_deterministic() {
    let schema = schema(&[
        ("A", &[NamespaceId::Shared]),
        ("B", &[NamespaceId::Shared]),
        ("C", &[NamespaceId::Shared]),
    ]);
    let catalog = PluginCatalog::new()
        .with_plugin("A", Arc::new(StaticPlugin::new().export(NamespaceId::Shared, "k", json!("a"))))
        .with_plugin("B", Arc::new(StaticPlugin::new().export(NamespaceId::Shared, "k", json!("b"))))
        .with_plugin("C", Arc::new(StaticPlugin::new().export(NamespaceId::Shared, "j", json!("c"))));

    let first = compose(catalog.clone(), &schema, NamespaceId::Shared).await.unwrap();
    let second = compose(catalog, &schema, NamespaceId::Shared).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.get("k"), Some(&json!("b")));
}

#[tokio::test]
async fn test_failure_leaves_target_untouched_and_stops_loading() {
    let schema = schema(&[
        ("Foundations", &[NamespaceId::TaskServer]),
        ("Broken", &[NamespaceId::TaskServer]),
        ("Later", &[NamespaceId::TaskServer]),
    ]);
    let later_loads = Arc::new(AtomicUsize::new(0));
    let catalog = PluginCatalog::new()
        .with_plugin(
            "Foundations",
            Arc::new(StaticPlugin::new().export(NamespaceId::TaskServer, "scheduler", json!(1))),
        )
        .with_plugin("Broken", Arc::new(BrokenPlugin))
        .with_plugin(
            "Later",
            Arc::new(CountingPlugin {
                loads: later_loads.clone(),
            }),
        );

    let mut target = Namespace::new(NamespaceId::TaskServer);
    let err = NamespaceComposer::new(Arc::new(catalog))
        .compose(&schema, NamespaceId::TaskServer, &mut target)
        .await
        .unwrap_err();

    match err {
        BootstrapError::PluginLoad { project, reason } => {
            assert_eq!(project, "Broken");
            assert!(reason.contains("entry module threw"));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(target.is_empty());
    assert_eq!(later_loads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_schema_yields_empty_namespaces() {
    for id in NamespaceId::ALL {
        let namespace = compose(PluginCatalog::new(), &ProjectSchema::default(), id)
            .await
            .unwrap();
        assert!(namespace.is_empty());
        assert_eq!(namespace.id(), id);
    }
}

#[tokio::test]
async fn test_legacy_namespace_codes_in_schema() {
    let schema = ProjectSchemaRegistry::parse_str(
        "- name: Foundations\n  contributesTo: [SA, PL]\n- name: Runner\n  contributesTo: [TS]\n",
        SchemaFormat::Yaml,
    )
    .unwrap();
    let catalog = PluginCatalog::new()
        .with_plugin(
            "Foundations",
            Arc::new(StaticPlugin::new().export(NamespaceId::Shared, "utilities", json!(true))),
        )
        .with_plugin(
            "Runner",
            Arc::new(StaticPlugin::new().export(NamespaceId::TaskServer, "runner", json!(true))),
        );

    let shared = compose(catalog.clone(), &schema, NamespaceId::Shared).await.unwrap();
    let task = compose(catalog, &schema, NamespaceId::TaskServer).await.unwrap();

    assert!(shared.contains("utilities"));
    assert!(task.contains("runner"));
    assert!(!task.contains("utilities"));
}
