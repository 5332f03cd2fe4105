// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Project Schema Registry - Schema loading and name lookup
//
// The schema file is an ordered array of project definitions. `.yaml`/`.yml`
// files are parsed as YAML, anything else as JSON.
//
// Lookup is keyed by project name. Duplicate names are not an error: the
// entry that appears later in the schema wins.

use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::domain::error::BootstrapError;
use crate::domain::project::{NamespaceId, ProjectDefinition, ProjectSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Json,
    Yaml,
}

impl SchemaFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Name-keyed view over a loaded [`ProjectSchema`]
#[derive(Debug, Clone)]
pub struct ProjectSchemaRegistry {
    schema: ProjectSchema,
    index: HashMap<String, usize>,
}

impl ProjectSchemaRegistry {
    /// Load a schema file. Fails with a configuration error when the file is
    /// missing or malformed; no partial schema is ever returned.
    pub fn load(path: &Path) -> Result<ProjectSchema, BootstrapError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BootstrapError::Configuration(format!(
                "Failed to read project schema {:?}: {}",
                path, e
            ))
        })?;

        let schema = Self::parse_str(&content, SchemaFormat::from_path(path))
            .map_err(|e| match e {
                BootstrapError::Configuration(msg) => {
                    BootstrapError::Configuration(format!("{:?}: {}", path, msg))
                }
                other => other,
            })?
            .with_source(path);

        info!("Loaded project schema {:?} ({} projects)", path, schema.len());
        Ok(schema)
    }

    pub fn parse_str(content: &str, format: SchemaFormat) -> Result<ProjectSchema, BootstrapError> {
        let projects: Vec<ProjectDefinition> = match format {
            SchemaFormat::Json => serde_json::from_str(content)
                .map_err(|e| BootstrapError::Configuration(format!("Malformed project schema: {}", e)))?,
            SchemaFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| BootstrapError::Configuration(format!("Malformed project schema: {}", e)))?,
        };

        if let Some(position) = projects.iter().position(|p| p.name.trim().is_empty()) {
            return Err(BootstrapError::Configuration(format!(
                "Project at position {} has an empty name",
                position
            )));
        }

        Ok(ProjectSchema::new(projects))
    }

    pub fn new(schema: ProjectSchema) -> Self {
        let mut index = HashMap::with_capacity(schema.len());
        for (position, project) in schema.iter().enumerate() {
            if let Some(previous) = index.insert(project.name.clone(), position) {
                warn!(
                    "Project '{}' declared more than once (positions {} and {}); the later entry wins",
                    project.name, previous, position
                );
            }
        }
        Self { schema, index }
    }

    pub fn lookup(&self, name: &str) -> Option<&ProjectDefinition> {
        self.index
            .get(name)
            .and_then(|&position| self.schema.projects().get(position))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Distinct project names in schema order of their winning entry.
    pub fn names(&self) -> Vec<&str> {
        let mut winners: Vec<(usize, &str)> = self
            .index
            .iter()
            .map(|(name, &position)| (position, name.as_str()))
            .collect();
        winners.sort_unstable();
        winners.into_iter().map(|(_, name)| name).collect()
    }

    pub fn contributors(&self, namespace: NamespaceId) -> impl Iterator<Item = &ProjectDefinition> {
        self.schema.contributors(namespace)
    }

    pub fn schema(&self) -> &ProjectSchema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
