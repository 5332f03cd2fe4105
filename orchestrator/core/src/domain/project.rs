// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Project Schema Domain Types
//!
//! A **project** is an independently developed plugin unit declared in the
//! project schema file. The schema is an ordered list; its order is the
//! composition order for every namespace.
//!
//! - [`NamespaceId`]: the capability surfaces a project can contribute to.
//! - [`ProjectDefinition`]: one schema record, identified by `name`.
//! - [`ProjectSchema`]: the ordered, read-only sequence of definitions.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Capability surface a project can contribute code to.
///
/// Accepts the legacy short codes (`PL`, `TS`, `SA`) on input so older schema
/// files keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NamespaceId {
    /// Interactive client surface.
    #[serde(alias = "PL")]
    Platform,
    /// Headless task execution surface.
    #[serde(alias = "TS")]
    TaskServer,
    /// Surface shared by both process roles.
    #[serde(alias = "SA")]
    Shared,
}

impl NamespaceId {
    pub const ALL: [NamespaceId; 3] = [Self::Platform, Self::TaskServer, Self::Shared];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Platform => "Platform",
            Self::TaskServer => "TaskServer",
            Self::Shared => "Shared",
        }
    }

    /// Short code used by older schema files.
    pub fn legacy_code(&self) -> &'static str {
        match self {
            Self::Platform => "PL",
            Self::TaskServer => "TS",
            Self::Shared => "SA",
        }
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamespaceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s || id.legacy_code() == s)
            .ok_or_else(|| format!("Unknown namespace '{}'", s))
    }
}

/// One record of the project schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDefinition {
    /// Unique project name (identity within a schema)
    pub name: String,

    /// Namespaces this project merges capabilities into
    #[serde(default)]
    pub contributes_to: BTreeSet<NamespaceId>,

    /// Entry module key used to resolve the project's plugin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_path: Option<String>,

    /// Any other schema-declared fields, kept verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ProjectDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contributes_to: BTreeSet::new(),
            entry_path: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn contributing_to(mut self, namespace: NamespaceId) -> Self {
        self.contributes_to.insert(namespace);
        self
    }

    pub fn with_entry_path(mut self, entry_path: impl Into<String>) -> Self {
        self.entry_path = Some(entry_path.into());
        self
    }

    pub fn contributes(&self, namespace: NamespaceId) -> bool {
        self.contributes_to.contains(&namespace)
    }

    /// Key used to look the project up in a plugin catalog.
    /// Falls back to the project name when no entry path is declared.
    pub fn entry_key(&self) -> &str {
        self.entry_path.as_deref().unwrap_or(&self.name)
    }
}

/// Ordered project schema. Order is composition precedence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectSchema {
    projects: Vec<ProjectDefinition>,
    source: Option<PathBuf>,
}

impl ProjectSchema {
    pub fn new(projects: Vec<ProjectDefinition>) -> Self {
        Self {
            projects,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// File the schema was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Directory relative entry paths are resolved against.
    pub fn base_dir(&self) -> Option<&Path> {
        self.source.as_deref().and_then(Path::parent)
    }

    pub fn projects(&self) -> &[ProjectDefinition] {
        &self.projects
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectDefinition> {
        self.projects.iter()
    }

    /// Projects contributing to `namespace`, in schema order.
    pub fn contributors(&self, namespace: NamespaceId) -> impl Iterator<Item = &ProjectDefinition> {
        self.projects.iter().filter(move |p| p.contributes(namespace))
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
