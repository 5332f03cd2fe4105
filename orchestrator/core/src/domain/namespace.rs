// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Namespace
//!
//! A namespace is the capability surface built from every project that
//! contributes to a given [`NamespaceId`]. Each entry remembers which project
//! provided it.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::project::NamespaceId;

/// Capability set exported by one project for one namespace.
pub type Capabilities = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamespaceEntry {
    /// Name of the project that contributed the value
    pub provider: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Namespace {
    id: NamespaceId,
    entries: BTreeMap<String, NamespaceEntry>,
}

impl Namespace {
    pub fn new(id: NamespaceId) -> Self {
        Self {
            id,
            entries: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> NamespaceId {
        self.id
    }

    /// Merge a project's capabilities. Existing keys are overwritten.
    /// Returns the number of keys that replaced an earlier contribution.
    pub fn merge(&mut self, provider: &str, capabilities: Capabilities) -> usize {
        let mut overwritten = 0;
        for (key, value) in capabilities {
            let entry = NamespaceEntry {
                provider: provider.to_string(),
                value,
            };
            if self.entries.insert(key, entry).is_some() {
                overwritten += 1;
            }
        }
        overwritten
    }

    /// Move every entry of `other` into this namespace, last-write-wins.
    pub fn absorb(&mut self, other: Namespace) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.entries.get(key).map(|e| &e.value)
    }

    pub fn provider_of(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.provider.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NamespaceEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
