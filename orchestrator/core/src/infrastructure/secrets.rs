// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Secrets initialization hook
//!
//! The task role initializes its secrets before the application starts.
//! Storage mechanics are out of scope here: [`SecretsProvider`] is the hook,
//! and [`DotenvSecrets`] is the default provider reading `KEY=value` pairs
//! from the configured secrets file.
//!
//! A role without a configured secrets file starts with an empty store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::domain::error::BootstrapError;

/// Read-only secret values. `Debug` never prints values.
#[derive(Clone, Default)]
pub struct SecretStore {
    values: Arc<HashMap<String, String>>,
}

impl SecretStore {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self {
            values: Arc::new(values),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for SecretStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("SecretStore").field("keys", &keys).finish()
    }
}

#[async_trait]
pub trait SecretsProvider: Send + Sync {
    async fn initialize(&self) -> Result<SecretStore, BootstrapError>;
}

pub struct DotenvSecrets {
    path: Option<PathBuf>,
}

impl DotenvSecrets {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait]
impl SecretsProvider for DotenvSecrets {
    async fn initialize(&self) -> Result<SecretStore, BootstrapError> {
        let Some(path) = &self.path else {
            info!("No secrets file configured; starting with an empty secret store");
            return Ok(SecretStore::default());
        };

        let iter = dotenvy::from_path_iter(path).map_err(|e| {
            BootstrapError::Configuration(format!("Failed to open secrets file {:?}: {}", path, e))
        })?;

        let mut values = HashMap::new();
        for item in iter {
            let (key, value) = item.map_err(|e| {
                BootstrapError::Configuration(format!("Malformed secrets file {:?}: {}", path, e))
            })?;
            values.insert(key, value);
        }

        info!("Loaded {} secrets from {:?}", values.len(), path);
        Ok(SecretStore::new(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_secrets_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.env");
        std::fs::write(&path, "EXCHANGE_KEY=abc\nEXCHANGE_SECRET=\"s3cr3t\"\n").unwrap();

        let store = DotenvSecrets::new(Some(path)).initialize().await.unwrap();
        assert_eq!(store.get("EXCHANGE_KEY"), Some("abc"));
        assert_eq!(store.get("EXCHANGE_SECRET"), Some("s3cr3t"));
        assert!(!format!("{:?}", store).contains("s3cr3t"));
    }

    #[tokio::test]
    async fn test_no_path_yields_empty_store() {
        let store = DotenvSecrets::new(None).initialize().await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DotenvSecrets::new(Some(dir.path().join("missing.env")))
            .initialize()
            .await
            .unwrap_err();
        assert!(matches!(err, BootstrapError::Configuration(_)));
    }
}
