// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Dependency Bundle - Shared third-party handles for a process role
//
// Built once during LOAD_DEPENDENCY_BUNDLE and handed to the application
// inside the bootstrap context. Plugins and the application reuse these
// handles instead of constructing their own clients.

use std::time::Duration;
use tracing::info;

use crate::domain::bootstrap::ProcessRole;
use crate::domain::error::BootstrapError;

/// Package version reported by both roles.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct DependencyBundle {
    /// Pooled HTTP client shared by the role
    pub http: reqwest::Client,
    pub version: &'static str,
    pub user_agent: String,
}

impl DependencyBundle {
    pub fn load(role: &ProcessRole) -> Result<Self, BootstrapError> {
        let user_agent = format!("lodestar-{}/{}", role.name().to_lowercase(), VERSION);

        let http = reqwest::Client::builder()
            .user_agent(user_agent.clone())
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| {
                BootstrapError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        info!("Dependency bundle ready ({})", user_agent);

        Ok(Self {
            http,
            version: VERSION,
            user_agent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_names_role() {
        let bundle = DependencyBundle::load(&ProcessRole::task_server(None)).unwrap();
        assert!(bundle.user_agent.starts_with("lodestar-taskserver/"));
        assert_eq!(bundle.version, VERSION);
    }
}
