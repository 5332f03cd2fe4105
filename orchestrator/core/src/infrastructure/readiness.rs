// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Readiness Notifiers - Supervisor message and local log backends
//
// The supervisor backend connects to the configured supervisor address and
// writes the readiness payload as a single line. With no supervisor
// configured it degrades to a log line, since nobody is listening.

use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::domain::bootstrap::ProcessRole;
use crate::domain::environment::EnvironmentConfig;
use crate::domain::error::BootstrapError;
use crate::domain::readiness::{ReadinessNotifier, ReadinessOutcome, READY_PAYLOAD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessBackend {
    Supervisor,
    LocalLog,
}

impl ReadinessBackend {
    /// The interactive role reports to its supervisor; the task role logs.
    pub fn for_role(role: &ProcessRole) -> Self {
        match role {
            ProcessRole::Platform => Self::Supervisor,
            ProcessRole::TaskServer { .. } => Self::LocalLog,
        }
    }

    pub fn notifier(self, env: &EnvironmentConfig) -> Arc<dyn ReadinessNotifier> {
        match self {
            Self::Supervisor => Arc::new(SupervisorNotifier::new(env.supervisor_addr)),
            Self::LocalLog => Arc::new(LocalLogNotifier),
        }
    }
}

pub struct SupervisorNotifier {
    addr: Option<SocketAddr>,
}

impl SupervisorNotifier {
    pub fn new(addr: Option<SocketAddr>) -> Self {
        Self { addr }
    }
}

#[async_trait]
impl ReadinessNotifier for SupervisorNotifier {
    async fn notify_ready(&self, role: &ProcessRole) -> Result<ReadinessOutcome, BootstrapError> {
        info!("Lodestar {} is {}!", role, READY_PAYLOAD);

        let Some(addr) = self.addr else {
            debug!("No supervisor listening; readiness logged only");
            return Ok(ReadinessOutcome::LoggedLocally);
        };

        let mut stream = TcpStream::connect(addr).await.map_err(|e| {
            BootstrapError::Readiness(format!("Failed to reach supervisor at {}: {}", addr, e))
        })?;
        stream
            .write_all(format!("{}\n", READY_PAYLOAD).as_bytes())
            .await
            .map_err(|e| BootstrapError::Readiness(format!("Failed to notify supervisor: {}", e)))?;
        stream
            .shutdown()
            .await
            .map_err(|e| BootstrapError::Readiness(format!("Failed to notify supervisor: {}", e)))?;

        debug!("Supervisor at {} notified", addr);
        Ok(ReadinessOutcome::SupervisorNotified)
    }
}

pub struct LocalLogNotifier;

#[async_trait]
impl ReadinessNotifier for LocalLogNotifier {
    async fn notify_ready(&self, role: &ProcessRole) -> Result<ReadinessOutcome, BootstrapError> {
        info!("Lodestar {} is {}!", role, READY_PAYLOAD);
        Ok(ReadinessOutcome::LoggedLocally)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_supervisor_receives_running() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let accept = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = String::new();
            socket.read_to_string(&mut received).await.unwrap();
            received
        });

        let outcome = SupervisorNotifier::new(Some(addr))
            .notify_ready(&ProcessRole::Platform)
            .await
            .unwrap();

        assert_eq!(outcome, ReadinessOutcome::SupervisorNotified);
        assert_eq!(accept.await.unwrap(), "Running\n");
    }

    #[tokio::test]
    async fn test_without_supervisor_only_logs() {
        let outcome = SupervisorNotifier::new(None)
            .notify_ready(&ProcessRole::Platform)
            .await
            .unwrap();
        assert_eq!(outcome, ReadinessOutcome::LoggedLocally);
    }

    #[tokio::test]
    async fn test_unreachable_supervisor_is_readiness_error() {
        // Bind then drop to get a port nobody listens on
        let addr = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap()
            .local_addr()
            .unwrap();

        let err = SupervisorNotifier::new(Some(addr))
            .notify_ready(&ProcessRole::Platform)
            .await
            .unwrap_err();
        assert!(matches!(err, BootstrapError::Readiness(_)));
    }

    #[test]
    fn test_backend_per_role() {
        assert_eq!(
            ReadinessBackend::for_role(&ProcessRole::Platform),
            ReadinessBackend::Supervisor
        );
        assert_eq!(
            ReadinessBackend::for_role(&ProcessRole::task_server(None)),
            ReadinessBackend::LocalLog
        );
    }
}
