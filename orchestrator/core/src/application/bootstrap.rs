// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Bootstrap Sequencer
//!
//! Drives one process role through its ordered phases:
//!
//! ```text
//! INIT_ENVIRONMENT → INIT_NAMESPACES → LOAD_DEPENDENCY_BUNDLE → INIT_LOGGER
//!   → LOAD_APP_SCHEMAS → [INIT_SECRETS | PARSE_WORKSPACE_ARGS]
//!   → START_APPLICATION → SIGNAL_READY
//! ```
//!
//! Phases run strictly one after another. The first failure aborts bootstrap
//! with a [`BootstrapFailure`] naming the phase; nothing is retried.
//!
//! `INIT_NAMESPACES` reads the project schema file because composition needs
//! it; `LOAD_APP_SCHEMAS` then indexes the same schema by name for the
//! application.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, info_span, Instrument, Span};
use uuid::Uuid;

use crate::application::composer::NamespaceComposer;
use crate::application::context::BootstrapContext;
use crate::application::role::RoleApplication;
use crate::domain::bootstrap::{BootstrapPhase, BootstrapReport, PhaseRecord, ProcessRole};
use crate::domain::environment::ProcessContext;
use crate::domain::error::{BootstrapError, BootstrapFailure};
use crate::domain::namespace::Namespace;
use crate::domain::readiness::ReadinessNotifier;
use crate::domain::workspace::{LaunchFlags, WorkspaceSelector};
use crate::infrastructure::dependency_bundle::DependencyBundle;
use crate::infrastructure::environment_resolver::EnvironmentResolver;
use crate::infrastructure::logging::{LoggerFactory, TracingLoggerFactory};
use crate::infrastructure::plugin_catalog::PluginCatalog;
use crate::infrastructure::readiness::ReadinessBackend;
use crate::infrastructure::schema_registry::ProjectSchemaRegistry;
use crate::infrastructure::secrets::{DotenvSecrets, SecretsProvider};

pub struct BootstrapSequencer {
    role: ProcessRole,
    process: ProcessContext,
    args: Vec<String>,
    catalog: Arc<PluginCatalog>,
    logger_factory: Arc<dyn LoggerFactory>,
    secrets: Option<Arc<dyn SecretsProvider>>,
    notifier: Option<Arc<dyn ReadinessNotifier>>,
}

impl BootstrapSequencer {
    pub fn new(role: ProcessRole, process: ProcessContext) -> Self {
        Self {
            role,
            process,
            args: Vec::new(),
            catalog: Arc::new(PluginCatalog::with_manifest_fallback()),
            logger_factory: Arc::new(TracingLoggerFactory),
            secrets: None,
            notifier: None,
        }
    }

    /// Raw launch arguments, read by the interactive role only.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_catalog(mut self, catalog: PluginCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    pub fn with_logger_factory(mut self, factory: Arc<dyn LoggerFactory>) -> Self {
        self.logger_factory = factory;
        self
    }

    /// Override the secrets provider (default reads the configured secrets file).
    pub fn with_secrets_provider(mut self, provider: Arc<dyn SecretsProvider>) -> Self {
        self.secrets = Some(provider);
        self
    }

    /// Override the readiness backend chosen for the role.
    pub fn with_notifier(mut self, notifier: Arc<dyn ReadinessNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn role(&self) -> &ProcessRole {
        &self.role
    }

    /// Run every bootstrap phase and start `app`. Returns once the role has
    /// signalled readiness; call [`RunningRole::serve`] to keep it running.
    pub async fn launch<A: RoleApplication>(self, app: A) -> Result<RunningRole<A>, BootstrapFailure> {
        let run_id = Uuid::new_v4();
        let span = info_span!("bootstrap", %run_id, role = %self.role);
        self.run_phases(run_id, app).instrument(span).await
    }

    async fn run_phases<A: RoleApplication>(
        self,
        run_id: Uuid,
        mut app: A,
    ) -> Result<RunningRole<A>, BootstrapFailure> {
        let Self {
            role,
            process,
            args,
            catalog,
            logger_factory,
            secrets,
            notifier,
        } = self;
        let mut tracker = PhaseTracker::new(role.name());

        tracker.enter(BootstrapPhase::InitEnvironment);
        let environment = tracker
            .span()
            .in_scope(|| EnvironmentResolver::resolve(&process))
            .map_err(|e| tracker.fail(e))?;
        tracker.complete();

        tracker.enter(BootstrapPhase::InitNamespaces);
        let schema = tracker
            .span()
            .in_scope(|| ProjectSchemaRegistry::load(&environment.project_schema_path))
            .map_err(|e| tracker.fail(e))?;
        let composer = NamespaceComposer::new(catalog);
        let [role_id, shared_id] = role.namespaces();
        let mut role_namespace = Namespace::new(role_id);
        composer
            .compose(&schema, role_id, &mut role_namespace)
            .instrument(tracker.span())
            .await
            .map_err(|e| tracker.fail(e))?;
        let mut shared_namespace = Namespace::new(shared_id);
        composer
            .compose(&schema, shared_id, &mut shared_namespace)
            .instrument(tracker.span())
            .await
            .map_err(|e| tracker.fail(e))?;
        tracker.complete();

        tracker.enter(BootstrapPhase::LoadDependencyBundle);
        let dependencies = tracker
            .span()
            .in_scope(|| DependencyBundle::load(&role))
            .map_err(|e| tracker.fail(e))?;
        tracker.complete();

        tracker.enter(BootstrapPhase::InitLogger);
        let log = tracker
            .span()
            .in_scope(|| {
                let directory = role.log_dir(&environment.log_files_path)?;
                logger_factory.build(&directory, role.log_prefix(), &environment.log_level)
            })
            .map_err(|e| tracker.fail(e))?;
        info!("Logging to {:?}", log.file);
        tracker.complete();

        tracker.enter(BootstrapPhase::LoadAppSchemas);
        let projects = ProjectSchemaRegistry::new(schema);
        info!("Project registry ready: {} projects", projects.len());
        tracker.complete();

        let mut secret_store = None;
        let mut workspace = None;
        let mut flags = LaunchFlags::default();

        match &role {
            ProcessRole::TaskServer { .. } => {
                tracker.enter(BootstrapPhase::InitSecrets);
                let provider = secrets.unwrap_or_else(|| {
                    Arc::new(DotenvSecrets::new(environment.secrets_path.clone()))
                        as Arc<dyn SecretsProvider>
                });
                secret_store = Some(
                    provider
                        .initialize()
                        .instrument(tracker.span())
                        .await
                        .map_err(|e| tracker.fail(e))?,
                );
                tracker.complete();
            }
            ProcessRole::Platform => {
                tracker.enter(BootstrapPhase::ParseWorkspaceArgs);
                let selector = WorkspaceSelector::parse(&args);
                flags = LaunchFlags::parse(&args);
                info!("Initial workspace: {:?} ({:?})", selector, flags);
                workspace = Some(selector);
                tracker.complete();
            }
        }

        let notifier = notifier
            .unwrap_or_else(|| ReadinessBackend::for_role(&role).notifier(&environment));

        tracker.enter(BootstrapPhase::StartApplication);
        let context = BootstrapContext {
            run_id,
            role: role.clone(),
            environment,
            role_namespace,
            shared_namespace,
            dependencies,
            log,
            projects,
            secrets: secret_store,
            workspace,
            flags,
        };
        app.start(context)
            .instrument(tracker.span())
            .await
            .map_err(|e| tracker.fail(BootstrapError::ApplicationStart(format!("{:#}", e))))?;
        tracker.complete();

        tracker.enter(BootstrapPhase::SignalReady);
        let outcome = notifier
            .notify_ready(&role)
            .instrument(tracker.span())
            .await
            .map_err(|e| tracker.fail(e))?;
        debug!("Readiness outcome: {:?}", outcome);
        tracker.complete();

        let report = BootstrapReport {
            run_id,
            role,
            phases: tracker.into_records(),
        };
        info!("Bootstrap complete in {:?}", report.total_elapsed());

        Ok(RunningRole { app, report })
    }
}

/// A role that finished bootstrap and signalled readiness.
pub struct RunningRole<A> {
    app: A,
    report: BootstrapReport,
}

impl<A: RoleApplication> RunningRole<A> {
    pub fn report(&self) -> &BootstrapReport {
        &self.report
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn into_parts(self) -> (A, BootstrapReport) {
        (self.app, self.report)
    }

    /// Run the application until it returns.
    pub async fn serve(mut self) -> anyhow::Result<BootstrapReport> {
        self.app.serve().await?;
        Ok(self.report)
    }
}

struct PhaseTracker {
    role: &'static str,
    current: Option<(BootstrapPhase, Instant, DateTime<Utc>, Span)>,
    records: Vec<PhaseRecord>,
}

impl PhaseTracker {
    fn new(role: &'static str) -> Self {
        Self {
            role,
            current: None,
            records: Vec::new(),
        }
    }

    fn enter(&mut self, phase: BootstrapPhase) {
        debug!("Entering {}", phase);
        let span = info_span!("phase", phase = phase.as_str());
        self.current = Some((phase, Instant::now(), Utc::now(), span));
    }

    /// Span of the phase in progress.
    fn span(&self) -> Span {
        self.current
            .as_ref()
            .map(|(_, _, _, span)| span.clone())
            .unwrap_or_else(Span::none)
    }

    fn complete(&mut self) {
        if let Some((phase, started, started_at, _)) = self.current.take() {
            let elapsed = started.elapsed();
            metrics::histogram!(
                "lodestar_bootstrap_phase_seconds",
                "phase" => phase.as_str(),
                "role" => self.role
            )
            .record(elapsed.as_secs_f64());
            debug!("Completed {} in {:?}", phase, elapsed);
            self.records.push(PhaseRecord {
                phase,
                started_at,
                elapsed,
            });
        }
    }

    fn fail(&mut self, error: BootstrapError) -> BootstrapFailure {
        let phase = self
            .current
            .take()
            .map(|(phase, ..)| phase)
            .unwrap_or(BootstrapPhase::InitEnvironment);
        metrics::counter!(
            "lodestar_bootstrap_failures_total",
            "phase" => phase.as_str(),
            "role" => self.role
        )
        .increment(1);
        error!("Bootstrap failed during {}: {}", phase, error);
        BootstrapFailure { phase, error }
    }

    fn into_records(self) -> Vec<PhaseRecord> {
        self.records
    }
}
