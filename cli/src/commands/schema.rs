// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Project schema commands
//!
//! Commands: show, validate, lookup

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::sync::Arc;

use lodestar_core::application::NamespaceComposer;
use lodestar_core::domain::environment::{
    EnvironmentConfig, ProcessContext, ENV_BASE_PATH, ENV_FILE, ENV_PROJECT_SCHEMA,
};
use lodestar_core::domain::namespace::Namespace;
use lodestar_core::domain::project::NamespaceId;
use lodestar_core::infrastructure::{EnvironmentResolver, PluginCatalog, ProjectSchemaRegistry};

#[derive(Subcommand)]
pub enum SchemaCommand {
    /// Show the resolved project schema
    Show {
        /// Show how the schema path was resolved
        #[arg(long)]
        paths: bool,
    },

    /// Load the schema and compose every namespace without starting a role
    Validate,

    /// Print one project definition as JSON
    Lookup {
        /// Project name
        #[arg(value_name = "NAME")]
        name: String,
    },
}

/// Result of a dry-run composition of one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceSummary {
    pub namespace: NamespaceId,
    pub contributors: usize,
    pub capabilities: Vec<String>,
}

pub async fn handle_command(command: SchemaCommand, process: ProcessContext) -> Result<()> {
    match command {
        SchemaCommand::Show { paths } => show(&process, paths),
        SchemaCommand::Validate => validate(&process).await,
        SchemaCommand::Lookup { name } => lookup(&process, &name),
    }
}

fn load_registry(process: &ProcessContext) -> Result<(EnvironmentConfig, ProjectSchemaRegistry)> {
    let environment =
        EnvironmentResolver::resolve(process).context("Failed to resolve environment")?;
    let schema = ProjectSchemaRegistry::load(&environment.project_schema_path)
        .context("Failed to load project schema")?;
    Ok((environment, ProjectSchemaRegistry::new(schema)))
}

fn show(process: &ProcessContext, show_paths: bool) -> Result<()> {
    let (environment, registry) = load_registry(process)?;

    if show_paths {
        println!("{}", "Environment resolution:".bold());
        for key in [ENV_BASE_PATH, ENV_FILE, ENV_PROJECT_SCHEMA] {
            println!(
                "  {}: {}",
                key,
                process.var(key).unwrap_or("(not set)").dimmed()
            );
        }
        println!("  Base path: {}", environment.base_path.display());
        println!();
    }

    println!(
        "{} {}",
        "Project schema:".bold(),
        environment.project_schema_path.display()
    );
    println!();

    for name in registry.names() {
        let Some(project) = registry.lookup(name) else {
            continue;
        };
        let namespaces: Vec<&str> = project.contributes_to.iter().map(|ns| ns.as_str()).collect();
        println!("  {}", project.name.bold());
        println!(
            "    Contributes to: {}",
            if namespaces.is_empty() {
                "(none)".to_string()
            } else {
                namespaces.join(", ")
            }
        );
        if let Some(entry) = &project.entry_path {
            println!("    Entry: {}", entry);
        }
    }
    println!();
    println!("{} projects", registry.len());

    Ok(())
}

async fn validate(process: &ProcessContext) -> Result<()> {
    println!("Validating project schema...");

    let summaries = compose_all(process, PluginCatalog::with_manifest_fallback()).await?;
    for summary in &summaries {
        println!(
            "  {}: {} projects, {} capabilities",
            summary.namespace.as_str().bold(),
            summary.contributors,
            summary.capabilities.len()
        );
    }

    println!("{}", "✓ Project schema is valid".green());
    Ok(())
}

/// Compose every namespace from the resolved schema using `catalog`.
pub async fn compose_all(
    process: &ProcessContext,
    catalog: PluginCatalog,
) -> Result<Vec<NamespaceSummary>> {
    let (_, registry) = load_registry(process)?;
    let composer = NamespaceComposer::new(Arc::new(catalog));

    let mut summaries = Vec::with_capacity(NamespaceId::ALL.len());
    for id in NamespaceId::ALL {
        let mut namespace = Namespace::new(id);
        composer
            .compose(registry.schema(), id, &mut namespace)
            .await
            .with_context(|| format!("Failed to compose {} namespace", id))?;
        summaries.push(NamespaceSummary {
            namespace: id,
            contributors: registry.contributors(id).count(),
            capabilities: namespace.keys().map(str::to_string).collect(),
        });
    }
    Ok(summaries)
}

fn lookup(process: &ProcessContext, name: &str) -> Result<()> {
    let (_, registry) = load_registry(process)?;
    let project = registry
        .lookup(name)
        .with_context(|| format!("Project '{}' not found in schema", name))?;

    println!(
        "{}",
        serde_json::to_string_pretty(project).context("Failed to render project")?
    );
    Ok(())
}
