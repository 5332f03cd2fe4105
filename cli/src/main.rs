// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Lodestar CLI
//!
//! The `lodestar` binary launches one of the two long-lived process roles.
//!
//! ## Commands
//!
//! - `lodestar platform [ARGS]...` - interactive role; trailing arguments
//!   select the initial workspace
//! - `lodestar task-server [TASK_ID]` - headless task role
//! - `lodestar schema show|validate|lookup` - inspect the project schema
//!
//! Exit codes: `0` success, `2` configuration, `3` plugin load,
//! `4` application start, `5` readiness, `1` anything else.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use lodestar::commands::{self, SchemaCommand};
use lodestar_core::domain::environment::ENV_LOG_LEVEL;

/// Lodestar - project-composed process launcher
#[derive(Parser)]
#[command(name = "lodestar")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Base directory for schema, logs and env file (default: working directory)
    #[arg(long, global = true, env = "LODESTAR_BASE_PATH", value_name = "DIR")]
    base_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive platform role
    #[command(name = "platform")]
    Platform {
        /// Raw launch arguments (flags, key:value options, workspace selector)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Start the headless task server role
    #[command(name = "task-server")]
    TaskServer {
        /// Task identifier (default: debug)
        #[arg(value_name = "TASK_ID")]
        task_id: Option<String>,
    },

    /// Project schema inspection
    #[command(name = "schema")]
    Schema {
        #[command(subcommand)]
        command: SchemaCommand,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env in the working directory feeds the environment contract
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::from(lodestar::exit_code(&e))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let process = commands::process_context(cli.base_path);

    match cli.command {
        Some(Commands::Platform { args }) => commands::platform::run(args, process).await,
        Some(Commands::TaskServer { task_id }) => {
            commands::task_server::run(task_id, process).await
        }
        Some(Commands::Schema { command }) => {
            init_logging(process.var(ENV_LOG_LEVEL).unwrap_or("warn"))?;
            commands::schema::handle_command(command, process).await
        }
        None => {
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

/// Console-only logging for commands that do not bootstrap a role.
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    Ok(())
}
