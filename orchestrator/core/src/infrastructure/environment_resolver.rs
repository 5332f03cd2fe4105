// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Environment Resolver - Process configuration discovery
//
// Precedence for every value:
// 1. LODESTAR_* environment variable
// 2. YAML environment file (LODESTAR_ENV_FILE, or <base>/lodestar-env.yaml)
// 3. Location derived from the base path
//
// Required values explicitly set to an empty string are rejected rather
// than replaced.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::domain::environment::{
    EnvironmentConfig, ProcessContext, ENV_BASE_PATH, ENV_FILE, ENV_LOG_LEVEL, ENV_LOG_PATH,
    ENV_PROJECT_SCHEMA, ENV_SECRETS_PATH, ENV_SUPERVISOR_ADDR,
};
use crate::domain::error::BootstrapError;

/// Environment file looked up in the base directory when none is named
pub const DEFAULT_ENV_FILE: &str = "lodestar-env.yaml";
const DEFAULT_SCHEMA_PATH: &str = "Projects/ProjectsSchema.json";
const DEFAULT_LOG_PATH: &str = "Platform/My-Log-Files";
pub const DEFAULT_LOG_LEVEL: &str = "info";

const ENV_VARS: [&str; 7] = [
    ENV_BASE_PATH,
    ENV_FILE,
    ENV_PROJECT_SCHEMA,
    ENV_LOG_PATH,
    ENV_SECRETS_PATH,
    ENV_SUPERVISOR_ADDR,
    ENV_LOG_LEVEL,
];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvironmentFile {
    project_schema_path: Option<String>,
    log_files_path: Option<String>,
    secrets_path: Option<String>,
    supervisor_addr: Option<String>,
    log_level: Option<String>,
    /// Keys owned by other tools sharing the file
    #[serde(flatten)]
    other: BTreeMap<String, serde_yaml::Value>,
}

pub struct EnvironmentResolver;

impl EnvironmentResolver {
    pub fn resolve(context: &ProcessContext) -> Result<EnvironmentConfig, BootstrapError> {
        if let Some(key) = context
            .non_unicode_vars()
            .iter()
            .find(|key| ENV_VARS.contains(&key.as_str()))
        {
            return Err(BootstrapError::Configuration(format!(
                "{} is not valid unicode",
                key
            )));
        }

        let base_path = match non_empty(ENV_BASE_PATH, context.var(ENV_BASE_PATH))? {
            Some(path) => PathBuf::from(path),
            None => context.working_dir().map(Path::to_path_buf).ok_or_else(|| {
                BootstrapError::Configuration(format!(
                    "Cannot determine base path: working directory unavailable and {} not set",
                    ENV_BASE_PATH
                ))
            })?,
        };

        let file = Self::load_env_file(context, &base_path)?;

        let project_schema_path = pick(
            ENV_PROJECT_SCHEMA,
            context.var(ENV_PROJECT_SCHEMA),
            "projectSchemaPath",
            file.project_schema_path.as_deref(),
        )?
        .map(|p| absolutize(&base_path, p))
        .unwrap_or_else(|| base_path.join(DEFAULT_SCHEMA_PATH));

        let log_files_path = pick(
            ENV_LOG_PATH,
            context.var(ENV_LOG_PATH),
            "logFilesPath",
            file.log_files_path.as_deref(),
        )?
        .map(|p| absolutize(&base_path, p))
        .unwrap_or_else(|| base_path.join(DEFAULT_LOG_PATH));

        let secrets_path = pick(
            ENV_SECRETS_PATH,
            context.var(ENV_SECRETS_PATH),
            "secretsPath",
            file.secrets_path.as_deref(),
        )?
        .map(|p| absolutize(&base_path, p));

        let supervisor_addr = pick(
            ENV_SUPERVISOR_ADDR,
            context.var(ENV_SUPERVISOR_ADDR),
            "supervisorAddr",
            file.supervisor_addr.as_deref(),
        )?
        .map(|addr| {
            addr.parse::<SocketAddr>().map_err(|e| {
                BootstrapError::Configuration(format!(
                    "Invalid supervisor address '{}': {}",
                    addr, e
                ))
            })
        })
        .transpose()?;

        let log_level = pick(
            ENV_LOG_LEVEL,
            context.var(ENV_LOG_LEVEL),
            "logLevel",
            file.log_level.as_deref(),
        )?
        .unwrap_or(DEFAULT_LOG_LEVEL)
        .to_string();

        let config = EnvironmentConfig {
            base_path,
            project_schema_path,
            log_files_path,
            secrets_path,
            supervisor_addr,
            log_level,
        };
        debug!("Resolved environment: {:?}", config);
        Ok(config)
    }

    fn load_env_file(
        context: &ProcessContext,
        base_path: &Path,
    ) -> Result<EnvironmentFile, BootstrapError> {
        // Explicitly named file must exist
        if let Some(path) = non_empty(ENV_FILE, context.var(ENV_FILE))? {
            let path = absolutize(base_path, path);
            info!("Loading environment file from explicit path: {:?}", path);
            return read_env_file(&path);
        }

        let discovered = base_path.join(DEFAULT_ENV_FILE);
        if discovered.is_file() {
            info!("Loading environment file from discovered path: {:?}", discovered);
            return read_env_file(&discovered);
        }

        Ok(EnvironmentFile::default())
    }
}

fn read_env_file(path: &Path) -> Result<EnvironmentFile, BootstrapError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        BootstrapError::Configuration(format!("Failed to read environment file {:?}: {}", path, e))
    })?;
    let file: EnvironmentFile = serde_yaml::from_str(&content).map_err(|e| {
        BootstrapError::Configuration(format!("Malformed environment file {:?}: {}", path, e))
    })?;

    if !file.other.is_empty() {
        let keys: Vec<&str> = file.other.keys().map(String::as_str).collect();
        warn!("Ignoring unknown keys in environment file {:?}: {}", path, keys.join(", "));
    }
    Ok(file)
}

/// Reject values that are present but empty.
fn non_empty<'a>(name: &str, value: Option<&'a str>) -> Result<Option<&'a str>, BootstrapError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(BootstrapError::Configuration(format!(
            "{} is set but empty",
            name
        ))),
        other => Ok(other),
    }
}

/// Environment variable first, then the environment file.
fn pick<'a>(
    var_name: &str,
    var_value: Option<&'a str>,
    file_key: &str,
    file_value: Option<&'a str>,
) -> Result<Option<&'a str>, BootstrapError> {
    if let Some(value) = non_empty(var_name, var_value)? {
        return Ok(Some(value));
    }
    non_empty(file_key, file_value)
}

fn absolutize(base: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(base: &Path) -> ProcessContext {
        ProcessContext::new(Some(base.to_path_buf()))
    }

    #[test]
    fn test_derives_paths_from_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = EnvironmentResolver::resolve(&context(dir.path())).unwrap();

        assert_eq!(config.base_path, dir.path());
        assert_eq!(
            config.project_schema_path,
            dir.path().join("Projects/ProjectsSchema.json")
        );
        assert_eq!(config.log_files_path, dir.path().join("Platform/My-Log-Files"));
        assert_eq!(config.log_level, "info");
        assert!(config.secrets_path.is_none());
        assert!(config.supervisor_addr.is_none());
    }

    #[test]
    fn test_missing_working_dir_and_base_fails() {
        let err = EnvironmentResolver::resolve(&ProcessContext::new(None)).unwrap_err();
        assert!(matches!(err, BootstrapError::Configuration(_)));
    }

    #[test]
    fn test_env_var_overrides_env_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_ENV_FILE),
            "projectSchemaPath: from-file.json\nlogFilesPath: /srv/logs\nlogLevel: debug\n",
        )
        .unwrap();

        let ctx = context(dir.path()).with_var(ENV_PROJECT_SCHEMA, "/etc/lodestar/schema.json");
        let config = EnvironmentResolver::resolve(&ctx).unwrap();

        assert_eq!(config.project_schema_path, PathBuf::from("/etc/lodestar/schema.json"));
        assert_eq!(config.log_files_path, PathBuf::from("/srv/logs"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_relative_paths_resolve_against_base() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path())
            .with_var(ENV_LOG_PATH, "logs")
            .with_var(ENV_SECRETS_PATH, "secrets.env");
        let config = EnvironmentResolver::resolve(&ctx).unwrap();

        assert_eq!(config.log_files_path, dir.path().join("logs"));
        assert_eq!(config.secrets_path, Some(dir.path().join("secrets.env")));
    }

    #[test]
    fn test_empty_required_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path()).with_var(ENV_PROJECT_SCHEMA, "");
        assert!(matches!(
            EnvironmentResolver::resolve(&ctx),
            Err(BootstrapError::Configuration(_))
        ));
    }

    #[test]
    fn test_named_env_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path()).with_var(ENV_FILE, "missing.yaml");
        assert!(matches!(
            EnvironmentResolver::resolve(&ctx),
            Err(BootstrapError::Configuration(_))
        ));
    }

    #[test]
    fn test_supervisor_addr_is_validated() {
        let dir = tempfile::tempdir().unwrap();

        let ctx = context(dir.path()).with_var(ENV_SUPERVISOR_ADDR, "127.0.0.1:34248");
        let config = EnvironmentResolver::resolve(&ctx).unwrap();
        assert_eq!(config.supervisor_addr, Some("127.0.0.1:34248".parse().unwrap()));

        let ctx = context(dir.path()).with_var(ENV_SUPERVISOR_ADDR, "not-an-address");
        assert!(EnvironmentResolver::resolve(&ctx).is_err());
    }

    #[test]
    fn test_shared_env_file_keeps_foreign_keys_out() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_ENV_FILE),
            "logLevel: warn
backupSchedule: nightly
other:
  nested: true
",
        )
        .unwrap();

        let config = EnvironmentResolver::resolve(&context(dir.path())).unwrap();
        assert_eq!(config.log_level, "warn");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_lodestar_var_is_configuration_error() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let dir = tempfile::tempdir().unwrap();
        let ctx = ProcessContext::from_vars(
            Some(dir.path().to_path_buf()),
            vec![(
                OsString::from(ENV_PROJECT_SCHEMA),
                OsString::from_vec(b"/srv/caf\xe9.json".to_vec()),
            )],
        );
        match EnvironmentResolver::resolve(&ctx) {
            Err(BootstrapError::Configuration(msg)) => assert!(msg.contains(ENV_PROJECT_SCHEMA)),
            other => panic!("unexpected result: {:?}", other),
        }

        // Unrelated variables do not matter
        let ctx = ProcessContext::from_vars(
            Some(dir.path().to_path_buf()),
            vec![(OsString::from("LANG_HINT"), OsString::from_vec(b"caf\xe9".to_vec()))],
        );
        assert!(EnvironmentResolver::resolve(&ctx).is_ok());
    }
}
