// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Lodestar CLI library - exposes testable components
//!
//! # Architecture
//!
//! - **Layer:** Interface / Presentation Layer
//! - **Purpose:** Role host applications, command handlers and exit code mapping

pub mod apps;
pub mod commands;

use lodestar_core::domain::error::{BootstrapError, BootstrapFailure};

/// Exit code for a failed command. Bootstrap errors keep their kind's code;
/// anything else exits with `1`.
pub fn exit_code(error: &anyhow::Error) -> u8 {
    let code = error.chain().find_map(|cause| {
        cause
            .downcast_ref::<BootstrapFailure>()
            .map(BootstrapFailure::exit_code)
            .or_else(|| cause.downcast_ref::<BootstrapError>().map(BootstrapError::exit_code))
    });

    code.and_then(|c| u8::try_from(c).ok()).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use lodestar_core::domain::bootstrap::BootstrapPhase;

    #[test]
    fn test_bootstrap_failure_maps_to_kind_code() {
        let err = anyhow::Error::new(BootstrapFailure {
            phase: BootstrapPhase::InitNamespaces,
            error: BootstrapError::plugin_load("Foundations", "missing entry"),
        });
        assert_eq!(exit_code(&err), 3);
    }

    #[test]
    fn test_context_wrapped_error_keeps_code() {
        let result: Result<(), BootstrapError> =
            Err(BootstrapError::Configuration("empty schema path".into()));
        let err = result.context("Failed to resolve environment").unwrap_err();
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_other_errors_exit_with_one() {
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 1);
    }
}
