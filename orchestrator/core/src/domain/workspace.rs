// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Workspace Selector
//!
//! The interactive role can be started on a particular workspace. The
//! selection comes from raw launch arguments using a positional grammar:
//!
//! ```text
//! <flags-or-options>* <projectSelector> [<workspaceName>]
//! ```
//!
//! Skipped (non-positional) tokens:
//! - the flags `noBrowser` and `minMemo`
//! - anything containing `:` (a `key:value` option)
//! - anything containing `/` (a path)
//!
//! Parsing never fails. Absent input yields [`WorkspaceSelector::Unspecified`].

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Selector value for the built-in multi-workspace area.
pub const MY_WORKSPACES: &str = "My-Workspaces";

pub const NO_BROWSER_FLAG: &str = "noBrowser";
pub const MIN_MEMO_FLAG: &str = "minMemo";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorkspaceSelector {
    /// No positional token was given
    Unspecified,
    /// A workspace owned by a plugin project
    Plugin {
        project: String,
        name: Option<String>,
    },
    /// The built-in `My-Workspaces` area
    #[serde(rename = "My-Workspaces")]
    MyWorkspaces { name: Option<String> },
}

impl WorkspaceSelector {
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selector = Self::Unspecified;
        let mut positional = 0usize;

        for arg in args {
            let arg = arg.as_ref();
            if is_skipped(arg) {
                continue;
            }

            match positional {
                0 => {
                    selector = if arg == MY_WORKSPACES {
                        Self::MyWorkspaces { name: None }
                    } else {
                        Self::Plugin {
                            project: arg.to_string(),
                            name: None,
                        }
                    };
                }
                1 => selector.set_name(arg),
                _ => debug!("Ignoring extra positional argument '{}'", arg),
            }
            positional += 1;
        }

        selector
    }

    fn set_name(&mut self, value: &str) {
        match self {
            Self::Plugin { name, .. } | Self::MyWorkspaces { name } => {
                *name = Some(value.to_string());
            }
            Self::Unspecified => {}
        }
    }

    /// Project name embedded in the selector. Empty for `My-Workspaces`
    /// and for an unspecified selector.
    pub fn project(&self) -> &str {
        match self {
            Self::Plugin { project, .. } => project,
            Self::MyWorkspaces { .. } | Self::Unspecified => "",
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Plugin { name, .. } | Self::MyWorkspaces { name } => name.as_deref(),
            Self::Unspecified => None,
        }
    }

    pub fn is_specified(&self) -> bool {
        !matches!(self, Self::Unspecified)
    }
}

impl Default for WorkspaceSelector {
    fn default() -> Self {
        Self::Unspecified
    }
}

/// Recognized launch flags found among the raw arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchFlags {
    /// Do not open a browser window on start
    pub no_browser: bool,
    /// Run with reduced in-memory caches
    pub min_memo: bool,
}

impl LaunchFlags {
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        args.into_iter().fold(Self::default(), |mut flags, arg| {
            match arg.as_ref() {
                NO_BROWSER_FLAG => flags.no_browser = true,
                MIN_MEMO_FLAG => flags.min_memo = true,
                _ => {}
            }
            flags
        })
    }
}

fn is_skipped(arg: &str) -> bool {
    arg == NO_BROWSER_FLAG || arg == MIN_MEMO_FLAG || arg.contains(':') || arg.contains('/')
}
