//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what a command handler needs: the loaded
//! configuration and the resolved global flags.

use std::env;

use anyhow::{Context, Result};
use ptrack_config::{PtrackConfig, load_config};

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Configuration loaded from files and the environment.
    pub config: PtrackConfig,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// Configuration is looked up relative to the current directory unless
    /// `--config` names a file. The `--json` flag wins over the configured
    /// value.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let cwd = env::current_dir().context("failed to determine current directory")?;
        let config = load_config(&cwd, global.config.as_deref())?;
        Ok(Self::with_config(global, config))
    }

    /// Build a context around an already loaded configuration.
    pub fn with_config(global: &GlobalArgs, config: PtrackConfig) -> Self {
        Self {
            json: global.json || config.json,
            verbose: global.verbose,
            quiet: global.quiet,
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(json: bool) -> GlobalArgs {
        GlobalArgs {
            config: None,
            json,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn json_flag_overrides_config() {
        let ctx = RuntimeContext::with_config(&global(true), PtrackConfig::default());
        assert!(ctx.json);
    }

    #[test]
    fn json_from_config_is_kept() {
        let config = PtrackConfig {
            json: true,
            ..PtrackConfig::default()
        };
        let ctx = RuntimeContext::with_config(&global(false), config);
        assert!(ctx.json);
    }

    #[test]
    fn plain_output_by_default() {
        let ctx = RuntimeContext::with_config(&global(false), PtrackConfig::default());
        assert!(!ctx.json);
        assert!(!ctx.quiet);
    }
}
