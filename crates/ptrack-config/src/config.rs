//! Configuration types and loading for the ptrack system.
//!
//! The main entry point is [`PtrackConfig`]. Configuration is loaded with
//! [`load_config`], which layers (lowest priority first):
//!
//! 1. built-in defaults,
//! 2. `ptrack.toml` then `ptrack.yaml` in the given directory, or a single
//!    file passed explicitly,
//! 3. `PTRACK_*` environment variables.

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the TOML configuration file looked up in the working directory.
pub const TOML_FILE_NAME: &str = "ptrack.toml";

/// Name of the YAML configuration file looked up in the working directory.
pub const YAML_FILE_NAME: &str = "ptrack.yaml";

/// Prefix of the environment variables that override file settings.
pub const ENV_PREFIX: &str = "PTRACK_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The merged configuration could not be extracted.
    #[error("failed to load configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// PtrackConfig
// ---------------------------------------------------------------------------

/// Settings for the `ptrack` command line tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PtrackConfig {
    /// Roots scanned when none are given on the command line.
    pub roots: Vec<PathBuf>,

    /// Sort discovered projects before printing.
    pub sort: bool,

    /// Emit JSON instead of one path per line.
    pub json: bool,

    /// Re-check that every reported project still has a `.git` directory.
    pub verify: bool,
}

impl Default for PtrackConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            sort: true,
            json: false,
            verify: false,
        }
    }
}

impl PtrackConfig {
    /// The roots to scan: the configured ones, or the current directory.
    pub fn effective_roots(&self) -> Vec<PathBuf> {
        if self.roots.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.roots.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the layered [`Figment`] used by [`load_config`].
///
/// With `explicit` set, only that file is read (YAML for `.yaml`/`.yml`,
/// TOML otherwise); otherwise both default file names in `dir` are tried.
/// Missing default files are skipped.
pub fn build_figment(dir: &Path, explicit: Option<&Path>) -> Figment {
    let figment = Figment::from(Serialized::defaults(PtrackConfig::default()));

    let figment = match explicit {
        Some(path) if is_yaml(path) => figment.merge(Yaml::file(path)),
        Some(path) => figment.merge(Toml::file(path)),
        None => figment
            .merge(Toml::file(dir.join(TOML_FILE_NAME)))
            .merge(Yaml::file(dir.join(YAML_FILE_NAME))),
    };

    figment.merge(Env::prefixed(ENV_PREFIX))
}

/// Load configuration for a run started in `dir`.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if `explicit` names a missing file, or
/// [`ConfigError::Extract`] if a source holds invalid values.
pub fn load_config(dir: &Path, explicit: Option<&Path>) -> Result<PtrackConfig> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
    }

    build_figment(dir, explicit)
        .extract()
        .map_err(|e| ConfigError::Extract(Box::new(e)))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
