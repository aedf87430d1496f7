//! Error types for project scanning and fixture preparation.

use std::path::PathBuf;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Scan errors
// ---------------------------------------------------------------------------

/// Errors that can occur while scanning a directory tree for projects.
#[derive(Debug, Error)]
pub enum ScanError {
    /// An entry could not be listed or stat-ed during the walk.
    ///
    /// The whole scan is aborted; no partial results are returned.
    #[error("error walking directory {}: {source}", .root.display())]
    Walk {
        /// The root that was being scanned.
        root: PathBuf,
        /// The entry that failed, if the walker reported one.
        path: Option<PathBuf>,
        /// The underlying walker error.
        #[source]
        source: walkdir::Error,
    },
}

impl ScanError {
    /// The root directory whose scan failed.
    pub fn root(&self) -> &std::path::Path {
        match self {
            Self::Walk { root, .. } => root,
        }
    }

    /// The offending entry, when known.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Walk { path, .. } => path.as_deref(),
        }
    }
}

/// A specialized `Result` type for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;

// ---------------------------------------------------------------------------
// Fixture errors
// ---------------------------------------------------------------------------

/// Errors that can occur while preparing a fixture suite.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The temporary directory could not be created.
    #[error("failed to create temp dir: {0}")]
    CreateTempDir(#[source] std::io::Error),

    /// Walking the source tree failed.
    #[error("failed to walk fixture tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// A file or directory could not be copied into the temporary directory.
    #[error("failed to copy fixture entry {}: {source}", .path.display())]
    Copy {
        /// The source path being copied.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `git-dir` marker could not be renamed to `.git`.
    #[error("failed to rename '{}': {source}", .path.display())]
    Rename {
        /// The marker directory that failed to rename.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Removing the temporary directory after a failure also failed.
    #[error(
        "failed to delete temporary directory {}: {cleanup} after failure: {cause}",
        .path.display()
    )]
    Cleanup {
        /// The temporary directory that could not be removed.
        path: PathBuf,
        /// The error raised by the cleanup itself.
        cleanup: std::io::Error,
        /// The failure that triggered the cleanup.
        #[source]
        cause: Box<FixtureError>,
    },
}

impl FixtureError {
    /// Returns the failure that originally aborted preparation, looking
    /// through any cleanup error chained on top of it.
    pub fn root_cause(&self) -> &FixtureError {
        match self {
            Self::Cleanup { cause, .. } => cause.root_cause(),
            other => other,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
