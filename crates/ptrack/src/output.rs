//! Output formatting helpers for the `ptrack` CLI.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

/// JSON view of one scanned root.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ScanReport {
    /// The root as given on the command line or in the config.
    pub root: String,
    /// Number of projects found.
    pub count: usize,
    /// Discovered project paths.
    pub projects: Vec<String>,
}

impl ScanReport {
    /// Build a report for `root`. Non UTF-8 paths are converted lossily.
    pub fn new(root: &Path, projects: &[PathBuf]) -> Self {
        Self {
            root: root.to_string_lossy().into_owned(),
            count: projects.len(),
            projects: projects
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print one path per line to stdout.
pub fn output_paths(paths: &[PathBuf]) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for path in paths {
        if writeln!(handle, "{}", path.display()).is_err() {
            break;
        }
    }
}
