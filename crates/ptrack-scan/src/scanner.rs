//! Recursive discovery of git project roots.
//!
//! A project root is any directory that directly contains a `.git`
//! directory. [`scan_directory`] walks a tree depth-first, records the
//! parent of every `.git` directory it meets and never descends into the
//! `.git` directory itself. Directories next to or below a project are
//! still visited, so nested projects (submodules, vendored checkouts) are
//! reported as well.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Result, ScanError};

/// The name of the git metadata directory.
pub const GIT_DIR_NAME: &str = ".git";

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Search `root` recursively for git projects.
///
/// Returns the path of every directory that contains a `.git` directory,
/// built by joining entry names onto `root` as given (relative roots give
/// relative results). Each `.git` directory contributes exactly one entry
/// and its contents are never scanned.
///
/// Only directories match: a `.git` *file* (as left by worktrees and some
/// submodule layouts) is ignored. Symbolic links are not followed.
///
/// The name check applies to every visited directory, `root` included. If
/// `root` itself is named `.git`, the result is its parent and nothing
/// beneath it is visited.
///
/// # Ordering
///
/// Results come back in traversal order, which depends on the platform's
/// directory listing order. Sort the result if you need a stable order.
///
/// # Errors
///
/// Returns [`ScanError::Walk`] if any entry cannot be listed or stat-ed,
/// including a missing or unreadable `root`. The scan stops at the first
/// failure and no partial results are returned.
///
/// # Examples
///
/// ```no_run
/// use ptrack_scan::scan_directory;
///
/// let mut projects = scan_directory("/home/user/src")?;
/// projects.sort();
/// for project in &projects {
///     println!("{}", project.display());
/// }
/// # Ok::<(), ptrack_scan::ScanError>(())
/// ```
pub fn scan_directory(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let mut projects = Vec::new();

    let mut walker = WalkDir::new(root).into_iter();
    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                let path = source.path().map(Path::to_path_buf);
                warn!(root = %root.display(), ?path, "aborting scan: {source}");
                return Err(ScanError::Walk {
                    root: root.to_path_buf(),
                    path,
                    source,
                });
            }
        };

        if entry.file_type().is_dir() && entry.file_name() == GIT_DIR_NAME {
            let project = project_dir(entry.path());
            debug!(project = %project.display(), "found project");
            projects.push(project);
            walker.skip_current_dir();
        }
    }

    info!(root = %root.display(), count = projects.len(), "scan complete");
    Ok(projects)
}

/// Returns `true` if `path` directly contains a `.git` directory.
pub fn is_project_root(path: &Path) -> bool {
    path.join(GIT_DIR_NAME).is_dir()
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// The project directory owning the `.git` directory at `git_dir`.
///
/// A bare relative `.git` has an empty parent, which maps to `.`.
fn project_dir(git_dir: &Path) -> PathBuf {
    match git_dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
