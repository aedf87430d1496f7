//! Preparation of on-disk fixture suites for scanner tests.
//!
//! Fixture trees are checked into version control, so they cannot contain
//! real `.git` directories. Instead they mark repositories with directories
//! named `git-dir`. [`prepare_suite`] copies a fixture tree into a fresh
//! temporary directory and renames every `git-dir` marker to `.git`, giving
//! the scanner a realistic tree to work on.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::FixtureError;
use crate::scanner::GIT_DIR_NAME;

/// The placeholder name used for `.git` directories inside fixture trees.
pub const GIT_DIR_MARKER: &str = "git-dir";

/// Prefix of the temporary directories created by [`prepare_suite`].
const SUITE_PREFIX: &str = "ptrack-testsuite-";

type Result<T> = std::result::Result<T, FixtureError>;

// ---------------------------------------------------------------------------
// PreparedSuite
// ---------------------------------------------------------------------------

/// A fixture suite materialised in a temporary directory.
///
/// The directory is removed when the handle is dropped. Use
/// [`PreparedSuite::keep`] to leave it on disk.
#[derive(Debug)]
pub struct PreparedSuite {
    dir: TempDir,
}

impl PreparedSuite {
    /// Root of the prepared copy.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Detach the suite from the handle and return its path. The caller
    /// becomes responsible for deleting it.
    pub fn keep(self) -> PathBuf {
        self.dir.keep()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Copy the fixture tree at `source` into a new temporary directory and
/// rename every `git-dir` directory in the copy to `.git`.
///
/// The source tree is never modified.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the temporary directory cannot be created
/// or if copying or renaming fails. On failure the temporary directory is
/// deleted before returning; if that deletion also fails the result is a
/// [`FixtureError::Cleanup`] carrying both errors.
///
/// # Examples
///
/// ```no_run
/// use ptrack_scan::fixture::prepare_suite;
/// use ptrack_scan::scan_directory;
///
/// let suite = prepare_suite("tests/fixtures/reference-test-suite").unwrap();
/// let projects = scan_directory(suite.path()).unwrap();
/// assert!(!projects.is_empty());
/// ```
pub fn prepare_suite(source: impl AsRef<Path>) -> Result<PreparedSuite> {
    let source = source.as_ref();
    let dir = tempfile::Builder::new()
        .prefix(SUITE_PREFIX)
        .tempdir()
        .map_err(FixtureError::CreateTempDir)?;

    match populate(source, dir.path()) {
        Ok(renamed) => {
            info!(
                source = %source.display(),
                suite = %dir.path().display(),
                renamed,
                "prepared fixture suite"
            );
            Ok(PreparedSuite { dir })
        }
        Err(cause) => Err(discard(dir, cause)),
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Copy `source` into `dest` and rename the markers. Returns the number of
/// markers renamed.
fn populate(source: &Path, dest: &Path) -> Result<usize> {
    copy_tree(source, dest)?;

    let markers = find_markers(dest)?;
    for marker in &markers {
        rename_marker(marker)?;
    }
    Ok(markers.len())
}

/// Recursively copy the contents of `source` into the existing `dest`.
fn copy_tree(source: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(source) {
        let entry = entry?;
        if entry.depth() == 0 {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| FixtureError::Copy {
                path: entry.path().to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, e),
            })?;
        let target = dest.join(relative);

        let copied = if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
        } else {
            // fs::copy carries the permission bits over.
            fs::copy(entry.path(), &target).map(|_| ())
        };
        copied.map_err(|source| FixtureError::Copy {
            path: entry.path().to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Collect every `git-dir` directory under `root`, deepest first, so that
/// renaming a marker never invalidates the path of one still pending.
fn find_markers(root: &Path) -> Result<Vec<PathBuf>> {
    let mut markers = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).contents_first(true) {
        let entry = entry?;
        if entry.file_type().is_dir() && entry.file_name() == GIT_DIR_MARKER {
            markers.push(entry.into_path());
        }
    }
    Ok(markers)
}

fn rename_marker(marker: &Path) -> Result<()> {
    let renamed = marker.with_file_name(GIT_DIR_NAME);
    debug!(from = %marker.display(), to = %renamed.display(), "renaming marker");
    fs::rename(marker, &renamed).map_err(|source| FixtureError::Rename {
        path: marker.to_path_buf(),
        source,
    })
}

/// Delete a half-prepared suite, chaining any cleanup failure onto `cause`.
fn discard(dir: TempDir, cause: FixtureError) -> FixtureError {
    let path = dir.path().to_path_buf();
    warn!(suite = %path.display(), "fixture preparation failed: {cause}");
    match dir.close() {
        Ok(()) => cause,
        Err(cleanup) => FixtureError::Cleanup {
            path,
            cleanup,
            cause: Box::new(cause),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Build a small fixture tree and return its handle.
    fn fixture_source() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("alpha/git-dir")).unwrap();
        fs::write(root.join("alpha/git-dir/HEAD"), "ref: refs/heads/main\n").unwrap();
        fs::write(root.join("alpha/README.md"), "# alpha\n").unwrap();
        fs::create_dir_all(root.join("beta/gamma/git-dir")).unwrap();
        fs::create_dir_all(root.join("plain")).unwrap();
        dir
    }

    #[test]
    fn test_prepare_suite_renames_markers() {
        let source = fixture_source();
        let suite = prepare_suite(source.path()).unwrap();
        let root = suite.path();

        assert!(root.join("alpha/.git").is_dir());
        assert!(root.join("beta/gamma/.git").is_dir());
        assert!(!root.join("alpha/git-dir").exists());
        assert!(!root.join("beta/gamma/git-dir").exists());
        assert!(root.join("plain").is_dir());
        assert_eq!(
            fs::read_to_string(root.join("alpha/.git/HEAD")).unwrap(),
            "ref: refs/heads/main\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("alpha/README.md")).unwrap(),
            "# alpha\n"
        );
    }

    #[test]
    fn test_prepare_suite_leaves_source_untouched() {
        let source = fixture_source();
        let _suite = prepare_suite(source.path()).unwrap();

        assert!(source.path().join("alpha/git-dir").is_dir());
        assert!(!source.path().join("alpha/.git").exists());
    }

    #[test]
    fn test_prepare_suite_renames_nested_markers() {
        let source = tempfile::tempdir().unwrap();
        fs::create_dir_all(source.path().join("outer/git-dir/modules/inner/git-dir")).unwrap();

        let suite = prepare_suite(source.path()).unwrap();
        assert!(
            suite
                .path()
                .join("outer/.git/modules/inner/.git")
                .is_dir()
        );
    }

    #[test]
    fn test_marker_files_are_not_renamed() {
        let source = tempfile::tempdir().unwrap();
        fs::write(source.path().join(GIT_DIR_MARKER), "not a directory\n").unwrap();

        let suite = prepare_suite(source.path()).unwrap();
        assert!(suite.path().join(GIT_DIR_MARKER).is_file());
        assert!(!suite.path().join(GIT_DIR_NAME).exists());
    }

    #[test]
    fn test_suite_is_removed_on_drop() {
        let source = fixture_source();
        let suite = prepare_suite(source.path()).unwrap();
        let path = suite.path().to_path_buf();
        assert!(path.is_dir());

        drop(suite);
        assert!(!path.exists());
    }

    #[test]
    fn test_keep_leaves_suite_on_disk() {
        let source = fixture_source();
        let path = prepare_suite(source.path()).unwrap().keep();

        assert!(path.join("alpha/.git").is_dir());
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(SUITE_PREFIX), "unexpected name: {name}");
        fs::remove_dir_all(&path).unwrap();
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = prepare_suite(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, FixtureError::Walk(_)), "unexpected error: {err:?}");
    }

    #[test]
    fn test_discard_removes_partial_suite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_path_buf();
        fs::write(path.join("partial"), "x").unwrap();

        let cause = FixtureError::CreateTempDir(io::Error::new(io::ErrorKind::Other, "boom"));
        let err = discard(dir, cause);

        assert!(matches!(err, FixtureError::CreateTempDir(_)));
        assert!(!path.exists());
    }
}
