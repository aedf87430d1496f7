//! Git project discovery for the ptrack system.
//!
//! This crate finds every git project under a directory tree by looking
//! for `.git` directories, see [`scan_directory`]. The [`fixture`] module
//! materialises checked-in fixture trees for tests.

pub mod error;
pub mod fixture;
pub mod scanner;

pub use error::{FixtureError, ScanError};
pub use scanner::{is_project_root, scan_directory};
