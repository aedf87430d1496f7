//! `ptrack scan` -- list the git projects under one or more roots.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use ptrack_scan::{is_project_root, scan_directory};
use tracing::debug;

use crate::cli::ScanArgs;
use crate::context::RuntimeContext;
use crate::output::{ScanReport, output_json, output_paths};

/// Settings for one `scan` invocation after merging flags and config.
#[derive(Debug, PartialEq, Eq)]
struct ScanPlan {
    roots: Vec<PathBuf>,
    sort: bool,
    verify: bool,
}

impl ScanPlan {
    fn new(ctx: &RuntimeContext, args: &ScanArgs) -> Self {
        let roots = if args.roots.is_empty() {
            ctx.config.effective_roots()
        } else {
            args.roots.clone()
        };
        Self {
            roots,
            sort: args.sort_override().unwrap_or(ctx.config.sort),
            verify: args.verify || ctx.config.verify,
        }
    }
}

/// Execute the `ptrack scan` command.
///
/// Every root is scanned before anything is printed, so a failure on any
/// root produces an error and no output.
pub fn run(ctx: &RuntimeContext, args: &ScanArgs) -> Result<()> {
    let plan = ScanPlan::new(ctx, args);
    debug!(?plan, "scanning");

    let mut results = Vec::with_capacity(plan.roots.len());
    for root in &plan.roots {
        let projects = scan_root(root, plan.sort, plan.verify)?;
        results.push((root.as_path(), projects));
    }

    if ctx.json {
        let reports: Vec<ScanReport> = results
            .iter()
            .map(|(root, projects)| ScanReport::new(root, projects))
            .collect();
        output_json(&reports);
        return Ok(());
    }

    for (root, projects) in &results {
        if projects.is_empty() && !ctx.quiet {
            eprintln!("No projects found under {}", root.display());
        }
        output_paths(projects);
    }
    Ok(())
}

fn scan_root(root: &Path, sort: bool, verify: bool) -> Result<Vec<PathBuf>> {
    let mut projects = scan_directory(root)?;
    if sort {
        projects.sort();
    }
    if verify {
        if let Some(bad) = projects.iter().find(|p| !is_project_root(p)) {
            bail!("{} was reported as a project but has no .git directory", bad.display());
        }
    }
    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::GlobalArgs;
    use pretty_assertions::assert_eq;
    use ptrack_config::PtrackConfig;
    use std::fs;

    fn ctx(config: PtrackConfig) -> RuntimeContext {
        let global = GlobalArgs {
            config: None,
            json: false,
            verbose: false,
            quiet: true,
        };
        RuntimeContext::with_config(&global, config)
    }

    #[test]
    fn plan_uses_config_when_no_flags() {
        let config = PtrackConfig {
            roots: vec![PathBuf::from("/srv")],
            sort: false,
            verify: true,
            ..PtrackConfig::default()
        };
        let plan = ScanPlan::new(&ctx(config), &ScanArgs::default());
        assert_eq!(
            plan,
            ScanPlan {
                roots: vec![PathBuf::from("/srv")],
                sort: false,
                verify: true,
            }
        );
    }

    #[test]
    fn plan_flags_override_config() {
        let config = PtrackConfig {
            roots: vec![PathBuf::from("/srv")],
            ..PtrackConfig::default()
        };
        let args = ScanArgs {
            roots: vec![PathBuf::from("here")],
            no_sort: true,
            ..ScanArgs::default()
        };
        let plan = ScanPlan::new(&ctx(config), &args);
        assert_eq!(plan.roots, vec![PathBuf::from("here")]);
        assert!(!plan.sort);
        assert!(!plan.verify);
    }

    #[test]
    fn plan_defaults_to_current_directory() {
        let plan = ScanPlan::new(&ctx(PtrackConfig::default()), &ScanArgs::default());
        assert_eq!(plan.roots, vec![PathBuf::from(".")]);
        assert!(plan.sort);
    }

    #[test]
    fn scan_root_sorts_and_verifies() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zeta", "alpha", "mid/beta"] {
            fs::create_dir_all(dir.path().join(name).join(".git")).unwrap();
        }

        let projects = scan_root(dir.path(), true, true).unwrap();
        assert_eq!(
            projects,
            vec![
                dir.path().join("alpha"),
                dir.path().join("mid/beta"),
                dir.path().join("zeta"),
            ]
        );
    }

    #[test]
    fn scan_root_propagates_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_root(&dir.path().join("missing"), true, false).unwrap_err();
        assert!(err.to_string().contains("error walking directory"));
    }
}
