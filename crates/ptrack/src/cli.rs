//! Clap CLI definitions for the `ptrack` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// ptrack -- find the git projects under a directory tree.
#[derive(Parser, Debug)]
#[command(
    name = "ptrack",
    about = "Find git projects under a directory tree",
    long_about = "Recursively searches directories for .git directories and reports the projects that own them.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Configuration file (default: ptrack.toml / ptrack.yaml in the current directory).
    #[arg(long, global = true, env = "PTRACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan directories for git projects.
    #[command(alias = "ls")]
    Scan(ScanArgs),

    /// Print version information.
    Version,

    /// Generate shell completion scripts.
    Completion(CompletionArgs),
}

/// Arguments for `ptrack scan`.
#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Directories to scan (default: configured roots, else ".").
    pub roots: Vec<PathBuf>,

    /// Sort projects by path (default).
    #[arg(long, overrides_with = "no_sort")]
    pub sort: bool,

    /// Print projects in traversal order.
    #[arg(long, overrides_with = "sort")]
    pub no_sort: bool,

    /// Fail if a reported project has no .git directory.
    #[arg(long)]
    pub verify: bool,
}

impl ScanArgs {
    /// The sort setting requested on the command line, if any.
    pub fn sort_override(&self) -> Option<bool> {
        if self.no_sort {
            Some(false)
        } else if self.sort {
            Some(true)
        } else {
            None
        }
    }
}

/// Arguments for `ptrack completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}
