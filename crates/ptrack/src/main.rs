//! `ptrack` -- find the git projects under a directory tree.
//!
//! Parses CLI arguments with clap, loads configuration into the runtime
//! context, and dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

fn main() {
    let cli = Cli::parse();

    let result = RuntimeContext::from_global_args(&cli.global).and_then(|ctx| {
        // Set up logging based on verbosity
        if ctx.verbose {
            tracing_subscriber::fmt()
                .with_env_filter("ptrack=debug,ptrack_scan=debug")
                .with_writer(std::io::stderr)
                .init();
        }

        match &cli.command {
            Some(Commands::Scan(args)) => commands::scan::run(&ctx, args),
            Some(Commands::Version) => commands::version::run(&ctx),
            Some(Commands::Completion(args)) => commands::completion::run(&ctx, args),
            None => {
                // No subcommand -- print help
                use clap::CommandFactory;
                Cli::command().print_help().ok();
                println!();
                Ok(())
            }
        }
    });

    // Handle errors: print message and exit with code 1
    if let Err(e) = result {
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}
