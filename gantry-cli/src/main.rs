//! Gantry - launches the evaluation program inside a scheduler-allocated job.
//!
//! The launcher:
//! - Refuses to start when the site environment has not been sourced
//! - Composes the evaluation command line from GANTRY_* variables
//! - Forwards caller-supplied arguments to the evaluation program verbatim
//! - Delivers a soft-stop warning ahead of the job's wall-clock limit
//! - Relays SIGTERM/SIGINT/SIGUSR1 to the job's process group
//! - Exits with the evaluation program's exit code

mod args;
mod command;
mod config;
mod deadline;
mod run;

use args::Args;
use clap::Parser;
use command::Invocation;
use config::{Config, ConfigError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e @ ConfigError::NotInitialized) => {
            // The guidance message, nothing else; nothing was launched
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let invocation = Invocation::compose(&config, &args.forwarded);

    if args.dry_run {
        // Script-friendly: the composed command line alone on stdout
        println!("{}", invocation.render());
        return;
    }

    let exit_code = match run::run(&args, &config, invocation).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("launch error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}
