//! CLI argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Gantry - launches the evaluation program inside a scheduler-allocated job.
#[derive(Parser, Debug)]
#[command(name = "gantry", version, about)]
pub struct Args {
    /// Working directory for the evaluation program
    #[arg(long, default_value = ".")]
    pub cwd: PathBuf,

    /// Environment variables (KEY=VALUE), can be repeated
    #[arg(long = "env", value_name = "KEY=VALUE")]
    pub env_vars: Vec<String>,

    /// Job wall-clock limit in seconds (overrides GANTRY_TIME_LIMIT)
    #[arg(long, value_name = "SECS")]
    pub time_limit_secs: Option<u64>,

    /// Interval before the limit at which the soft stop is delivered
    #[arg(long, value_name = "SECS", default_value = "120")]
    pub grace_secs: u64,

    /// Print the composed invocation and exit without launching
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Arguments forwarded to the evaluation program (after --)
    #[arg(last = true)]
    pub forwarded: Vec<String>,
}

impl Args {
    /// Parse environment variables into key-value pairs.
    pub fn parse_env(&self) -> Vec<(String, String)> {
        self.env_vars
            .iter()
            .filter_map(|s| {
                let mut parts = s.splitn(2, '=');
                let key = parts.next()?;
                let value = parts.next().unwrap_or("");
                Some((key.to_string(), value.to_string()))
            })
            .collect()
    }
}
