//! Launch configuration from the environment.
//!
//! The scheduler job script sources the site `env.sh` before invoking
//! gantry; the variables below are the contract between the two.

use thiserror::Error;

/// Readiness flag, set by sourcing the site environment file.
pub const READY_VAR: &str = "GANTRY_ENV";
/// Path of the evaluation program to invoke.
pub const PROGRAM_VAR: &str = "GANTRY_PROGRAM";
/// Dataset directory, forwarded as `--dataset-path`.
pub const DATASET_VAR: &str = "GANTRY_DATASET";
/// Model artifact identifier, forwarded as `--model`.
pub const MODEL_VAR: &str = "GANTRY_MODEL";
/// Optional run label, forwarded as `--run-name`.
pub const RUN_NAME_VAR: &str = "GANTRY_RUN_NAME";
/// Optional job wall-clock limit in seconds.
pub const TIME_LIMIT_VAR: &str = "GANTRY_TIME_LIMIT";

/// Errors detected before anything is launched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The site environment has not been sourced.
    #[error("environment not initialized: run 'source env.sh' before launching (GANTRY_ENV is unset)")]
    NotInitialized,

    /// A required variable is missing or empty.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is present but unparseable.
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Launch configuration resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub program: String,
    pub dataset: String,
    pub model: String,
    pub run_name: Option<String>,
    pub time_limit_secs: Option<u64>,
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Whitespace-only counts as unset
        let present = |var: &'static str| lookup(var).filter(|v| !v.trim().is_empty());

        if present(READY_VAR).is_none() {
            return Err(ConfigError::NotInitialized);
        }

        let required = |var: &'static str| present(var).ok_or(ConfigError::Missing(var));

        let program = required(PROGRAM_VAR)?;
        let dataset = required(DATASET_VAR)?;
        let model = required(MODEL_VAR)?;
        let run_name = present(RUN_NAME_VAR);

        let time_limit_secs = match present(TIME_LIMIT_VAR) {
            None => None,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: TIME_LIMIT_VAR,
                        value,
                    })
                }
            },
        };

        Ok(Self {
            program,
            dataset,
            model,
            run_name,
            time_limit_secs,
        })
    }
}
