//! Evaluation command-line composition.

use crate::config::Config;

/// The composed invocation of the evaluation program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Compose the evaluation program's argv from the configuration and the
    /// caller's forwarded arguments.
    ///
    /// Fixed options come first, in a deterministic order; forwarded
    /// arguments follow verbatim, preserving order and content.
    pub fn compose(config: &Config, forwarded: &[String]) -> Self {
        let mut args = vec![
            "--dataset-path".to_string(),
            config.dataset.clone(),
            "--model".to_string(),
            config.model.clone(),
        ];

        if let Some(run_name) = &config.run_name {
            args.push("--run-name".to_string());
            args.push(run_name.clone());
        }

        args.extend(forwarded.iter().cloned());

        Self {
            program: config.program.clone(),
            args,
        }
    }

    /// Render the command line for `--dry-run` output.
    pub fn render(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}
