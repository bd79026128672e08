//! `weave expand` command implementation.

use std::path::PathBuf;

use clap::Args;
use console::Term;
use weave_config::Config;

use super::expander_from_config;
use crate::error::CliError;

/// Arguments for the expand command.
#[derive(Args)]
pub(crate) struct ExpandArgs {
    /// Markdown file to expand.
    file: PathBuf,

    /// Path to configuration file (default: auto-discover weave.toml).
    #[arg(short, long, env = "WEAVE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output (per-directive logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExpandArgs {
    /// Execute the expand command, writing the result to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the file cannot be read or a
    /// directive fails to resolve.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let source = std::fs::read_to_string(&self.file)?;

        let expanded = expander_from_config(&config.directives_resolved).expand(&source)?;

        tracing::info!(
            file = %self.file.display(),
            bytes = expanded.len(),
            "Expanded file"
        );
        Term::stdout().write_str(&expanded)?;
        Ok(())
    }
}
