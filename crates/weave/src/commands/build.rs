//! `weave build` command implementation.

use std::path::PathBuf;

use clap::Args;
use weave_config::{CliSettings, Config};
use weave_site::{BuildConfig, Pipeline, SiteBuilder};

use super::expander_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover weave.toml).
    #[arg(short, long, env = "WEAVE_CONFIG")]
    config: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(long)]
    site_dir: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(long)]
    docs_dir: Option<PathBuf>,

    /// Enable verbose output (per-phase build logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any document, asset or
    /// page cannot be built.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            docs_dir: self.docs_dir,
            site_dir: self.site_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config_path = ?config.config_path, "Loaded configuration");

        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        output.info(&format!(
            "Source: {}",
            config.site_resolved.docs_dir.display()
        ));
        output.info(&format!(
            "Output: {}",
            config.site_resolved.site_dir.display()
        ));

        let pipeline =
            Pipeline::new().with_stage(expander_from_config(&config.directives_resolved));
        let builder = SiteBuilder::new(BuildConfig::from_config(&config), pipeline);
        let report = builder.build()?;

        output.success(&format!(
            "Built {} documents, {} assets and {} pages to {}",
            report.documents,
            report.assets,
            report.pages,
            config.site_resolved.site_dir.display()
        ));
        Ok(())
    }
}
