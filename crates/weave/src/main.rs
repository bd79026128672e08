//! weave CLI - markdown directive expander and static site builder.
//!
//! Provides commands for:
//! - `build`: Expand directives and build the site (the default)
//! - `expand`: Print one file with its directives expanded

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, ExpandArgs};
use output::Output;

/// weave - markdown directive expander and static site builder.
#[derive(Parser)]
#[command(name = "weave", version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    // Used when no command is given.
    #[command(flatten)]
    build: BuildArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site (default when no command is given).
    Build(BuildArgs),
    /// Print a markdown file with its directives expanded.
    Expand(ExpandArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Build(args) => args.verbose,
            Self::Expand(args) => args.verbose,
        }
    }
}

/// --verbose enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();
    let command = cli.command.unwrap_or(Commands::Build(cli.build));

    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(command.verbose(), rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let result = match command {
        Commands::Build(args) => args.execute(),
        Commands::Expand(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_builds() {
        let cli = Cli::try_parse_from(["weave"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["weave", "--site-dir", "out", "-v"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.build.verbose);
    }

    #[test]
    fn test_build_flags() {
        let cli = Cli::try_parse_from(["weave", "build", "--site-dir", "out", "-v"]).unwrap();
        let command = cli.command.unwrap();
        assert!(command.verbose());
        assert!(matches!(command, Commands::Build(_)));
    }

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter(false, None).to_string(), "warn");
        assert_eq!(log_filter(false, Some("")).to_string(), "warn");
    }

    #[test]
    fn test_log_filter_sources() {
        assert_eq!(log_filter(false, Some("debug")).to_string(), "debug");
        assert_eq!(log_filter(true, Some("debug")).to_string(), "info");
    }

    #[test]
    fn test_config_reads_weave_config_env() {
        use clap::CommandFactory;

        let cli = Cli::command();
        let commands = [
            &cli,
            cli.find_subcommand("build").unwrap(),
            cli.find_subcommand("expand").unwrap(),
        ];
        for command in commands {
            let config = command
                .get_arguments()
                .find(|arg| arg.get_id() == "config")
                .unwrap();
            assert_eq!(config.get_env(), Some(std::ffi::OsStr::new("WEAVE_CONFIG")));
        }
    }

    #[test]
    fn test_expand_requires_file() {
        assert!(Cli::try_parse_from(["weave", "expand"]).is_err());
        let cli = Cli::try_parse_from(["weave", "expand", "docs/index.md"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Expand(_))));
    }
}
