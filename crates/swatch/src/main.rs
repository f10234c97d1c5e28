//! Swatch CLI - build a style guide website from documentation comments.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use swatch_static::DEFAULT_CONFIG_FILE;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "swatch")]
#[command(about = "Build a style guide website from documentation comments")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the config file to build from
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default config file and documentation assets
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    exit_code(run(cli))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Init) => {
            commands::init::run()?;
        }
        None => {
            commands::build::run(&cli.config)?;
        }
    }

    Ok(())
}

/// Log a fatal error and map the outcome to a process exit code.
fn exit_code(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_error_exits_with_failure() {
        let code = |result| format!("{:?}", exit_code(result));

        assert_eq!(code(Ok(())), format!("{:?}", ExitCode::SUCCESS));
        assert_eq!(
            code(Err(anyhow::anyhow!("No config file found"))),
            format!("{:?}", ExitCode::FAILURE)
        );
    }

    #[test]
    fn missing_config_is_fatal() {
        let temp = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from(["swatch", temp.path().join("missing.yml").to_str().unwrap()]);

        assert!(run(cli).is_err());
    }
}
