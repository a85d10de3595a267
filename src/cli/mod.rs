//! Command-line interface for daollm-config
//!
//! Provides `show` and `check` subcommands for inspecting and validating
//! the configuration the backend would start with.

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod check;
mod show;

/// Inspect and validate the daollm backend configuration
#[derive(Parser)]
#[command(name = "daollm-config")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Explicit env-file path (default: ./.env, which may be absent)
    #[arg(long, global = true, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved settings, secrets redacted
    Show(show::ShowArgs),

    /// Validate that the backend could start with this configuration
    Check(check::CheckArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Show(args) => show::run(args, cli.env_file.as_deref()),
        Commands::Check(args) => check::run(args, cli.env_file.as_deref()),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "daollm-config",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
