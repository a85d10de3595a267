//! Show command implementation

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use crate::loader;

#[derive(Args)]
pub struct ShowArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Print credentials and URL passwords unmasked
    #[arg(long)]
    pub reveal_secrets: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Format {
    /// One KEY = value line per field
    Text,
    /// The settings record as JSON
    Json,
}

pub fn run(args: ShowArgs, env_file: Option<&Path>) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let settings = loader::load_from(&cwd, env_file)?;

    let settings = if args.reveal_secrets { settings } else { settings.redacted() };

    match args.format {
        Format::Text => {
            for (key, value) in settings.env_entries() {
                println!("{key} = {value}");
            }
        }
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
