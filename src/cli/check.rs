//! Check command implementation
//!
//! Performs the same construction the backend does at startup and reports
//! whether it would succeed, including the bind-address coercion.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use crate::loader;

#[derive(Args)]
pub struct CheckArgs {}

pub fn run(_args: CheckArgs, env_file: Option<&Path>) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let settings = loader::load_from(&cwd, env_file)?;

    // The bind address is the one derived value startup depends on.
    let addr = settings.socket_addr()?;

    println!("Configuration OK");
    println!("  network:  {}", settings.solana_network);
    println!("  bind:     {addr}");
    println!("  database: {}", settings.redacted().database_url);
    println!("  model:    {} ({} nodes)", settings.llm_model, settings.inference_nodes);
    Ok(())
}
