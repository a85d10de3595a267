//! daollm-config: inspect and validate the backend's resolved configuration

use anyhow::Result;

fn main() -> Result<()> {
    daollm_config::cli::run()
}
