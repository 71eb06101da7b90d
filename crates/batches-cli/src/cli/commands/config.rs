//! `batches config` – show where settings come from.

use anyhow::Result;
use batches_core::config::{self, BatchesConfig};

pub fn run_config(cfg: &BatchesConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", cfg.to_toml()?);
    Ok(())
}
