use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Defaults for sweeps, loaded from `~/.config/batches/config.toml`.
///
/// Every field is optional in the file; command-line flags override them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchesConfig {
    /// Maximum elements per batch (0 is treated as 1).
    pub batch_size: u32,
    /// Worker count; 0 or 1 runs batches sequentially.
    pub concurrency: u16,
    /// Print timing lines to stderr while running.
    pub progress: bool,
}

impl Default for BatchesConfig {
    fn default() -> Self {
        Self {
            batch_size: 100,
            concurrency: 1,
            progress: true,
        }
    }
}

impl BatchesConfig {
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("batches")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BatchesConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = BatchesConfig::default();
        let toml = default_cfg.to_toml()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<BatchesConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: BatchesConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
