use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Snapshot path used when neither the CLI nor the config names one.
pub const DEFAULT_OUTPUT: &str = "preload.json";

/// Global configuration loaded from `~/.config/preload/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreloadConfig {
    /// Number of concurrent lookups. None (or 0) = available hardware parallelism.
    #[serde(default)]
    pub threads: Option<usize>,
    /// Default snapshot path written by `preload save`.
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Default catalog file used by the offline resolver.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Simulated per-lookup latency in milliseconds (catalog resolver only).
    #[serde(default)]
    pub latency_ms: Option<u64>,
}

impl PreloadConfig {
    /// Worker count for the batch coordinator; always at least 1.
    pub fn effective_threads(&self) -> usize {
        match self.threads {
            Some(n) if n > 0 => n,
            _ => std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("preload")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PreloadConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Same as [`load_or_init`] with an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<PreloadConfig> {
    if !path.exists() {
        let default_cfg = PreloadConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: PreloadConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
