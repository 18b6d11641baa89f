use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR: &str = ".workboard";
pub const CONFIG_FILE: &str = "config.json";
pub const STORE_URL_ENV: &str = "WORKBOARD_STORE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub store_url: String,
}

impl Config {
    /// Write the config under `dir/.workboard/`, creating the directory.
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let config_dir = dir.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).context("Failed to create .workboard directory")?;

        let path = config_dir.join(CONFIG_FILE);
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(&path, raw).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn load(path: &Path) -> Result<Config> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }
}

/// Walk up from `start` looking for a `.workboard` directory.
pub fn find_config_dir(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let candidate = current.join(CONFIG_DIR);
        if candidate.is_dir() {
            return Ok(candidate);
        }

        if !current.pop() {
            bail!("Not a workboard directory (or any parent). Run 'workboard init' first.");
        }
    }
}

/// Store URL resolution order: explicit flag (clap also feeds the
/// WORKBOARD_STORE_URL environment variable through it), then the discovered
/// config file.
pub fn resolve_store_url(override_url: Option<&str>) -> Result<String> {
    if let Some(url) = override_url {
        return Ok(url.to_string());
    }

    let cwd = env::current_dir()?;
    let config_dir = find_config_dir(&cwd)?;
    let config = Config::load(&config_dir.join(CONFIG_FILE))?;
    Ok(config.store_url)
}
