use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Base address used when nothing else is configured; matches the
/// local development address of the backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5062";

/// Environment variable consulted before the config file.
pub const BASE_URL_ENV: &str = "APIDASH_BASE_URL";

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional base address of the API, e.g. "http://localhost:5062".
    pub base_url: Option<String>,
}

impl Config {
    /// Resolve the effective base address. First match wins:
    /// explicit flag, then `APIDASH_BASE_URL`, then the config file,
    /// then the built-in default. Trailing slashes are stripped so
    /// path joining stays uniform.
    pub fn resolve_base_url(&self, explicit: Option<&str>) -> String {
        let env = std::env::var(BASE_URL_ENV).ok();
        self.resolve_base_url_with(explicit, env.as_deref())
    }

    /// Resolution core, with the environment value passed in.
    pub fn resolve_base_url_with(&self, explicit: Option<&str>, env: Option<&str>) -> String {
        let raw = explicit
            .or(env)
            .or(self.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL);

        raw.trim_end_matches('/').to_string()
    }

    pub fn set_base_url(&mut self, base_url: String) {
        self.base_url = Some(base_url);
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "apidash", "apidash-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
