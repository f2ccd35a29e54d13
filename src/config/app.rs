// src/config/app.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use super::defaults::*;
use crate::enums::EmptyManifestPolicy;
use crate::error::{ManifestError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_keys")]
    pub keys: Keys,
    #[serde(default = "default_paths")]
    pub paths: Paths,
    #[serde(default = "default_ingest")]
    pub ingest: Ingest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Keys {
    pub public_key_path: PathBuf,
    pub private_key_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paths {
    pub manifest_db: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ingest {
    #[serde(default)]
    pub empty_manifest: EmptyManifestPolicy,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    #[serde(default = "default_parallel_encrypt")]
    pub parallel_encrypt: bool,
}

impl Ingest {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            keys: default_keys(),
            paths: default_paths(),
            ingest: default_ingest(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ManifestError::Config(e.to_string()))
    }

    /// Read a TOML file; a missing file is an error here (see `load` for the fallback)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Apply `PMV_*` environment overrides on top of whatever was loaded
    pub fn apply_env_overrides(&mut self) {
        if let Ok(db) = std::env::var(ENV_MANIFEST_DB) {
            self.paths.manifest_db = db.into();
        }
        if let Ok(public) = std::env::var(ENV_PUBLIC_KEY) {
            self.keys.public_key_path = public.into();
        }
        if let Ok(private) = std::env::var(ENV_PRIVATE_KEY) {
            self.keys.private_key_path = private.into();
        }
    }
}

/// Load config at startup, falling back to defaults if the file is missing.
///
/// A file that exists but does not parse is an error, not a silent fallback.
pub fn load() -> Result<Config> {
    let config_path =
        std::env::var(ENV_CONFIG).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

    let mut conf = if Path::new(&config_path).exists() {
        debug!(path = %config_path, "loading config");
        Config::from_file(&config_path)?
    } else {
        warn!(path = %config_path, "config file not found, using built-in defaults");
        Config::default()
    };

    conf.apply_env_overrides();
    Ok(conf)
}
