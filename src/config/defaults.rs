// src/config/defaults.rs
use crate::config::app::{Ingest, Keys, Paths};
use crate::consts::{
    DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_MANIFEST_DB, DEFAULT_PRIVATE_KEY_PATH,
    DEFAULT_PUBLIC_KEY_PATH,
};
use crate::enums::EmptyManifestPolicy;

pub const DEFAULT_CONFIG_FILE: &str = "dev-config.toml";

pub const ENV_CONFIG: &str = "PMV_CONFIG";
pub const ENV_MANIFEST_DB: &str = "PMV_MANIFEST_DB";
pub const ENV_PUBLIC_KEY: &str = "PMV_PUBLIC_KEY";
pub const ENV_PRIVATE_KEY: &str = "PMV_PRIVATE_KEY";

pub fn default_keys() -> Keys {
    Keys {
        public_key_path: DEFAULT_PUBLIC_KEY_PATH.into(),
        private_key_path: DEFAULT_PRIVATE_KEY_PATH.into(),
    }
}

pub fn default_paths() -> Paths {
    Paths {
        manifest_db: DEFAULT_MANIFEST_DB.into(),
    }
}

pub fn default_ingest() -> Ingest {
    Ingest {
        empty_manifest: EmptyManifestPolicy::default(),
        busy_timeout_ms: default_busy_timeout_ms(),
        parallel_encrypt: default_parallel_encrypt(),
    }
}

pub fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

pub fn default_parallel_encrypt() -> bool {
    true
}
