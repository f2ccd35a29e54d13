// src/config/mod.rs
//! Configuration system for passenger-manifest-vault
//!
//! TOML file + `PMV_*` env overrides. `load()` returns an owned value that
//! the caller passes on; there is no global config.

pub use app::{load, Config, Ingest, Keys, Paths};
pub use defaults::{
    DEFAULT_CONFIG_FILE, ENV_CONFIG, ENV_MANIFEST_DB, ENV_PRIVATE_KEY, ENV_PUBLIC_KEY,
};

mod app;
mod defaults;
