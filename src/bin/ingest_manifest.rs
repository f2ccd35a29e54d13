// src/bin/ingest_manifest.rs
//! Offline manifest ingestion: replace one admin's passengers from a CSV file
//!
//! Usage: ingest_manifest <csv-path> <admin-id>

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use passenger_manifest_vault::db::open_manifest_db;
use passenger_manifest_vault::{
    load_config, replace_manifest, EnvelopeCipher, IngestOptions, KeyProvider,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(csv_path), Some(admin_id)) = (args.next(), args.next()) else {
        bail!("usage: ingest_manifest <csv-path> <admin-id>");
    };
    let csv_path = PathBuf::from(csv_path);
    let admin_id: i64 = admin_id
        .parse()
        .with_context(|| format!("admin id must be an integer, got {admin_id:?}"))?;

    if !csv_path.exists() {
        bail!("CSV file does not exist: {}", csv_path.display());
    }

    let config = load_config().context("failed to load configuration")?;

    // Without both key files there is nothing to protect the data with
    let keys = KeyProvider::from_config(&config.keys)
        .context("envelope keypair unavailable; run generate_keys first")?;
    let cipher = EnvelopeCipher::new(&keys);
    let options = IngestOptions::from(&config.ingest);

    let data = std::fs::read(&csv_path)
        .with_context(|| format!("failed to read {}", csv_path.display()))?;
    info!(path = %csv_path.display(), bytes = data.len(), "loaded manifest file");

    let mut conn = open_manifest_db(&config.paths.manifest_db, options.busy_timeout)
        .with_context(|| format!("failed to open {}", config.paths.manifest_db.display()))?;

    match replace_manifest(&mut conn, &cipher, admin_id, &data, &options) {
        Ok(outcome) => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(())
        }
        Err(err) => {
            error!(kind = ?err.kind(), "ingestion failed; previous manifest left unchanged");
            Err(err.into())
        }
    }
}
