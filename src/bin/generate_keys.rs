// src/bin/generate_keys.rs
//! Create the envelope keypair at the configured locations
//!
//! Usage: generate_keys [bits] [--force]

use anyhow::{bail, Context, Result};
use passenger_manifest_vault::consts::DEFAULT_RSA_BITS;
use passenger_manifest_vault::{load_config, KeyProvider};
use tracing::{info, warn};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut bits = DEFAULT_RSA_BITS;
    let mut force = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--force" => force = true,
            other => {
                bits = other
                    .parse()
                    .with_context(|| format!("unrecognised argument {other:?}"))?
            }
        }
    }

    let config = load_config().context("failed to load configuration")?;
    let public_path = &config.keys.public_key_path;
    let private_path = &config.keys.private_key_path;

    if !force && (public_path.exists() || private_path.exists()) {
        bail!(
            "key files already exist ({}, {}); pass --force to overwrite (every stored \
             passenger record becomes unreadable)",
            public_path.display(),
            private_path.display()
        );
    }
    if force {
        warn!("overwriting existing keypair");
    }

    info!(bits, "generating RSA keypair");
    let keys = KeyProvider::generate(bits)?;
    keys.write_pem_files(public_path, private_path)?;

    info!(
        public = %public_path.display(),
        private = %private_path.display(),
        "keypair written"
    );
    Ok(())
}
