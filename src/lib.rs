// src/lib.rs
//! passenger-manifest-vault: envelope-encrypted passenger manifests
//!
//! Features:
//! - Per-record AES-256-GCM keys wrapped with a static RSA-OAEP keypair
//! - CSV ingestion with transactional replace-all per admin
//! - Fail-closed decrypt-on-read with observable skips
//! - SQLite storage via rusqlite

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod db;
pub mod enums;
pub mod error;
pub mod key_ops;
pub mod manifest;

// Re-export everything users need at the crate root
pub use config::load as load_config;
pub use crypto::{EncryptedEnvelope, EnvelopeCipher, RecordSealer, SensitiveRecord};
pub use enums::{EmptyManifestPolicy, GenderCode};
pub use error::{ErrorKind, ManifestError, Result};
pub use key_ops::KeyProvider;
pub use manifest::{
    get_passenger, ingest_into, insert_passenger, list_manifest, list_manifest_with,
    replace_manifest, IngestOptions, IngestOutcome, ManifestListing, PassengerRow, PassengerView,
};
