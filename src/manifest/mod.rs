// src/manifest/mod.rs
//! Passenger manifest workflows: CSV ingestion and decrypt-on-read
pub mod csv_input;
pub mod ingest;
pub mod normalize;
pub mod read;

pub use csv_input::parse_manifest_csv;
pub use ingest::{
    apply_manifest, ingest_into, insert_passenger, prepare_manifest, replace_manifest,
    IngestOptions, IngestOutcome,
};
pub use normalize::{normalize_condition, normalize_gender, normalize_row, PassengerRow};
pub use read::{
    get_passenger, list_manifest, list_manifest_with, ManifestListing, PassengerView,
};
