// src/manifest/read.rs
//! Decrypt-on-read: stored envelopes back into passenger views

use chrono::NaiveDate;
use rayon::prelude::*;
use rusqlite::Connection;
use serde::Serialize;
use tracing::warn;

use crate::crypto::RecordSealer;
use crate::db::passenger_ops::{fetch_passenger, list_by_admin};
use crate::db::StoredPassenger;
use crate::enums::GenderCode;
use crate::error::Result;

/// Plaintext columns merged with the opened envelope
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct PassengerView {
    pub passenger_id: i64,
    pub passenger_name: String,
    pub gender: GenderCode,
    pub job: Option<String>,
    pub birth: String,
    pub contact: String,
    pub special_needs: bool,
}

impl PassengerView {
    /// The birth date as a calendar date, if it was recorded as `YYYY-MM-DD`
    pub fn birth_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.birth, "%Y-%m-%d").ok()
    }
}

impl std::fmt::Debug for PassengerView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassengerView")
            .field("passenger_id", &self.passenger_id)
            .field("passenger_name", &self.passenger_name)
            .field("gender", &self.gender)
            .field("job", &self.job)
            .finish_non_exhaustive()
    }
}

/// Result of listing a manifest.
///
/// Rows whose envelope fails to open are not fatal: they are left out of
/// `passengers` and their ids are reported in `skipped`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ManifestListing {
    pub passengers: Vec<PassengerView>,
    pub skipped: Vec<i64>,
}

impl ManifestListing {
    /// Rows present in storage, readable or not
    pub fn total_stored(&self) -> usize {
        self.passengers.len() + self.skipped.len()
    }

    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

fn open_view<S: RecordSealer>(sealer: &S, stored: &StoredPassenger) -> Option<PassengerView> {
    let record = sealer.open(&stored.envelope)?;
    Some(PassengerView {
        passenger_id: stored.passenger_id,
        passenger_name: stored.name.clone(),
        gender: stored.gender,
        job: stored.job.clone(),
        birth: record.birth_date().to_string(),
        contact: record.phone_number().to_string(),
        special_needs: record.has_pre_existing_condition(),
    })
}

/// Single lookup. Missing rows and unreadable envelopes are both `None`.
pub fn get_passenger<S: RecordSealer>(
    conn: &Connection,
    sealer: &S,
    passenger_id: i64,
) -> Result<Option<PassengerView>> {
    let Some(stored) = fetch_passenger(conn, passenger_id)? else {
        return Ok(None);
    };
    let view = open_view(sealer, &stored);
    if view.is_none() {
        warn!(passenger_id, "passenger envelope could not be opened; reporting not found");
    }
    Ok(view)
}

/// Every readable passenger of one admin, plus the ids that were skipped.
///
/// Envelopes are opened on the rayon pool; see `list_manifest_with`.
pub fn list_manifest<S: RecordSealer>(
    conn: &Connection,
    sealer: &S,
    admin_id: i64,
) -> Result<ManifestListing> {
    list_manifest_with(conn, sealer, admin_id, true)
}

/// `list_manifest` with explicit control over parallel decryption
/// (`[ingest] parallel_encrypt` / `IngestOptions::parallel`)
pub fn list_manifest_with<S: RecordSealer>(
    conn: &Connection,
    sealer: &S,
    admin_id: i64,
    parallel: bool,
) -> Result<ManifestListing> {
    let stored = list_by_admin(conn, admin_id)?;

    let open = |p: &StoredPassenger| (p.passenger_id, open_view(sealer, p));
    let opened: Vec<(i64, Option<PassengerView>)> = if parallel {
        stored.par_iter().map(open).collect()
    } else {
        stored.iter().map(open).collect()
    };

    let mut listing = ManifestListing::default();
    for (passenger_id, view) in opened {
        match view {
            Some(view) => listing.passengers.push(view),
            None => listing.skipped.push(passenger_id),
        }
    }

    if !listing.is_complete() {
        warn!(
            admin_id,
            skipped = listing.skipped.len(),
            returned = listing.passengers.len(),
            "manifest listing omitted unreadable passengers"
        );
    }
    Ok(listing)
}
