// src/manifest/ingest.rs
//! Manifest ingestion: parse → normalize → seal → atomic replace
//!
//! Parsing and sealing finish before the first write. The delete and the
//! batch insert then run inside one transaction, so a failure anywhere
//! leaves the admin's previous manifest exactly as it was.

use std::time::Duration;

use rayon::prelude::*;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Ingest;
use crate::consts::{DEFAULT_BUSY_TIMEOUT_MS, STATUS_SUCCESS};
use crate::crypto::RecordSealer;
use crate::db::passenger_ops::{delete_by_admin, insert_batch, insert_one};
use crate::db::NewPassenger;
use crate::enums::EmptyManifestPolicy;
use crate::error::{ManifestError, Result};
use crate::manifest::csv_input::parse_manifest_csv;
use crate::manifest::normalize::{normalize_row, NormalizedPassenger, PassengerRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    pub empty_manifest: EmptyManifestPolicy,
    /// Upper bound on waiting for another writer's lock
    pub busy_timeout: Duration,
    /// Seal rows on the rayon pool
    pub parallel: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            empty_manifest: EmptyManifestPolicy::default(),
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
            parallel: true,
        }
    }
}

impl From<&Ingest> for IngestOptions {
    fn from(cfg: &Ingest) -> Self {
        Self {
            empty_manifest: cfg.empty_manifest,
            busy_timeout: cfg.busy_timeout(),
            parallel: cfg.parallel_encrypt,
        }
    }
}

/// Caller-facing result of a successful ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOutcome {
    pub status: String,
    pub message: String,
    pub count: usize,
}

impl IngestOutcome {
    fn stored(admin_id: i64, count: usize) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: format!("stored {count} passenger record(s) for admin {admin_id}"),
            count,
        }
    }
}

/// Parse, normalize and seal a CSV manifest without touching storage
pub fn prepare_manifest<S: RecordSealer>(
    sealer: &S,
    data: &[u8],
    options: &IngestOptions,
) -> Result<Vec<NewPassenger>> {
    let rows = parse_manifest_csv(data)?;

    if rows.is_empty() && options.empty_manifest == EmptyManifestPolicy::Reject {
        return Err(ManifestError::InputFormat(
            "manifest has a header but no passenger rows".into(),
        ));
    }

    let normalized: Vec<NormalizedPassenger> = rows.iter().map(normalize_row).collect();
    debug!(rows = normalized.len(), "manifest parsed and normalized");

    seal_rows(sealer, normalized, options.parallel)
}

fn seal_rows<S: RecordSealer>(
    sealer: &S,
    rows: Vec<NormalizedPassenger>,
    parallel: bool,
) -> Result<Vec<NewPassenger>> {
    let seal = |(index, p): (usize, NormalizedPassenger)| -> Result<NewPassenger> {
        let envelope = sealer.seal(&p.sensitive).map_err(|err| match err {
            ManifestError::Encryption(msg) => {
                ManifestError::Encryption(format!("row {}: {msg}", index + 1))
            }
            other => other,
        })?;
        Ok(NewPassenger {
            name: p.name,
            gender: p.gender,
            job: p.job,
            envelope,
        })
    };

    if parallel {
        rows.into_par_iter().enumerate().map(seal).collect()
    } else {
        rows.into_iter().enumerate().map(seal).collect()
    }
}

/// Replace the admin's manifest with already-sealed passengers inside `tx`
pub fn apply_manifest(
    tx: &Transaction<'_>,
    admin_id: i64,
    passengers: &[NewPassenger],
) -> Result<IngestOutcome> {
    let removed = delete_by_admin(tx, admin_id)?;
    let ids = insert_batch(tx, admin_id, passengers)?;

    info!(admin_id, removed, stored = ids.len(), "manifest replaced (pending commit)");
    Ok(IngestOutcome::stored(admin_id, ids.len()))
}

/// Ingest a CSV into a transaction the caller owns.
///
/// Nothing is committed here: the caller commits on `Ok`, and dropping the
/// transaction after an `Err` rolls back the delete as well.
pub fn ingest_into<S: RecordSealer>(
    tx: &Transaction<'_>,
    sealer: &S,
    admin_id: i64,
    data: &[u8],
    options: &IngestOptions,
) -> Result<IngestOutcome> {
    let passengers = prepare_manifest(sealer, data, options)?;
    apply_manifest(tx, admin_id, &passengers)
}

/// Full replace-all workflow on a connection: seal first, then take the write
/// lock (`BEGIN IMMEDIATE`), replace, commit.
///
/// Concurrent calls for the same admin serialize on SQLite's write lock.
pub fn replace_manifest<S: RecordSealer>(
    conn: &mut Connection,
    sealer: &S,
    admin_id: i64,
    data: &[u8],
    options: &IngestOptions,
) -> Result<IngestOutcome> {
    let passengers = prepare_manifest(sealer, data, options)?;

    // the caller's timeout is restored whether or not the replace succeeds
    let previous_ms: i64 = conn.pragma_query_value(None, "busy_timeout", |row| row.get(0))?;
    conn.busy_timeout(options.busy_timeout)?;
    let committed = commit_manifest(conn, admin_id, &passengers);
    conn.busy_timeout(Duration::from_millis(u64::try_from(previous_ms).unwrap_or(0)))?;
    let outcome = committed?;

    info!(admin_id, count = outcome.count, "manifest committed");
    Ok(outcome)
}

fn commit_manifest(
    conn: &mut Connection,
    admin_id: i64,
    passengers: &[NewPassenger],
) -> Result<IngestOutcome> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let outcome = apply_manifest(&tx, admin_id, passengers)?;
    tx.commit()?;
    Ok(outcome)
}

/// Seal and store one passenger for an admin; returns the new passenger id
pub fn insert_passenger<S: RecordSealer>(
    conn: &Connection,
    sealer: &S,
    admin_id: i64,
    row: &PassengerRow,
) -> Result<i64> {
    if row.name.trim().is_empty() {
        return Err(ManifestError::InputFormat("passenger name is empty".into()));
    }
    let normalized = normalize_row(row);
    let envelope = sealer.seal(&normalized.sensitive)?;
    let passenger = NewPassenger {
        name: normalized.name,
        gender: normalized.gender,
        job: normalized.job,
        envelope,
    };
    let id = insert_one(conn, admin_id, &passenger)?;
    debug!(admin_id, passenger_id = id, "passenger inserted");
    Ok(id)
}
