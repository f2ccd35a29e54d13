// src/db/passenger_ops.rs
//! Passenger table operations
//!
//! Every function takes a plain `&Connection`, so it works the same on a bare
//! connection or inside a `Transaction` (which derefs to one). Grouping the
//! delete and the batch insert into one unit is the caller's decision.

use rusqlite::types::{Type, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::crypto::EncryptedEnvelope;
use crate::enums::GenderCode;

/// A passenger ready to be written: plaintext identity + sealed envelope
#[derive(Debug, Clone)]
pub struct NewPassenger {
    pub name: String,
    pub gender: GenderCode,
    pub job: Option<String>,
    pub envelope: EncryptedEnvelope,
}

#[derive(Debug, Clone)]
pub struct StoredPassenger {
    pub passenger_id: i64,
    pub admin_id: i64,
    pub name: String,
    pub gender: GenderCode,
    pub job: Option<String>,
    pub envelope: EncryptedEnvelope,
    pub created_at: String,
}

const SELECT_COLUMNS: &str = "passenger_id, admin_id, passenger_name, gender, job,
     wrapped_key, ciphertext, nonce, auth_tag, created_at";

/// Non-BLOB envelope cells read as empty, so the row fails to open instead of
/// failing the whole query
fn envelope_part(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<u8>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Blob(bytes) => bytes.to_vec(),
        _ => Vec::new(),
    })
}

fn row_to_passenger(row: &Row<'_>) -> rusqlite::Result<StoredPassenger> {
    let gender_raw: String = row.get(3)?;
    let gender = gender_raw.parse::<GenderCode>().map_err(|msg| {
        rusqlite::Error::FromSqlConversionFailure(3, Type::Text, msg.into())
    })?;

    Ok(StoredPassenger {
        passenger_id: row.get(0)?,
        admin_id: row.get(1)?,
        name: row.get(2)?,
        gender,
        job: row.get(4)?,
        envelope: EncryptedEnvelope {
            wrapped_key: envelope_part(row, 5)?,
            ciphertext: envelope_part(row, 6)?,
            nonce: envelope_part(row, 7)?,
            auth_tag: envelope_part(row, 8)?,
        },
        created_at: row.get(9)?,
    })
}

/// Point lookup by passenger id
pub fn fetch_passenger(conn: &Connection, passenger_id: i64) -> rusqlite::Result<Option<StoredPassenger>> {
    conn.query_row(
        &format!("SELECT {SELECT_COLUMNS} FROM passengers WHERE passenger_id = ?1"),
        [passenger_id],
        row_to_passenger,
    )
    .optional()
}

/// All passengers owned by one admin, in insertion order
pub fn list_by_admin(conn: &Connection, admin_id: i64) -> rusqlite::Result<Vec<StoredPassenger>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {SELECT_COLUMNS} FROM passengers WHERE admin_id = ?1 ORDER BY passenger_id"
    ))?;
    let rows = stmt.query_map([admin_id], row_to_passenger)?;
    rows.collect()
}

pub fn count_by_admin(conn: &Connection, admin_id: i64) -> rusqlite::Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM passengers WHERE admin_id = ?1",
        [admin_id],
        |r| r.get(0),
    )?;
    Ok(count as usize)
}

pub fn delete_by_admin(conn: &Connection, admin_id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM passengers WHERE admin_id = ?1", [admin_id])
}

pub fn insert_one(conn: &Connection, admin_id: i64, passenger: &NewPassenger) -> rusqlite::Result<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO passengers (
            admin_id, passenger_name, gender, job,
            wrapped_key, ciphertext, nonce, auth_tag
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    stmt.execute(params![
        admin_id,
        &passenger.name,
        passenger.gender.as_str(),
        &passenger.job,
        &passenger.envelope.wrapped_key,
        &passenger.envelope.ciphertext,
        &passenger.envelope.nonce,
        &passenger.envelope.auth_tag,
    ])?;
    Ok(conn.last_insert_rowid())
}

/// Insert every passenger with one prepared statement; stops at the first error
pub fn insert_batch(
    conn: &Connection,
    admin_id: i64,
    passengers: &[NewPassenger],
) -> rusqlite::Result<Vec<i64>> {
    passengers
        .iter()
        .map(|p| insert_one(conn, admin_id, p))
        .collect()
}
