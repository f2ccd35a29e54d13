// src/db/manifest_db_conn.rs
use std::time::Duration;
use std::{fs, path::Path};

use rusqlite::{Connection, Result};
use tracing::debug;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS passengers (
        passenger_id   INTEGER PRIMARY KEY AUTOINCREMENT,
        admin_id       INTEGER NOT NULL,
        passenger_name TEXT NOT NULL,
        gender         TEXT NOT NULL CHECK (gender IN ('M', 'F', 'Other')),
        job            TEXT,
        wrapped_key    BLOB NOT NULL,
        ciphertext     BLOB NOT NULL,
        nonce          BLOB NOT NULL,
        auth_tag       BLOB NOT NULL,
        created_at     TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE INDEX IF NOT EXISTS idx_passengers_admin_id ON passengers(admin_id);
"#;

/// Open (or create) the manifest database and make sure the schema exists.
///
/// `busy_timeout` bounds how long a writer waits for another writer's lock.
pub fn open_manifest_db<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> Result<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let conn = Connection::open(path)?;
    conn.busy_timeout(busy_timeout)?;
    init_schema(&conn)?;

    debug!(path = %path.display(), "opened manifest database");
    Ok(conn)
}

/// Private in-memory database, mainly for tests
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
}
