// src/db/mod.rs
pub mod manifest_db_conn;
pub mod passenger_ops;

pub use manifest_db_conn::{init_schema, open_in_memory, open_manifest_db};
pub use passenger_ops::{NewPassenger, StoredPassenger};
