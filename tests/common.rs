// tests/common.rs
//! Shared test utilities for logging, shared keys and CSV input
#![allow(dead_code)]

use std::sync::OnceLock;

use passenger_manifest_vault::db::open_in_memory;
use passenger_manifest_vault::{EnvelopeCipher, IngestOptions, KeyProvider};
use rusqlite::Connection;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const NATIVE_HEADER: &str = "이름,성별,직업,생년월일,전화번호,지병여부";

/// Initialize test-friendly logging; safe to call from every test
pub fn setup() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();
}

/// RSA generation is the slow part, so every test in a binary shares one pair
pub fn keys() -> &'static KeyProvider {
    static KEYS: OnceLock<KeyProvider> = OnceLock::new();
    KEYS.get_or_init(|| KeyProvider::generate(2048).expect("generate test keypair"))
}

pub fn cipher() -> EnvelopeCipher<'static> {
    EnvelopeCipher::new(keys())
}

pub fn memory_db() -> Connection {
    open_in_memory().expect("open in-memory manifest db")
}

/// Header plus the given data lines, newline-terminated
pub fn csv(rows: &[&str]) -> Vec<u8> {
    let mut out = String::from(NATIVE_HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    out.into_bytes()
}

pub fn sequential() -> IngestOptions {
    IngestOptions {
        parallel: false,
        ..IngestOptions::default()
    }
}
