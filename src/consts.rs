// src/consts.rs
//! Shared constants: security parameters and defaults

/// AES-256 data key length in bytes
pub const DATA_KEY_LEN: usize = 32;

/// AES-GCM nonce length (96 bits)
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length (128 bits)
pub const AUTH_TAG_LEN: usize = 16;

/// Modulus size used when generating a fresh keypair
pub const DEFAULT_RSA_BITS: usize = 2048;

/// Smallest modulus that can OAEP-SHA256 wrap a 256-bit key
pub const MIN_RSA_BITS: usize = 1024;

pub const DEFAULT_PUBLIC_KEY_PATH: &str = "keys/rsa_public.pem";
pub const DEFAULT_PRIVATE_KEY_PATH: &str = "keys/rsa_private.pem";
pub const DEFAULT_MANIFEST_DB: &str = "data/manifest.db";

pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Status string reported for a completed ingestion
pub const STATUS_SUCCESS: &str = "success";
