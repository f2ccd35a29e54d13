// src/aliases.rs
//! Zeroizing secret buffers
//!
//! These are the canonical types used for key and plaintext material.

use zeroize::Zeroizing;

use crate::consts::DATA_KEY_LEN;

/// 256-bit per-record AES key, wiped on drop
pub type DataKey32 = Zeroizing<[u8; DATA_KEY_LEN]>;

/// Serialized sensitive record before sealing / after opening
pub type PlainText = Zeroizing<Vec<u8>>;
