// src/crypto/envelope.rs
//! Envelope types and the sealing seam used by the manifest pipeline

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::Result;

/// Sensitive passenger fields. Never logged, never stored in the clear.
///
/// The serialized form is the canonical plaintext of an envelope: a JSON
/// object with exactly these three keys in this order.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensitiveRecord {
    birth_date: String,
    phone_number: String,
    has_pre_existing_condition: bool,
}

impl SensitiveRecord {
    pub fn new(
        birth_date: impl Into<String>,
        phone_number: impl Into<String>,
        has_pre_existing_condition: bool,
    ) -> Self {
        Self {
            birth_date: birth_date.into(),
            phone_number: phone_number.into(),
            has_pre_existing_condition,
        }
    }

    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn has_pre_existing_condition(&self) -> bool {
        self.has_pre_existing_condition
    }
}

impl std::fmt::Debug for SensitiveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SensitiveRecord([REDACTED])")
    }
}

impl Drop for SensitiveRecord {
    fn drop(&mut self) {
        self.birth_date.zeroize();
        self.phone_number.zeroize();
        self.has_pre_existing_condition = false;
    }
}

/// Persisted form of a `SensitiveRecord`.
///
/// `ciphertext`, `nonce` and `auth_tag` come from a single AES-256-GCM call;
/// `wrapped_key` is the data key under RSA-OAEP. Replaced whole, never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedEnvelope {
    pub wrapped_key: Vec<u8>,
    pub ciphertext: Vec<u8>,
    pub nonce: Vec<u8>,
    pub auth_tag: Vec<u8>,
}

/// Seals and opens sensitive records.
///
/// `open` is fail-closed: any verification or parsing problem yields `None`,
/// never a default-filled record.
pub trait RecordSealer: Sync {
    fn seal(&self, record: &SensitiveRecord) -> Result<EncryptedEnvelope>;

    fn open(&self, envelope: &EncryptedEnvelope) -> Option<SensitiveRecord>;
}
