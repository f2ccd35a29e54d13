// src/crypto/mod.rs
//! Envelope encryption for sensitive passenger fields (in memory only)
//!
//! Each record gets its own random AES-256-GCM key; that key is wrapped with
//! the long-lived RSA public key held by a `KeyProvider`. All functions work
//! on in-memory buffers; persisting an envelope is the caller's job.

mod decrypt;
mod encrypt;
mod envelope;

pub use decrypt::open_record;
pub use encrypt::seal_record;
pub use envelope::{EncryptedEnvelope, RecordSealer, SensitiveRecord};

use tracing::warn;

use crate::error::Result;
use crate::key_ops::KeyProvider;

/// The envelope cipher bound to one injected keypair
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeCipher<'k> {
    keys: &'k KeyProvider,
}

impl<'k> EnvelopeCipher<'k> {
    pub fn new(keys: &'k KeyProvider) -> Self {
        Self { keys }
    }

    pub fn encrypt(&self, record: &SensitiveRecord) -> Result<EncryptedEnvelope> {
        seal_record(self.keys, record)
    }

    /// Fail-closed decrypt: `None` means "record unavailable"
    pub fn decrypt(&self, envelope: &EncryptedEnvelope) -> Option<SensitiveRecord> {
        match open_record(self.keys, envelope) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(error = %err, "envelope rejected");
                None
            }
        }
    }

    /// Same as `decrypt` but keeps the reason
    pub fn try_decrypt(&self, envelope: &EncryptedEnvelope) -> Result<SensitiveRecord> {
        open_record(self.keys, envelope)
    }
}

impl RecordSealer for EnvelopeCipher<'_> {
    fn seal(&self, record: &SensitiveRecord) -> Result<EncryptedEnvelope> {
        self.encrypt(record)
    }

    fn open(&self, envelope: &EncryptedEnvelope) -> Option<SensitiveRecord> {
        self.decrypt(envelope)
    }
}
