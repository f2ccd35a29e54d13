// src/crypto/decrypt.rs
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use zeroize::Zeroizing;

use crate::aliases::PlainText;
use crate::consts::{AUTH_TAG_LEN, NONCE_LEN};
use crate::crypto::envelope::{EncryptedEnvelope, SensitiveRecord};
use crate::error::{ManifestError, Result};
use crate::key_ops::KeyProvider;

/// Open an envelope: unwrap, verify-and-decrypt, parse.
///
/// Plaintext is only produced after the GCM tag verifies. Error messages
/// never carry record content.
pub fn open_record(keys: &KeyProvider, envelope: &EncryptedEnvelope) -> Result<SensitiveRecord> {
    if envelope.nonce.len() != NONCE_LEN {
        return Err(ManifestError::Decryption(format!(
            "nonce is {} bytes, expected {NONCE_LEN}",
            envelope.nonce.len()
        )));
    }
    if envelope.auth_tag.len() != AUTH_TAG_LEN {
        return Err(ManifestError::Decryption(format!(
            "auth tag is {} bytes, expected {AUTH_TAG_LEN}",
            envelope.auth_tag.len()
        )));
    }

    let data_key = keys.unwrap_key(&envelope.wrapped_key)?;
    let cipher = Aes256Gcm::new_from_slice(data_key.as_slice())
        .map_err(|e| ManifestError::Decryption(format!("cipher init failed: {e}")))?;

    let mut sealed = Vec::with_capacity(envelope.ciphertext.len() + AUTH_TAG_LEN);
    sealed.extend_from_slice(&envelope.ciphertext);
    sealed.extend_from_slice(&envelope.auth_tag);

    let plaintext: PlainText = Zeroizing::new(
        cipher
            .decrypt(Nonce::from_slice(&envelope.nonce), sealed.as_slice())
            .map_err(|_| ManifestError::Decryption("authentication failed".into()))?,
    );

    serde_json::from_slice(&plaintext).map_err(|e| {
        ManifestError::Decryption(format!(
            "malformed record payload at line {} column {}",
            e.line(),
            e.column()
        ))
    })
}
