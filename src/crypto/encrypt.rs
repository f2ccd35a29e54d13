// src/crypto/encrypt.rs
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::rngs::OsRng;
use rand::TryRngCore;
use zeroize::Zeroizing;

use crate::aliases::{DataKey32, PlainText};
use crate::consts::{AUTH_TAG_LEN, DATA_KEY_LEN, NONCE_LEN};
use crate::crypto::envelope::{EncryptedEnvelope, SensitiveRecord};
use crate::error::{ManifestError, Result};
use crate::key_ops::KeyProvider;

/// Seal a record under a fresh data key, wrapped by the provider's public key.
///
/// Only fails when the RNG, the cipher or the key wrap fails.
pub fn seal_record(keys: &KeyProvider, record: &SensitiveRecord) -> Result<EncryptedEnvelope> {
    let plaintext: PlainText = Zeroizing::new(
        serde_json::to_vec(record)
            .map_err(|e| ManifestError::Encryption(format!("record serialization failed: {e}")))?,
    );

    let mut data_key: DataKey32 = Zeroizing::new([0u8; DATA_KEY_LEN]);
    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(data_key.as_mut_slice())
        .map_err(|e| ManifestError::Encryption(format!("OS randomness unavailable: {e}")))?;
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| ManifestError::Encryption(format!("OS randomness unavailable: {e}")))?;

    let cipher = Aes256Gcm::new_from_slice(data_key.as_slice())
        .map_err(|e| ManifestError::Encryption(format!("cipher init failed: {e}")))?;

    // aes-gcm appends the tag; it is stored in its own column
    let mut ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_slice())
        .map_err(|_| ManifestError::Encryption("AES-GCM encryption failed".into()))?;
    let auth_tag = ciphertext.split_off(ciphertext.len() - AUTH_TAG_LEN);

    let wrapped_key = keys.wrap_key(&data_key)?;

    Ok(EncryptedEnvelope {
        wrapped_key,
        ciphertext,
        nonce: nonce.to_vec(),
        auth_tag,
    })
}
