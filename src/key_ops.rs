// src/key_ops.rs
//! Key loading, generation and wrapping for the simulated KMS
//!
//! A `KeyProvider` holds the process-wide RSA keypair. It is created once at
//! startup and handed by reference to whatever needs to seal or open
//! envelopes. It is immutable after construction and safe to share across
//! threads without locking.
//!
//! NOTE: one static keypair protects every record ever written. Compromise of
//! the private key exposes the whole history; there is no rotation.

use std::fs;
use std::path::Path;

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::rand_core::OsRng as RsaOsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use tracing::info;
use zeroize::Zeroizing;

use crate::aliases::DataKey32;
use crate::config::Keys;
use crate::consts::{DATA_KEY_LEN, MIN_RSA_BITS};
use crate::error::{ManifestError, Result};

pub struct KeyProvider {
    public: RsaPublicKey,
    private: RsaPrivateKey,
}

impl std::fmt::Debug for KeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyProvider")
            .field("modulus_bits", &self.modulus_bits())
            .finish_non_exhaustive()
    }
}

impl KeyProvider {
    /// Load both PEM files. Any failure is a `StartupKeyMissing`; the process
    /// must not serve traffic without them.
    pub fn load<P: AsRef<Path>>(public_path: P, private_path: P) -> Result<Self> {
        let public_path = public_path.as_ref();
        let private_path = private_path.as_ref();

        let public_pem = fs::read_to_string(public_path)
            .map_err(|e| ManifestError::key_missing(public_path, e))?;
        let private_pem = Zeroizing::new(
            fs::read_to_string(private_path)
                .map_err(|e| ManifestError::key_missing(private_path, e))?,
        );

        let public = parse_public_pem(&public_pem)
            .map_err(|reason| ManifestError::key_missing(public_path, reason))?;
        let private = parse_private_pem(&private_pem)
            .map_err(|reason| ManifestError::key_missing(private_path, reason))?;

        let provider = Self::from_parts(public, private)
            .map_err(|reason| ManifestError::key_missing(private_path, reason))?;

        info!(
            public = %public_path.display(),
            modulus_bits = provider.modulus_bits(),
            "loaded envelope keypair"
        );
        Ok(provider)
    }

    /// Load from the `[keys]` section of the config
    pub fn from_config(keys: &Keys) -> Result<Self> {
        Self::load(&keys.public_key_path, &keys.private_key_path)
    }

    pub fn from_pem(public_pem: &str, private_pem: &str) -> Result<Self> {
        let public =
            parse_public_pem(public_pem).map_err(|r| ManifestError::key_missing("<public pem>", r))?;
        let private = parse_private_pem(private_pem)
            .map_err(|r| ManifestError::key_missing("<private pem>", r))?;
        Self::from_parts(public, private).map_err(|r| ManifestError::key_missing("<private pem>", r))
    }

    /// Generate a fresh keypair (key generation tool and tests)
    pub fn generate(bits: usize) -> Result<Self> {
        if bits < MIN_RSA_BITS {
            return Err(ManifestError::Config(format!(
                "RSA modulus must be at least {MIN_RSA_BITS} bits, got {bits}"
            )));
        }
        let private = RsaPrivateKey::new(&mut RsaOsRng, bits)
            .map_err(|e| ManifestError::Encryption(format!("RSA key generation failed: {e}")))?;
        let public = RsaPublicKey::from(&private);
        Ok(Self { public, private })
    }

    fn from_parts(public: RsaPublicKey, private: RsaPrivateKey) -> std::result::Result<Self, String> {
        if RsaPublicKey::from(&private) != public {
            return Err("public and private key do not belong to the same keypair".into());
        }
        if public.size() * 8 < MIN_RSA_BITS {
            return Err(format!(
                "RSA modulus of {} bits is too small to wrap a data key",
                public.size() * 8
            ));
        }
        Ok(Self { public, private })
    }

    pub fn modulus_bits(&self) -> usize {
        self.public.size() * 8
    }

    pub fn public_key_pem(&self) -> Result<String> {
        self.public
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| ManifestError::Config(format!("public key export failed: {e}")))
    }

    pub fn private_key_pem(&self) -> Result<Zeroizing<String>> {
        self.private
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| ManifestError::Config(format!("private key export failed: {e}")))
    }

    /// Write both halves as PEM (PKCS#8 / SPKI), creating parent directories
    pub fn write_pem_files<P: AsRef<Path>>(&self, public_path: P, private_path: P) -> Result<()> {
        for path in [public_path.as_ref(), private_path.as_ref()] {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(public_path.as_ref(), self.public_key_pem()?)?;
        fs::write(private_path.as_ref(), self.private_key_pem()?.as_bytes())?;
        Ok(())
    }

    /// RSA-OAEP(SHA-256) wrap of a data key; randomized per call
    pub fn wrap_key(&self, key: &DataKey32) -> Result<Vec<u8>> {
        self.public
            .encrypt(&mut RsaOsRng, Oaep::new::<Sha256>(), key.as_slice())
            .map_err(|e| ManifestError::Encryption(format!("key wrap failed: {e}")))
    }

    pub fn unwrap_key(&self, wrapped: &[u8]) -> Result<DataKey32> {
        let raw = Zeroizing::new(
            self.private
                .decrypt(Oaep::new::<Sha256>(), wrapped)
                .map_err(|e| ManifestError::Decryption(format!("key unwrap failed: {e}")))?,
        );
        if raw.len() != DATA_KEY_LEN {
            return Err(ManifestError::Decryption(format!(
                "unwrapped key has {} bytes, expected {DATA_KEY_LEN}",
                raw.len()
            )));
        }
        let mut key = Zeroizing::new([0u8; DATA_KEY_LEN]);
        key.copy_from_slice(&raw);
        Ok(key)
    }
}

fn parse_public_pem(pem: &str) -> std::result::Result<RsaPublicKey, String> {
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|e| format!("not an RSA public key (SPKI or PKCS#1 PEM): {e}"))
}

fn parse_private_pem(pem: &str) -> std::result::Result<RsaPrivateKey, String> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| format!("not an RSA private key (PKCS#8 or PKCS#1 PEM): {e}"))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::OnceLock;

    /// One keypair per test binary; generation is the slow part
    pub(crate) fn shared_provider() -> &'static KeyProvider {
        static PROVIDER: OnceLock<KeyProvider> = OnceLock::new();
        PROVIDER.get_or_init(|| KeyProvider::generate(2048).unwrap())
    }

    #[test]
    fn wrap_unwrap_roundtrip_and_randomized() {
        let keys = shared_provider();
        let data_key: DataKey32 = Zeroizing::new([7u8; DATA_KEY_LEN]);

        let a = keys.wrap_key(&data_key).unwrap();
        let b = keys.wrap_key(&data_key).unwrap();
        assert_ne!(a, b);

        assert_eq!(*keys.unwrap_key(&a).unwrap(), *data_key);
        assert_eq!(*keys.unwrap_key(&b).unwrap(), *data_key);
    }

    #[test]
    fn pem_export_reimports() {
        let keys = shared_provider();
        let public = keys.public_key_pem().unwrap();
        let private = keys.private_key_pem().unwrap();

        let reloaded = KeyProvider::from_pem(&public, &private).unwrap();
        assert_eq!(reloaded.modulus_bits(), 2048);
    }

    #[test]
    fn generate_rejects_tiny_modulus() {
        assert!(matches!(
            KeyProvider::generate(512),
            Err(ManifestError::Config(_))
        ));
    }
}
