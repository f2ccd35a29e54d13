// tests/key_tests.rs
//! Startup key loading: every failure must be a StartupKeyMissing
mod common;

use std::fs;

use passenger_manifest_vault::config::Keys;
use passenger_manifest_vault::{
    EnvelopeCipher, ErrorKind, KeyProvider, ManifestError, SensitiveRecord,
};
use tempfile::tempdir;

#[test]
fn written_pem_files_load_and_open_existing_envelopes() {
    common::setup();
    let dir = tempdir().unwrap();
    let public = dir.path().join("keys/rsa_public.pem");
    let private = dir.path().join("keys/rsa_private.pem");

    common::keys().write_pem_files(&public, &private).unwrap();
    let reloaded = KeyProvider::from_config(&Keys {
        public_key_path: public,
        private_key_path: private,
    })
    .unwrap();

    let record = SensitiveRecord::new("1969-07-20", "010-4444-5555", false);
    let envelope = common::cipher().encrypt(&record).unwrap();
    let opened = EnvelopeCipher::new(&reloaded).decrypt(&envelope).unwrap();
    assert!(opened == record);
}

#[test]
fn missing_private_key_is_fatal() {
    let dir = tempdir().unwrap();
    let public = dir.path().join("rsa_public.pem");
    let private = dir.path().join("rsa_private.pem");
    fs::write(&public, common::keys().public_key_pem().unwrap()).unwrap();

    let err = KeyProvider::load(&public, &private).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StartupKeyMissing);
    match err {
        ManifestError::StartupKeyMissing { path, .. } => assert_eq!(path, private),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_public_key_is_fatal() {
    let dir = tempdir().unwrap();
    let public = dir.path().join("rsa_public.pem");
    let private = dir.path().join("rsa_private.pem");
    fs::write(&private, common::keys().private_key_pem().unwrap().as_bytes()).unwrap();

    let err = KeyProvider::load(&public, &private).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StartupKeyMissing);
}

#[test]
fn garbage_pem_is_fatal() {
    let dir = tempdir().unwrap();
    let public = dir.path().join("rsa_public.pem");
    let private = dir.path().join("rsa_private.pem");
    fs::write(&public, "-----BEGIN PUBLIC KEY-----\nnope\n-----END PUBLIC KEY-----\n").unwrap();
    fs::write(&private, common::keys().private_key_pem().unwrap().as_bytes()).unwrap();

    let err = KeyProvider::load(&public, &private).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StartupKeyMissing);
}

#[test]
fn halves_of_different_keypairs_are_rejected() {
    let other = KeyProvider::generate(1024).unwrap();
    let err = KeyProvider::from_pem(
        &other.public_key_pem().unwrap(),
        &common::keys().private_key_pem().unwrap(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::StartupKeyMissing);
    assert!(err.to_string().contains("same keypair"));
}
