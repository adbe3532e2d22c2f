// SPDX-FileCopyrightText: 2026 Keyring Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the encrypted credential store.

use std::fs;
use std::path::Path;

use keyring_config::KeyringConfig;
use keyring_core::{CredentialsItem, Keyring, KeyringError, StoreState};
use keyring_vault::format::{self, FORMAT_VERSION, HEADER_LEN, Header};
use keyring_vault::{CredentialStore, KdfParams, StoreOptions, crypto, kdf};
use proptest::prelude::*;
use secrecy::SecretString;
use tempfile::tempdir;

/// Low cost for fast tests.
fn fast_options() -> StoreOptions {
    StoreOptions {
        file_name: "keyring".to_string(),
        kdf: KdfParams {
            memory_cost: 1024,
            iterations: 1,
            parallelism: 1,
        },
        min_passphrase_length: 1,
    }
}

fn open(dir: &Path, passphrase: &str) -> Result<CredentialStore, KeyringError> {
    CredentialStore::open(
        dir,
        &fast_options(),
        SecretString::from(passphrase.to_string()),
    )
}

fn snapshot(store: &dyn Keyring) -> Vec<CredentialsItem> {
    store.items().cloned().collect()
}

#[test]
fn login_then_restart_returns_same_credentials() {
    let dir = tempdir().unwrap();

    let mut store = open(dir.path(), "correct horse").unwrap();
    store
        .add_item(CredentialsItem::new("https://git.example.com", "alice", "s3cret"))
        .unwrap();
    store.save().unwrap();
    drop(store);

    let store = open(dir.path(), "correct horse").unwrap();
    let item = store.get_item("https://git.example.com").expect("item should exist");
    assert_eq!(item.username, "alice");
    assert_eq!(item.password, "s3cret");
}

#[test]
fn add_item_twice_keeps_second_values_in_original_position() {
    let dir = tempdir().unwrap();
    let mut store = open(dir.path(), "pw").unwrap();

    store
        .add_item(CredentialsItem::new("https://a.example", "first", "1"))
        .unwrap();
    store
        .add_item(CredentialsItem::new("https://b.example", "other", "2"))
        .unwrap();
    store
        .add_item(CredentialsItem::new("https://a.example", "second", "3"))
        .unwrap();

    let items = snapshot(&store);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0], CredentialsItem::new("https://a.example", "second", "3"));
    assert_eq!(items[1].url, "https://b.example");
}

#[test]
fn add_item_with_empty_url_is_invalid_and_leaves_store_untouched() {
    let dir = tempdir().unwrap();
    let mut store = open(dir.path(), "pw").unwrap();

    let err = store
        .add_item(CredentialsItem::new("", "alice", "pw"))
        .unwrap_err();

    assert!(matches!(err, KeyringError::InvalidCredentials(_)));
    assert!(store.is_empty());
    assert_eq!(store.state(), StoreState::Uninitialized);
}

#[test]
fn remove_absent_url_is_not_found_and_changes_nothing() {
    let dir = tempdir().unwrap();
    let mut store = open(dir.path(), "pw").unwrap();

    let err = store.remove_item("https://nope.example").unwrap_err();

    assert!(matches!(err, KeyringError::NotFound { ref url } if url == "https://nope.example"));
    assert_eq!(store.state(), StoreState::Uninitialized);
    assert!(!CredentialStore::exists(dir.path(), &fast_options()));
}

#[test]
fn remove_then_save_drops_record_from_disk() {
    let dir = tempdir().unwrap();
    let mut store = open(dir.path(), "pw").unwrap();
    store
        .add_item(CredentialsItem::new("https://a.example", "u", "p"))
        .unwrap();
    store
        .add_item(CredentialsItem::new("https://b.example", "u", "p"))
        .unwrap();
    store.save().unwrap();

    store.remove_item("https://a.example").unwrap();
    assert_eq!(store.state(), StoreState::Dirty);
    store.save().unwrap();
    drop(store);

    let store = open(dir.path(), "pw").unwrap();
    assert!(store.get_item("https://a.example").is_none());
    assert!(store.get_item("https://b.example").is_some());
}

#[test]
fn wrong_passphrase_never_yields_a_collection() {
    let dir = tempdir().unwrap();
    let mut store = open(dir.path(), "right").unwrap();
    store
        .add_item(CredentialsItem::new("https://a.example", "u", "p"))
        .unwrap();
    store.save().unwrap();

    for wrong in ["wrong", "right ", "Right", "r"] {
        assert!(
            matches!(open(dir.path(), wrong), Err(KeyringError::DecryptionFailed)),
            "passphrase {wrong:?} should fail"
        );
    }
}

#[test]
fn tampering_with_any_byte_is_rejected() {
    let dir = tempdir().unwrap();
    let mut store = open(dir.path(), "pw").unwrap();
    store
        .add_item(CredentialsItem::new("https://a.example", "u", "p"))
        .unwrap();
    store.save().unwrap();
    let path = store.path().to_path_buf();
    let pristine = fs::read(&path).unwrap();

    // Salt, nonce, ciphertext body, and tag.
    for offset in [1, HEADER_LEN - 1, HEADER_LEN, pristine.len() - 1] {
        let mut tampered = pristine.clone();
        tampered[offset] ^= 0x80;
        fs::write(&path, &tampered).unwrap();

        assert!(
            matches!(open(dir.path(), "pw"), Err(KeyringError::DecryptionFailed)),
            "flipping byte {offset} should fail authentication"
        );
    }

    // The version byte is checked before authentication.
    let mut tampered = pristine.clone();
    tampered[0] ^= 0x80;
    fs::write(&path, &tampered).unwrap();
    assert!(matches!(
        open(dir.path(), "pw"),
        Err(KeyringError::UnsupportedVersion { version: 0x81 })
    ));
}

#[test]
fn truncated_file_fails_decryption() {
    let dir = tempdir().unwrap();
    let mut store = open(dir.path(), "pw").unwrap();
    store.save().unwrap();
    let path = store.path().to_path_buf();
    let bytes = fs::read(&path).unwrap();

    fs::write(&path, &bytes[..HEADER_LEN + 3]).unwrap();

    assert!(matches!(
        open(dir.path(), "pw"),
        Err(KeyringError::DecryptionFailed)
    ));
}

#[test]
fn unknown_format_version_is_reported() {
    let dir = tempdir().unwrap();
    let mut store = open(dir.path(), "pw").unwrap();
    store.save().unwrap();
    let path = store.path().to_path_buf();
    let mut bytes = fs::read(&path).unwrap();
    bytes[0] = 0x7f;
    fs::write(&path, &bytes).unwrap();

    assert!(matches!(
        open(dir.path(), "pw"),
        Err(KeyringError::UnsupportedVersion { version: 0x7f })
    ));
}

#[test]
fn authentic_but_malformed_body_is_corrupt_store() {
    let dir = tempdir().unwrap();
    let options = fast_options();
    let salt = kdf::generate_salt().unwrap();
    let key = kdf::derive_key(b"pw", &salt, &options.kdf).unwrap();

    // Claims one record but carries none.
    let body = [0u8, 0, 0, 1];
    let (ciphertext, nonce) =
        crypto::seal(&key, &body, &format::aad(FORMAT_VERSION, &salt)).unwrap();
    let header = Header {
        version: FORMAT_VERSION,
        salt,
        nonce,
    };
    fs::write(
        options.store_path(dir.path()),
        format::encode(&header, &ciphertext),
    )
    .unwrap();

    assert!(matches!(
        open(dir.path(), "pw"),
        Err(KeyringError::CorruptStore(_))
    ));
}

#[test]
fn unreadable_store_path_is_read_failed() {
    let dir = tempdir().unwrap();
    fs::create_dir(fast_options().store_path(dir.path())).unwrap();

    assert!(matches!(
        open(dir.path(), "pw"),
        Err(KeyringError::ReadFailed { .. })
    ));
}

#[test]
fn failed_save_stays_dirty_and_retry_succeeds() {
    let dir = tempdir().unwrap();
    let mut store = open(dir.path(), "pw").unwrap();
    store
        .add_item(CredentialsItem::new("https://a.example", "u", "p"))
        .unwrap();

    // A non-empty directory at the store path makes the final rename fail.
    let blocker = store.path().to_path_buf();
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("occupant"), b"x").unwrap();

    let err = store.save().unwrap_err();
    assert!(matches!(err, KeyringError::PersistFailed { .. }));
    assert_eq!(store.state(), StoreState::Dirty);
    // Only the blocker remains; the temporary file was cleaned up.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);

    fs::remove_dir_all(&blocker).unwrap();
    store.save().unwrap();
    assert_eq!(store.state(), StoreState::Persisted);
    drop(store);

    let store = open(dir.path(), "pw").unwrap();
    assert!(store.get_item("https://a.example").is_some());
}

#[test]
fn store_is_usable_through_the_trait_object() {
    let dir = tempdir().unwrap();
    let mut store = open(dir.path(), "pw").unwrap();
    let keyring: &mut dyn Keyring = &mut store;

    keyring
        .add_item(CredentialsItem::new("https://a.example", "u", "p"))
        .unwrap();
    keyring.save().unwrap();

    assert_eq!(keyring.items().count(), 1);
}

#[test]
fn file_never_contains_plaintext() {
    let dir = tempdir().unwrap();
    let mut store = open(dir.path(), "pw").unwrap();
    store
        .add_item(CredentialsItem::new(
            "https://plaintext-check.example",
            "visible-user",
            "visible-password",
        ))
        .unwrap();
    store.save().unwrap();

    let bytes = fs::read(store.path()).unwrap();
    let haystack = String::from_utf8_lossy(&bytes);
    assert!(!haystack.contains("visible-password"));
    assert!(!haystack.contains("visible-user"));
    assert!(!haystack.contains("plaintext-check"));
}

#[derive(Debug, Clone)]
enum Op {
    Add(String, String, String),
    Remove(String),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // A small URL pool makes overwrites and removals of present keys likely.
    let url = prop::sample::select(vec![
        "https://a.example",
        "https://b.example",
        "https://c.example",
        "ssh://d.example",
    ])
    .prop_map(str::to_string);

    prop_oneof![
        (url.clone(), ".{0,12}", ".{0,24}").prop_map(|(u, n, p)| Op::Add(u, n, p)),
        url.prop_map(Op::Remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn save_then_load_round_trips(ops in prop::collection::vec(op_strategy(), 0..16)) {
        let dir = tempdir().unwrap();
        let mut store = open(dir.path(), "round trip").unwrap();

        for op in ops {
            match op {
                Op::Add(url, username, password) => {
                    store.add_item(CredentialsItem::new(url, username, password)).unwrap();
                }
                Op::Remove(url) => {
                    let present = store.get_item(&url).is_some();
                    let result = store.remove_item(&url);
                    prop_assert_eq!(result.is_ok(), present);
                }
            }
        }

        let before = snapshot(&store);
        store.save().unwrap();
        drop(store);

        let reloaded = open(dir.path(), "round trip").unwrap();
        prop_assert_eq!(snapshot(&reloaded), before);
    }
}

#[test]
fn store_reopens_after_config_changes() {
    let dir = tempdir().unwrap();
    let mut written_with = KeyringConfig::default();
    written_with.log.level = "debug".to_string();

    let mut store = CredentialStore::open(
        dir.path(),
        &StoreOptions::from_config(&written_with),
        SecretString::from("pw".to_string()),
    )
    .unwrap();
    store
        .add_item(CredentialsItem::new("https://git.example.com", "alice", "s3cret"))
        .unwrap();
    store.save().unwrap();
    drop(store);

    let mut reopened_with = KeyringConfig::default();
    reopened_with.log.level = "error".to_string();
    reopened_with.store.min_passphrase_length = 2;
    let options = StoreOptions::from_config(&reopened_with);
    assert_eq!(options.kdf, KdfParams::V1);

    let store = CredentialStore::open(dir.path(), &options, SecretString::from("pw".to_string()))
        .unwrap();
    let item = store.get_item("https://git.example.com").unwrap();
    assert_eq!(item.username, "alice");
    assert_eq!(item.password, "s3cret");
}
