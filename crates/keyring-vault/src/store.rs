// SPDX-FileCopyrightText: 2026 Keyring Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The file-backed credential store: load, mutate, and save.
//!
//! The store reads and decrypts its file exactly once, when it is opened.
//! After that every mutation stays in memory until [`Keyring::save`], which
//! re-encrypts the whole collection under a fresh nonce and atomically
//! replaces the file.
//!
//! The derived key is cached next to its salt, so only opening an existing
//! file or the first save of a new one pays for Argon2id.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use keyring_config::KeyringConfig;
use keyring_core::{CredentialsItem, Keyring, KeyringError, StoreState};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::atomic;
use crate::codec;
use crate::crypto::{self, KEY_LEN};
use crate::format::{self, FORMAT_VERSION, Header};
use crate::kdf::{self, KdfParams, SALT_LEN};

/// How to locate and unlock a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// File name inside the config directory.
    pub file_name: String,
    /// Argon2id cost. Files do not record it, so it must match what the
    /// file was written with; [`StoreOptions::from_config`] always uses the
    /// current format's cost.
    pub kdf: KdfParams,
    /// Passphrases shorter than this are rejected with `WeakPassphrase`.
    pub min_passphrase_length: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from_config(&KeyringConfig::default())
    }
}

impl StoreOptions {
    pub fn from_config(config: &KeyringConfig) -> Self {
        Self {
            file_name: config.store.file_name.clone(),
            kdf: KdfParams::V1,
            min_passphrase_length: config.store.min_passphrase_length,
        }
    }

    /// Full path of the store file inside `config_dir`.
    pub fn store_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.file_name)
    }
}

/// A salt and the key Argon2id derived from it.
struct StoreKey {
    salt: [u8; SALT_LEN],
    key: Zeroizing<[u8; KEY_LEN]>,
}

/// An unlocked credential store backed by one encrypted file.
///
/// Debug output intentionally omits the passphrase, key, and records.
pub struct CredentialStore {
    path: PathBuf,
    passphrase: SecretString,
    kdf: KdfParams,
    /// `None` until a file has been loaded or first saved.
    key: Option<StoreKey>,
    items: Vec<CredentialsItem>,
    state: StoreState,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("path", &self.path)
            .field("items", &self.items.len())
            .field("state", &self.state)
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}

impl CredentialStore {
    /// Open the store in `config_dir`, decrypting it if the file exists.
    ///
    /// A missing file is not an error: the store starts empty and
    /// [`StoreState::Uninitialized`], and the first save creates it.
    pub fn open(
        config_dir: &Path,
        options: &StoreOptions,
        passphrase: SecretString,
    ) -> Result<Self, KeyringError> {
        kdf::check_passphrase(passphrase.expose_secret(), options.min_passphrase_length)?;

        let mut store = Self {
            path: options.store_path(config_dir),
            passphrase,
            kdf: options.kdf,
            key: None,
            items: Vec::new(),
            state: StoreState::Uninitialized,
        };
        store.load()?;
        Ok(store)
    }

    /// Whether a store file exists in `config_dir`.
    pub fn exists(config_dir: &Path, options: &StoreOptions) -> bool {
        options.store_path(config_dir).is_file()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn load(&mut self) -> Result<(), KeyringError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no keyring file yet");
                self.state = StoreState::Uninitialized;
                return Ok(());
            }
            Err(source) => {
                return Err(KeyringError::ReadFailed {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let (header, ciphertext) = format::parse(&bytes)?;
        let key = kdf::derive_key(
            self.passphrase.expose_secret().as_bytes(),
            &header.salt,
            &self.kdf,
        )?;

        let plaintext = crypto::open(&key, &header.nonce, ciphertext, &header.aad())
            .map_err(|e| match e {
                KeyringError::AuthenticationFailed => KeyringError::DecryptionFailed,
                other => other,
            })?;
        self.items = codec::decode_items(&plaintext)?;
        self.key = Some(StoreKey {
            salt: header.salt,
            key,
        });
        self.state = StoreState::Loaded;

        debug!(path = %self.path.display(), items = self.items.len(), "keyring loaded");
        Ok(())
    }

    /// Salt and key for the next save, creating them on the first save.
    fn key_for_save(&mut self) -> Result<&StoreKey, KeyringError> {
        let store_key = match self.key.take() {
            Some(existing) => existing,
            None => {
                let salt = kdf::generate_salt()?;
                let key = kdf::derive_key(
                    self.passphrase.expose_secret().as_bytes(),
                    &salt,
                    &self.kdf,
                )?;
                info!(path = %self.path.display(), "creating new keyring");
                StoreKey { salt, key }
            }
        };
        Ok(self.key.insert(store_key))
    }

    /// Encrypt the current collection into complete file contents.
    fn seal_contents(&mut self) -> Result<Vec<u8>, KeyringError> {
        let plaintext = codec::encode_items(&self.items)?;
        let store_key = self.key_for_save()?;

        let aad = format::aad(FORMAT_VERSION, &store_key.salt);
        let (ciphertext, nonce) = crypto::seal(&store_key.key, &plaintext, &aad)?;
        let header = Header {
            version: FORMAT_VERSION,
            salt: store_key.salt,
            nonce,
        };
        Ok(format::encode(&header, &ciphertext))
    }
}

impl Keyring for CredentialStore {
    fn add_item(&mut self, item: CredentialsItem) -> Result<(), KeyringError> {
        item.validate()?;

        match self.items.iter_mut().find(|existing| existing.url == item.url) {
            Some(existing) => {
                debug!(url = %item.url, "replacing stored credentials");
                *existing = item;
            }
            None => {
                debug!(url = %item.url, "adding credentials");
                self.items.push(item);
            }
        }
        self.state = StoreState::Dirty;
        Ok(())
    }

    fn remove_item(&mut self, url: &str) -> Result<(), KeyringError> {
        let index = self
            .items
            .iter()
            .position(|item| item.url == url)
            .ok_or_else(|| KeyringError::NotFound {
                url: url.to_string(),
            })?;

        self.items.remove(index);
        self.state = StoreState::Dirty;
        debug!(url = %url, "removed credentials");
        Ok(())
    }

    fn save(&mut self) -> Result<(), KeyringError> {
        let contents = self.seal_contents()?;
        atomic::write_atomic(&self.path, &contents).map_err(|source| {
            KeyringError::PersistFailed {
                path: self.path.clone(),
                source,
            }
        })?;

        self.state = StoreState::Persisted;
        debug!(path = %self.path.display(), items = self.items.len(), "keyring saved");
        Ok(())
    }

    fn get_item(&self, url: &str) -> Option<&CredentialsItem> {
        self.items.iter().find(|item| item.url == url)
    }

    fn items(&self) -> Box<dyn Iterator<Item = &CredentialsItem> + '_> {
        Box::new(self.items.iter())
    }
}
