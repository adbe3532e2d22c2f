// SPDX-FileCopyrightText: 2026 Keyring Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the keyring credential store.
//!
//! No variant carries secret material. Passwords and passphrases must never
//! be formatted into an error message.

use std::path::PathBuf;

use thiserror::Error;

/// The error type returned by every keyring operation.
#[derive(Debug, Error)]
pub enum KeyringError {
    /// A credential record is missing a required field.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Wrong passphrase, or the store file was corrupted or tampered with.
    ///
    /// The two causes are deliberately indistinguishable.
    #[error("decryption failed: wrong passphrase or corrupted keyring file")]
    DecryptionFailed,

    /// The store decrypted correctly but its contents are structurally invalid.
    #[error("corrupt keyring store: {0}")]
    CorruptStore(String),

    /// No credential is stored for the given URL.
    #[error("no credentials stored for {url}")]
    NotFound { url: String },

    /// Writing the store to disk failed. The previous file is left untouched.
    #[error("failed to persist keyring to {}: {source}", path.display())]
    PersistFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading the store file failed for a reason other than it being absent.
    #[error("failed to read keyring from {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The AEAD tag did not verify. Surfaced by the store as [`KeyringError::DecryptionFailed`].
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The passphrase is shorter than the configured minimum.
    #[error("passphrase must be at least {min_length} characters")]
    WeakPassphrase { min_length: usize },

    /// The store file was written by an unknown format version.
    #[error("unsupported keyring format version {version}")]
    UnsupportedVersion { version: u8 },

    /// Random number generation or key derivation setup failed.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Reading from the terminal failed.
    #[error("prompt error: {0}")]
    Prompt(String),
}
