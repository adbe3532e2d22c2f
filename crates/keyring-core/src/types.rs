// SPDX-FileCopyrightText: 2026 Keyring Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential record and store lifecycle types.

use strum::Display;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::KeyringError;

/// A single login secret, keyed by URL.
///
/// All fields are wiped from memory on drop. `Debug` output never includes
/// the password.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct CredentialsItem {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl CredentialsItem {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Checks that the record can be stored: the URL must be non-empty.
    pub fn validate(&self) -> Result<(), KeyringError> {
        if self.url.trim().is_empty() {
            return Err(KeyringError::InvalidCredentials(
                "URL must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for CredentialsItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsItem")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Where a store stands relative to its file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum StoreState {
    /// No file exists yet; the first save creates it with a fresh salt.
    Uninitialized,
    /// The file was read and decrypted, and nothing has changed since.
    Loaded,
    /// In-memory changes have not been written yet.
    Dirty,
    /// The file matches memory after a successful save.
    Persisted,
}
