// SPDX-FileCopyrightText: 2026 Keyring Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The capability interface command handlers program against.

use crate::error::KeyringError;
use crate::types::CredentialsItem;

/// A mutable collection of credentials that can be flushed to durable storage.
///
/// Mutations only touch memory; nothing reaches disk until [`Keyring::save`].
pub trait Keyring {
    /// Inserts `item`, replacing any existing record for the same URL.
    ///
    /// Fails with [`KeyringError::InvalidCredentials`] when the URL is empty.
    fn add_item(&mut self, item: CredentialsItem) -> Result<(), KeyringError>;

    /// Removes the record for `url`.
    ///
    /// Fails with [`KeyringError::NotFound`] and leaves the collection
    /// untouched when no such record exists.
    fn remove_item(&mut self, url: &str) -> Result<(), KeyringError>;

    /// Encrypts the whole collection and atomically replaces the store file.
    fn save(&mut self) -> Result<(), KeyringError>;

    /// Looks up the record for `url`.
    fn get_item(&self, url: &str) -> Option<&CredentialsItem>;

    /// Returns all records in insertion order.
    fn items(&self) -> Box<dyn Iterator<Item = &CredentialsItem> + '_>;
}
