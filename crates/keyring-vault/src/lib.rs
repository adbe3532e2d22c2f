// SPDX-FileCopyrightText: 2026 Keyring Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Encrypted, file-backed credential store.
//!
//! A passphrase is stretched with Argon2id over a per-store random salt, and
//! the resulting key seals the serialized credential list with AES-256-GCM
//! under a fresh nonce on every save. Saves replace the file atomically.

pub mod atomic;
pub mod codec;
pub mod crypto;
pub mod format;
pub mod kdf;
pub mod prompt;
pub mod store;

pub use kdf::KdfParams;
pub use prompt::resolve_passphrase;
pub use store::{CredentialStore, StoreOptions};
