// SPDX-FileCopyrightText: 2026 Keyring Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the keyring credential store.
//!
//! This crate provides the shared error type, the credential record model,
//! and the [`Keyring`] capability trait that command handlers depend on.
//! Concrete stores live in `keyring-vault`.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::KeyringError;
pub use traits::Keyring;
pub use types::{CredentialsItem, StoreState};
