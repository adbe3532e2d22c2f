// SPDX-FileCopyrightText: 2026 Keyring Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! On-disk layout of the store file.
//!
//! ```text
//! [format-version: 1B][salt: 16B][nonce: 12B][ciphertext || tag]
//! ```
//!
//! Version 1 means Argon2id v0x13 key derivation, AES-256-GCM, and the body
//! encoding in [`crate::codec`]. The version byte and salt are bound into the
//! AEAD as associated data.

use keyring_core::KeyringError;

use crate::crypto::{NONCE_LEN, TAG_LEN};
use crate::kdf::SALT_LEN;

/// The only format version this build reads and writes.
pub const FORMAT_VERSION: u8 = 1;

/// Bytes before the ciphertext.
pub const HEADER_LEN: usize = 1 + SALT_LEN + NONCE_LEN;

/// Associated data length: version byte plus salt.
const AAD_LEN: usize = 1 + SALT_LEN;

/// Parsed fixed-size header of a store file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub version: u8,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
}

impl Header {
    /// Associated data authenticated alongside the body.
    pub fn aad(&self) -> [u8; AAD_LEN] {
        aad(self.version, &self.salt)
    }
}

/// Associated data for a given version and salt.
pub fn aad(version: u8, salt: &[u8; SALT_LEN]) -> [u8; AAD_LEN] {
    let mut out = [0u8; AAD_LEN];
    out[0] = version;
    out[1..].copy_from_slice(salt);
    out
}

/// Assemble a complete store file.
pub fn encode(header: &Header, ciphertext: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    out.push(header.version);
    out.extend_from_slice(&header.salt);
    out.extend_from_slice(&header.nonce);
    out.extend_from_slice(ciphertext);
    out
}

/// Split a store file into its header and the ciphertext that follows.
///
/// An unknown version byte is reported as such. A file too short to hold a
/// header and a tag cannot authenticate and is reported as
/// [`KeyringError::DecryptionFailed`].
pub fn parse(bytes: &[u8]) -> Result<(Header, &[u8]), KeyringError> {
    match bytes.first() {
        Some(&FORMAT_VERSION) => {}
        Some(&version) => return Err(KeyringError::UnsupportedVersion { version }),
        None => return Err(KeyringError::DecryptionFailed),
    }
    if bytes.len() < HEADER_LEN + TAG_LEN {
        return Err(KeyringError::DecryptionFailed);
    }

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&bytes[1..1 + SALT_LEN]);
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&bytes[1 + SALT_LEN..HEADER_LEN]);

    let header = Header {
        version: FORMAT_VERSION,
        salt,
        nonce,
    };
    Ok((header, &bytes[HEADER_LEN..]))
}
