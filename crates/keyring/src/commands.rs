// SPDX-FileCopyrightText: 2026 Keyring Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `keyring login`, `keyring logout` and `keyring list`.
//!
//! Each command works against any [`Keyring`] and persists its mutation
//! before returning, so a successful exit always means the record is on disk.

use std::io::{self, Write};

use keyring_core::{CredentialsItem, Keyring, KeyringError};
use tracing::debug;

/// Store `creds`, replacing any record with the same URL, and save.
pub fn login(keyring: &mut dyn Keyring, creds: CredentialsItem) -> Result<(), KeyringError> {
    keyring.add_item(creds)?;
    keyring.save()
}

/// Remove the record for `url` and save.
///
/// Returns [`KeyringError::NotFound`] without touching the file when no
/// record matches.
pub fn logout(keyring: &mut dyn Keyring, url: &str) -> Result<(), KeyringError> {
    keyring.remove_item(url)?;
    keyring.save()
}

/// Write one line per record to `out`, in insertion order.
pub fn list<W: Write>(keyring: &dyn Keyring, out: &mut W, color: bool) -> io::Result<usize> {
    let mut count = 0;
    for item in keyring.items() {
        let password = mask_secret(&item.password);
        if color {
            use colored::Colorize;
            writeln!(
                out,
                "{}  {}  {}",
                item.url.bold(),
                item.username,
                password.dimmed()
            )?;
        } else {
            writeln!(out, "{}  {}  {}", item.url, item.username, password)?;
        }
        count += 1;
    }
    debug!(items = count, "listed credentials");
    Ok(count)
}

/// Mask a secret for display: first and last four characters, or `****`.
pub fn mask_secret(value: &str) -> String {
    let len = value.chars().count();
    if len < 10 {
        return "****".to_string();
    }
    let prefix: String = value.chars().take(4).collect();
    let suffix: String = value.chars().skip(len - 4).collect();
    format!("{prefix}...{suffix}")
}
