// SPDX-FileCopyrightText: 2026 Keyring Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase acquisition from a flag, the KEYRING_PASSPHRASE environment
//! variable, or a TTY prompt.

use keyring_core::KeyringError;
use secrecy::SecretString;

/// The environment variable name for providing the keyring passphrase.
pub const PASSPHRASE_ENV_VAR: &str = "KEYRING_PASSPHRASE";

/// Get the keyring passphrase.
///
/// Priority:
/// 1. `flag` (the `--keyring-passphrase` command-line value)
/// 2. `KEYRING_PASSPHRASE` environment variable (for scripts and CI)
/// 3. Interactive TTY prompt via `rpassword`
///
/// With `confirm`, the interactive prompt asks twice and requires both
/// entries to match. Use it when the store is about to be created.
/// Empty values count as absent.
pub fn resolve_passphrase(
    flag: Option<String>,
    confirm: bool,
) -> Result<SecretString, KeyringError> {
    if let Some(passphrase) = flag.filter(|p| !p.is_empty()) {
        return Ok(SecretString::from(passphrase));
    }

    if let Ok(passphrase) = std::env::var(PASSPHRASE_ENV_VAR)
        && !passphrase.is_empty()
    {
        return Ok(SecretString::from(passphrase));
    }

    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return if confirm {
            prompt_with_confirm()
        } else {
            prompt_once("Keyring passphrase: ")
        };
    }

    Err(KeyringError::Prompt(format!(
        "no passphrase provided; pass --keyring-passphrase, set {PASSPHRASE_ENV_VAR}, or run interactively"
    )))
}

fn prompt_once(label: &str) -> Result<SecretString, KeyringError> {
    let passphrase = rpassword::prompt_password(label)
        .map_err(|e| KeyringError::Prompt(format!("failed to read passphrase: {e}")))?;
    if passphrase.is_empty() {
        return Err(KeyringError::Prompt("empty passphrase not allowed".to_string()));
    }
    Ok(SecretString::from(passphrase))
}

fn prompt_with_confirm() -> Result<SecretString, KeyringError> {
    use secrecy::ExposeSecret;

    let first = prompt_once("New keyring passphrase: ")?;
    let second = prompt_once("Confirm keyring passphrase: ")?;
    if first.expose_secret() != second.expose_secret() {
        return Err(KeyringError::Prompt("passphrases do not match".to_string()));
    }
    Ok(first)
}
