// SPDX-FileCopyrightText: 2026 Keyring Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive prompting for credential fields not given on the command line.

use std::io::{self, BufRead, Write};

use keyring_core::{CredentialsItem, KeyringError};
use zeroize::Zeroizing;

/// Prompt on stderr for every empty field of `creds`.
///
/// URL and username are read as lines from stdin; the password is read from
/// the terminal with echo disabled.
pub fn prompt_missing(creds: &mut CredentialsItem) -> Result<(), KeyringError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stderr();
    fill_missing(creds, &mut input, &mut output, rpassword::read_password)
}

/// Fill empty fields of `creds` from `input`, writing prompts to `output`.
///
/// `read_password` is called for the password so callers can disable echo.
/// Values are trimmed. Fields that are already set are left alone.
pub fn fill_missing<R, W, P>(
    creds: &mut CredentialsItem,
    input: &mut R,
    output: &mut W,
    read_password: P,
) -> Result<(), KeyringError>
where
    R: BufRead,
    W: Write,
    P: FnOnce() -> io::Result<String>,
{
    if creds.url.is_empty() {
        creds.url = read_line("URL: ", input, output)?;
    }

    if creds.username.is_empty() {
        creds.username = read_line("Username: ", input, output)?;
    }

    if creds.password.is_empty() {
        write!(output, "Password: ")
            .and_then(|()| output.flush())
            .map_err(prompt_err)?;
        let password = Zeroizing::new(read_password().map_err(prompt_err)?);
        writeln!(output).map_err(prompt_err)?;
        creds.password = password.trim().to_string();
    }

    Ok(())
}

fn read_line<R: BufRead, W: Write>(
    label: &str,
    input: &mut R,
    output: &mut W,
) -> Result<String, KeyringError> {
    write!(output, "{label}")
        .and_then(|()| output.flush())
        .map_err(prompt_err)?;

    let mut line = String::new();
    if input.read_line(&mut line).map_err(prompt_err)? == 0 {
        return Err(KeyringError::Prompt(format!(
            "unexpected end of input while reading {}",
            label.trim_end_matches(": ").to_lowercase()
        )));
    }
    Ok(line.trim().to_string())
}

fn prompt_err(e: io::Error) -> KeyringError {
    KeyringError::Prompt(e.to_string())
}
