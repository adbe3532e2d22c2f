// SPDX-FileCopyrightText: 2026 Keyring Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plaintext body encoding for format version 1.
//!
//! ```text
//! [count: u32 BE] then `count` records of
//! [url_len: u32 BE][url][username_len: u32 BE][username][password_len: u32 BE][password]
//! ```
//!
//! Every field is UTF-8. Decoding is strict: anything that does not consume
//! the buffer exactly is rejected as [`KeyringError::CorruptStore`].

use keyring_core::{CredentialsItem, KeyringError};
use zeroize::Zeroizing;

const LEN_PREFIX: usize = 4;

/// Smallest possible record: three empty length-prefixed fields.
const MIN_RECORD_LEN: usize = 3 * LEN_PREFIX;

/// Serialize records in order. The buffer holds passwords and is zeroized on drop.
pub fn encode_items(items: &[CredentialsItem]) -> Result<Zeroizing<Vec<u8>>, KeyringError> {
    let count = u32::try_from(items.len())
        .map_err(|_| KeyringError::InvalidCredentials("too many credentials".to_string()))?;

    // Allocate once: a reallocation would leave an unwiped copy behind.
    let total = LEN_PREFIX
        + items
            .iter()
            .map(|item| MIN_RECORD_LEN + item.url.len() + item.username.len() + item.password.len())
            .sum::<usize>();
    let mut buf = Zeroizing::new(Vec::with_capacity(total));

    buf.extend_from_slice(&count.to_be_bytes());
    for item in items {
        for field in [&item.url, &item.username, &item.password] {
            let len = u32::try_from(field.len()).map_err(|_| {
                KeyringError::InvalidCredentials("credential field too long".to_string())
            })?;
            buf.extend_from_slice(&len.to_be_bytes());
            buf.extend_from_slice(field.as_bytes());
        }
    }
    Ok(buf)
}

/// Parse a decrypted body back into records, preserving order.
pub fn decode_items(bytes: &[u8]) -> Result<Vec<CredentialsItem>, KeyringError> {
    let mut reader = Reader { bytes, pos: 0 };

    let count = reader.read_u32()? as usize;
    if count > reader.remaining() / MIN_RECORD_LEN {
        return Err(corrupt(format!(
            "record count {count} exceeds payload size"
        )));
    }

    let mut items: Vec<CredentialsItem> = Vec::with_capacity(count);
    for index in 0..count {
        let item = CredentialsItem::new(
            reader.read_str()?,
            reader.read_str()?,
            reader.read_str()?,
        );
        if item.url.is_empty() {
            return Err(corrupt(format!("record {index} has an empty URL")));
        }
        if items.iter().any(|existing| existing.url == item.url) {
            return Err(corrupt(format!("record {index} duplicates an earlier URL")));
        }
        items.push(item);
    }

    if reader.remaining() != 0 {
        return Err(corrupt(format!(
            "{} trailing bytes after last record",
            reader.remaining()
        )));
    }

    Ok(items)
}

fn corrupt(message: String) -> KeyringError {
    KeyringError::CorruptStore(message)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], KeyringError> {
        if len > self.remaining() {
            return Err(corrupt(format!(
                "truncated body at offset {}: need {len} bytes, have {}",
                self.pos,
                self.remaining()
            )));
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_u32(&mut self) -> Result<u32, KeyringError> {
        let raw = self.take(LEN_PREFIX)?;
        Ok(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }

    fn read_str(&mut self) -> Result<&'a str, KeyringError> {
        let offset = self.pos;
        let len = self.read_u32()? as usize;
        std::str::from_utf8(self.take(len)?)
            .map_err(|_| corrupt(format!("field at offset {offset} is not valid UTF-8")))
    }
}
