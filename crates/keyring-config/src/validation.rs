// SPDX-FileCopyrightText: 2026 Keyring Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints serde attributes cannot express, such as
//! store file names that must stay inside the config dir.

use crate::diagnostic::ConfigError;
use crate::model::KeyringConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &KeyringConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let file_name = config.store.file_name.as_str();
    if file_name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "store.file_name must not be empty".to_string(),
        });
    } else if file_name.trim() != file_name {
        errors.push(ConfigError::Validation {
            message: format!(
                "store.file_name `{file_name}` must not start or end with whitespace"
            ),
        });
    } else if file_name.contains(['/', '\\']) || file_name == "." || file_name == ".." {
        errors.push(ConfigError::Validation {
            message: format!(
                "store.file_name `{file_name}` must be a plain file name, not a path"
            ),
        });
    }

    let level = config.log.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
