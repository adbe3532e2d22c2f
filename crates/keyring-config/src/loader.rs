// SPDX-FileCopyrightText: 2026 Keyring Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./keyring.toml` > `~/.config/keyring/keyring.toml` > `/etc/keyring/keyring.toml`
//! with environment variable overrides via the `KEYRING_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::KeyringConfig;

/// Application directory name under the platform config dir.
pub const APP_DIR_NAME: &str = "keyring";

/// Config file name looked up in every layer.
pub const CONFIG_FILE_NAME: &str = "keyring.toml";

/// Environment variables under the `KEYRING_` prefix that are not config keys.
///
/// `KEYRING_PASSPHRASE` is consumed by the passphrase prompt instead.
const NON_CONFIG_ENV_KEYS: &[&str] = &["passphrase"];

/// The default directory holding the config file and the store file.
///
/// `<platform config dir>/keyring`, or `./.keyring` when the platform has none.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".keyring"))
}

/// Config files consulted by [`load_config`], lowest precedence first.
pub fn config_file_candidates() -> Vec<PathBuf> {
    let mut paths = vec![Path::new("/etc").join(APP_DIR_NAME).join(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from(CONFIG_FILE_NAME));
    paths
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/keyring/keyring.toml` (system-wide)
/// 3. `~/.config/keyring/keyring.toml` (user XDG config)
/// 4. `./keyring.toml` (local directory)
/// 5. `KEYRING_*` environment variables
pub fn load_config() -> Result<KeyringConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
pub fn load_config_from_str(toml_content: &str) -> Result<KeyringConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeyringConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<KeyringConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeyringConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    config_file_candidates()
        .into_iter()
        .fold(
            Figment::new().merge(Serialized::defaults(KeyringConfig::default())),
            |figment, path| figment.merge(Toml::file(path)),
        )
        .merge(env_provider())
}

/// Create the environment variable provider.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that underscores inside
/// key names survive: `KEYRING_STORE_FILE_NAME` maps to `store.file_name`,
/// not `store.file.name`.
pub fn env_provider() -> Env {
    Env::prefixed("KEYRING_")
        .ignore(NON_CONFIG_ENV_KEYS)
        .map(|key| {
            let mapped = key
                .as_str()
                .replacen("store_", "store.", 1)
                .replacen("log_", "log.", 1);
            mapped.into()
        })
}
