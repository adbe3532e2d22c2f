// SPDX-FileCopyrightText: 2026 Keyring Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyring - a passphrase-protected local credential store.
//!
//! This is the binary entry point: it loads configuration, acquires the
//! passphrase, opens the store and dispatches `login`, `logout` or `list`.

mod commands;
mod terminal;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use keyring_config::KeyringConfig;
use keyring_core::{CredentialsItem, KeyringError};
use keyring_vault::{CredentialStore, StoreOptions, resolve_passphrase};
use tracing::debug;

/// Keyring - store website credentials in a local encrypted file.
#[derive(Parser, Debug)]
#[command(name = "keyring", version, about, long_about = None)]
struct Cli {
    /// Passphrase for the keyring file. Visible to other local users via the
    /// process list; prefer KEYRING_PASSPHRASE or the interactive prompt.
    #[arg(long, global = true, value_name = "PASSPHRASE")]
    keyring_passphrase: Option<String>,

    /// Directory holding the keyring file.
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Store credentials for a URL, prompting for anything not given.
    Login(LoginArgs),
    /// Forget the credentials stored for a URL.
    Logout {
        /// URL whose credentials should be removed.
        url: String,
    },
    /// Show stored URLs and usernames with masked passwords.
    List,
}

#[derive(Args, Debug)]
struct LoginArgs {
    /// Site URL; prompted for when omitted.
    #[arg(long, default_value = "")]
    url: String,
    /// Account name; prompted for when omitted.
    #[arg(long, default_value = "")]
    username: String,
    /// Account password; prompted for without echo when omitted.
    #[arg(long, default_value = "")]
    password: String,
}

impl From<LoginArgs> for CredentialsItem {
    fn from(args: LoginArgs) -> Self {
        CredentialsItem::new(args.url, args.username, args.password)
    }
}

/// Exit code for configuration errors.
const EXIT_CONFIG: u8 = 4;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match keyring_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            keyring_config::render_errors(&errors);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    init_tracing(&config.log.level);

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match &e {
                KeyringError::NotFound { url } => eprintln!(
                    "{} no credentials stored for {url}",
                    "nothing to log out of:".yellow()
                ),
                _ => eprintln!("{} {e}", "error:".red().bold()),
            }
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run(cli: Cli, config: &KeyringConfig) -> Result<(), KeyringError> {
    let config_dir = cli
        .config_dir
        .unwrap_or_else(keyring_config::default_config_dir);
    let options = StoreOptions::from_config(config);

    // Only a login can create the file, so only then ask for confirmation.
    let creating = matches!(cli.command, Commands::Login(_))
        && !CredentialStore::exists(&config_dir, &options);
    let passphrase = resolve_passphrase(cli.keyring_passphrase, creating)?;

    let mut store = CredentialStore::open(&config_dir, &options, passphrase)?;
    debug!(path = %store.path().display(), state = %store.state(), "keyring opened");

    match cli.command {
        Commands::Login(args) => {
            let mut creds = CredentialsItem::from(args);
            terminal::prompt_missing(&mut creds)?;
            let url = creds.url.clone();
            commands::login(&mut store, creds)?;
            eprintln!("{} {url}", "Logged in to".green());
        }
        Commands::Logout { url } => {
            commands::logout(&mut store, &url)?;
            eprintln!("{} {url}", "Logged out of".green());
        }
        Commands::List => {
            let stdout = std::io::stdout();
            let color = stdout.is_terminal();
            let count = commands::list(&store, &mut stdout.lock(), color)
                .map_err(|e| KeyringError::Prompt(format!("failed to write output: {e}")))?;
            if count == 0 {
                eprintln!("no credentials stored");
            }
        }
    }

    Ok(())
}

/// Process exit status for a failed command.
fn exit_code(err: &KeyringError) -> u8 {
    match err {
        KeyringError::DecryptionFailed => 2,
        KeyringError::NotFound { .. } => 3,
        _ => 1,
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("keyring={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
