// SPDX-FileCopyrightText: 2026 Keyring Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Crash-safe file replacement.
//!
//! Contents are written to a temporary file in the target's directory,
//! flushed and fsynced, then renamed over the target. Readers see either the
//! old file or the new one, never a partial write. A staged file that is
//! dropped without [`StagedFile::commit`] is deleted and the target is untouched.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
#[cfg(unix)]
use tracing::warn;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Permission mode for the store file.
pub const STORE_FILE_MODE: u32 = 0o600;

/// Fully written and synced contents waiting to replace `target`.
#[derive(Debug)]
pub struct StagedFile {
    tmp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    /// Path of the temporary file.
    pub fn temp_path(&self) -> &Path {
        self.tmp.path()
    }

    /// Atomically rename the staged file over the target.
    pub fn commit(self) -> io::Result<()> {
        let StagedFile { tmp, target } = self;
        tmp.persist(&target).map_err(|e| e.error)?;

        // Make the rename itself durable. Failure here leaves a complete file
        // in place, so it is only logged.
        #[cfg(unix)]
        {
            if let Err(e) = fs::File::open(parent_dir(&target)).and_then(|dir| dir.sync_all()) {
                warn!(path = %target.display(), error = %e, "failed to sync keyring directory");
            }
        }

        Ok(())
    }
}

/// Write `contents` to a temporary sibling of `target` without replacing it yet.
///
/// Creates the parent directory if needed.
pub fn stage(target: &Path, contents: &[u8]) -> io::Result<StagedFile> {
    let dir = parent_dir(target);
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".keyring-")
        .suffix(".tmp")
        .tempfile_in(dir)?;

    #[cfg(unix)]
    tmp.as_file()
        .set_permissions(fs::Permissions::from_mode(STORE_FILE_MODE))?;

    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;

    Ok(StagedFile {
        tmp,
        target: target.to_path_buf(),
    })
}

/// Stage and commit in one step.
pub fn write_atomic(target: &Path, contents: &[u8]) -> io::Result<()> {
    stage(target, contents)?.commit()
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
