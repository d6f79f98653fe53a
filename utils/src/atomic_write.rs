//! Crash-safe file replacement.
//!
//! Bytes go to a temp file in the destination directory, which is then renamed
//! over the target. Readers see either the old file or the new one.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistMode {
    /// Inherit the process umask.
    #[default]
    Default,
    /// Owner read/write only (0o600 on Unix).
    OwnerOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomicWriteOptions {
    /// `sync_all` the temp file before it is renamed into place.
    pub sync: bool,
    pub mode: PersistMode,
}

impl Default for AtomicWriteOptions {
    fn default() -> Self {
        Self {
            sync: true,
            mode: PersistMode::Default,
        }
    }
}

pub fn atomic_write(path: impl AsRef<Path>, bytes: &[u8]) -> io::Result<()> {
    atomic_write_with_options(path, bytes, AtomicWriteOptions::default())
}

pub fn atomic_write_with_options(
    path: impl AsRef<Path>,
    bytes: &[u8],
    options: AtomicWriteOptions,
) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::IsADirectory,
            format!("{} is a directory", path.display()),
        ));
    }
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    apply_mode(tmp.path(), options.mode)?;
    tmp.write_all(bytes)?;
    if options.sync {
        tmp.as_file().sync_all()?;
    }

    if let Err(err) = tmp.persist(path) {
        if !path.is_file() {
            return Err(err.error);
        }
        // Some platforms refuse to rename over an existing file. Move the old
        // file to a fresh backup name, retry, and put it back if the retry
        // fails too.
        let backup = reserve_backup_path(path, parent)?;
        fs::rename(path, &backup)?;
        if let Err(retry) = err.file.persist(path) {
            let _ = fs::rename(&backup, path);
            return Err(retry.error);
        }
        if let Err(e) = fs::remove_file(&backup) {
            warn!(path = %backup.display(), "Failed to remove backup after atomic write: {e}");
        }
    }

    apply_mode(path, options.mode)
}

/// A backup path next to `path` that no existing file uses.
fn reserve_backup_path(path: &Path, parent: &Path) -> io::Result<PathBuf> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let reserved = Builder::new()
        .prefix(&format!(".{name}."))
        .suffix(".bak")
        .tempfile_in(parent)?
        .into_temp_path();
    let backup = reserved.to_path_buf();
    // Free the name so the rename below does not have to replace a file.
    reserved.close()?;
    Ok(backup)
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: PersistMode) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    match mode {
        PersistMode::Default => Ok(()),
        PersistMode::OwnerOnly => fs::set_permissions(path, fs::Permissions::from_mode(0o600)),
    }
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: PersistMode) -> io::Result<()> {
    Ok(())
}
