//! Saving text documents into a documents directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tackle_types::is_blank;
use thiserror::Error;
use tracing::debug;

use crate::atomic_write::atomic_write;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("invalid document name {name:?}: must be a single, non-empty file name")]
    InvalidFileName { name: String },
    #[error("failed to create documents directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write document {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn is_plain_file_name(name: &str) -> bool {
    !is_blank(Some(name), &[' ', '\t'])
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Write `contents` to `dir/file_name`, replacing any previous version.
///
/// `dir` is created when missing. Returns the path that was written.
pub fn write_document(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf, PersistError> {
    if !is_plain_file_name(file_name) {
        return Err(PersistError::InvalidFileName {
            name: file_name.to_string(),
        });
    }

    fs::create_dir_all(dir).map_err(|source| PersistError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(file_name);
    atomic_write(&path, contents.as_bytes()).map_err(|source| PersistError::Write {
        path: path.clone(),
        source,
    })?;

    debug!(path = %path.display(), bytes = contents.len(), "Document written");
    Ok(path)
}
