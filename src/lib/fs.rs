//! File helpers for the AWS CLI cache directory and the credentials file.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::SystemTime,
};

use tempfile::NamedTempFile;

use crate::lib::errors::{CacheError, CredentialsFileError};

/// Outcome of `remove_path`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveStatus {
    Removed,
    NotFound,
}

impl RemoveStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RemoveStatus::Removed => "removed",
            RemoveStatus::NotFound => "not_found",
        }
    }
}

/// Delete a directory tree or a single file.
///
/// If nothing exists at `path`, returns `NotFound` without error.
pub fn remove_path(path: &Path) -> Result<RemoveStatus, io::Error> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(RemoveStatus::NotFound),
        Err(err) => return Err(err),
    };

    if metadata.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(RemoveStatus::Removed)
}

/// A regular file together with its modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedFile {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Return the most recently modified `*.<extension>` file directly inside `dir`.
///
/// Ties on modification time go to the greatest file name. A missing
/// directory is treated the same as an empty one.
pub fn newest_file_with_extension(
    dir: &Path,
    extension: &str,
) -> Result<Option<DatedFile>, CacheError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(CacheError::ReadDir {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    let mut newest: Option<DatedFile> = None;
    for entry in entries {
        let entry = entry.map_err(|source| CacheError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
            continue;
        }
        let metadata = entry.metadata().map_err(|source| CacheError::Io {
            path: path.clone(),
            source,
        })?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().map_err(|source| CacheError::Io {
            path: path.clone(),
            source,
        })?;

        let candidate = DatedFile { path, modified };
        newest = match newest {
            Some(current) if (current.modified, &current.path) >= (modified, &candidate.path) => {
                Some(current)
            }
            _ => Some(candidate),
        };
    }

    Ok(newest)
}

/// Read a file, returning `None` when it does not exist.
pub fn read_to_string_if_exists(path: &Path) -> Result<Option<String>, CredentialsFileError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(CredentialsFileError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Replace `path` with `contents` through a temporary file in the same directory.
///
/// The parent directory is created when missing.
pub fn write_atomically(path: &Path, contents: &str) -> Result<(), CredentialsFileError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|source| CredentialsFileError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })?;

    let mut staged =
        NamedTempFile::new_in(parent).map_err(|source| CredentialsFileError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    staged
        .write_all(contents.as_bytes())
        .and_then(|_| staged.flush())
        .map_err(|source| CredentialsFileError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    staged
        .persist(path)
        .map_err(|err| CredentialsFileError::Persist {
            path: path.to_path_buf(),
            source: err.error,
        })?;
    Ok(())
}
