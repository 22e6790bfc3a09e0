use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
    /// A default path needs the home directory but `HOME` is unset.
    #[error("Cannot derive default `{field}`: HOME is unset")]
    HomeUnavailable { field: &'static str },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures of the external `aws` CLI.
#[derive(Debug, Error)]
pub enum AuthenticatorError {
    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` exited abnormally for profile `{profile}` (exit={exit_code:?})")]
    CommandFailed {
        command: String,
        profile: String,
        exit_code: Option<i32>,
    },
}

/// Failures while locating or reading SSO cache artifacts.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("No JSON cache files found in {dir}. Please run 'aws sso login' first.")]
    NotFound { dir: PathBuf },
    #[error("Failed to read cache directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O failed for cache file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cache file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not find `{field}` in the cache file {path}")]
    MissingField { path: PathBuf, field: &'static str },
    /// The newest artifact was already there before `profile` logged in.
    #[error("Cache file {path} predates the login for profile `{profile}`; `aws s3 ls` did not write a new one")]
    Stale { path: PathBuf, profile: String },
}

/// Failures while reading or rewriting the credentials file.
#[derive(Debug, Error)]
pub enum CredentialsFileError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read credentials file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write credentials file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to replace credentials file {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Fatal outcomes of a refresh run. Any of these aborts the remaining profiles.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("Failed to clear {path}: {source}")]
    Clear {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Login failed for profile `{profile}`: {source}")]
    Login {
        profile: String,
        #[source]
        source: AuthenticatorError,
    },
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Credentials(#[from] CredentialsFileError),
}

impl RefreshError {
    /// True when the run stopped because no cache artifact exists.
    pub fn is_cache_not_found(&self) -> bool {
        matches!(self, RefreshError::Cache(CacheError::NotFound { .. }))
    }
}
