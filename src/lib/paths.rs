//! Well-known AWS paths derived from the home directory.

use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Environment variable name for user home directory.
const HOME_ENV: &str = "HOME";
/// Environment variable the AWS CLI honours for the credentials file location.
pub const SHARED_CREDENTIALS_FILE_ENV: &str = "AWS_SHARED_CREDENTIALS_FILE";

/// Returns true if the path is non-empty and absolute.
pub fn is_nonempty_absolute(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.is_absolute()
}

/// Resolve `$HOME/.aws/cli/cache`.
pub fn default_cache_dir() -> Option<PathBuf> {
    default_cache_dir_from(env::var_os(HOME_ENV))
}

/// Resolve the credentials file.
///
/// Resolution order:
/// 1. `$AWS_SHARED_CREDENTIALS_FILE` when set and non-empty.
/// 2. `$HOME/.aws/credentials` otherwise.
pub fn default_credentials_file() -> Option<PathBuf> {
    default_credentials_file_from(
        env::var_os(SHARED_CREDENTIALS_FILE_ENV),
        env::var_os(HOME_ENV),
    )
}

fn default_cache_dir_from(home: Option<OsString>) -> Option<PathBuf> {
    home.filter(|value| !value.is_empty())
        .map(|home| PathBuf::from(home).join(".aws").join("cli").join("cache"))
}

fn default_credentials_file_from(
    shared_file: Option<OsString>,
    home: Option<OsString>,
) -> Option<PathBuf> {
    if let Some(shared_file) = shared_file.filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(shared_file));
    }

    home.filter(|value| !value.is_empty())
        .map(|home| PathBuf::from(home).join(".aws").join("credentials"))
}
