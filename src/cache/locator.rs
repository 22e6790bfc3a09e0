use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::lib::{errors::CacheError, fs::newest_file_with_extension};

const ARTIFACT_EXTENSION: &str = "json";

/// Newest JSON artifact found in the cache directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheArtifact {
    pub path: PathBuf,
    pub modified: DateTime<Utc>,
}

/// Locate the most recently modified `*.json` file directly inside `cache_dir`.
pub fn find_latest_artifact(cache_dir: &Path) -> Result<CacheArtifact, CacheError> {
    find_latest_artifact_if_any(cache_dir)?.ok_or_else(|| CacheError::NotFound {
        dir: cache_dir.to_path_buf(),
    })
}

/// Like [`find_latest_artifact`], but an empty or missing directory is `None`.
pub fn find_latest_artifact_if_any(cache_dir: &Path) -> Result<Option<CacheArtifact>, CacheError> {
    let Some(newest) = newest_file_with_extension(cache_dir, ARTIFACT_EXTENSION)? else {
        return Ok(None);
    };

    let artifact = CacheArtifact {
        path: newest.path,
        modified: DateTime::<Utc>::from(newest.modified),
    };
    debug!(
        target: "aws_sso_refresh::cache",
        path = %artifact.path.display(),
        modified = %artifact.modified,
        "Located newest cache artifact"
    );
    Ok(Some(artifact))
}
