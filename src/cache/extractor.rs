use std::{fs, path::Path};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{credentials::CredentialTriple, lib::errors::CacheError};

/// Credentials read from an SSO cache artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedCredentials {
    pub triple: CredentialTriple,
    /// `Credentials.Expiration`, when present and RFC 3339.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Parse `path` and read `Credentials.{AccessKeyId,SecretAccessKey,SessionToken}`.
pub fn extract_credentials(path: &Path) -> Result<CachedCredentials, CacheError> {
    let raw = fs::read_to_string(path).map_err(|source| CacheError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value = serde_json::from_str(&raw).map_err(|source| CacheError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let credentials = document
        .get("Credentials")
        .filter(|value| value.is_object())
        .ok_or(CacheError::MissingField {
            path: path.to_path_buf(),
            field: "Credentials",
        })?;
    let field = |key: &str, dotted: &'static str| {
        credentials
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(CacheError::MissingField {
                path: path.to_path_buf(),
                field: dotted,
            })
    };

    let triple = CredentialTriple {
        access_key_id: field("AccessKeyId", "Credentials.AccessKeyId")?,
        secret_access_key: field("SecretAccessKey", "Credentials.SecretAccessKey")?,
        session_token: field("SessionToken", "Credentials.SessionToken")?,
    };
    let expires_at = credentials
        .get("Expiration")
        .and_then(Value::as_str)
        .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
        .map(|value| value.with_timezone(&Utc));

    match expires_at {
        Some(expires_at) if expires_at <= Utc::now() => warn!(
            target: "aws_sso_refresh::cache",
            path = %path.display(),
            %expires_at,
            "Cached credentials are already expired"
        ),
        _ => debug!(
            target: "aws_sso_refresh::cache",
            path = %path.display(),
            expires_at = ?expires_at,
            "Extracted credentials from cache"
        ),
    }

    Ok(CachedCredentials { triple, expires_at })
}
