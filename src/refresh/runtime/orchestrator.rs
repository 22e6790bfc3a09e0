use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    cache::{extract_credentials, find_latest_artifact, find_latest_artifact_if_any},
    credentials::MergeOutcome,
    lib::{
        errors::{CacheError, RefreshError},
        fs::{remove_path, RemoveStatus},
        telemetry::{emit_refresh_plan, ProfileSpan, RefreshPlanTelemetry},
    },
    refresh::config::RefreshConfig,
};

use super::Authenticator;

/// Which profiles a run refreshes and whether previous state is cleared first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshPlan {
    pub profiles: Vec<String>,
    pub clear_on_start: bool,
}

impl RefreshPlan {
    pub fn from_config(config: &RefreshConfig) -> Self {
        Self {
            profiles: config.refresh.profiles.clone(),
            clear_on_start: config.refresh.clear_on_start,
        }
    }
}

/// What the clear step removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearReport {
    pub cache_dir: RemoveStatus,
    pub credentials_file: RemoveStatus,
}

/// One successfully refreshed profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedProfile {
    pub profile: String,
    pub file_profile: String,
    pub cache_file: PathBuf,
    pub sections: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub run_id: Uuid,
    pub cleared: Option<ClearReport>,
    pub refreshed: Vec<RefreshedProfile>,
}

/// Credentials imported from one cache artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub cache_file: PathBuf,
    pub expires_at: Option<DateTime<Utc>>,
    pub merge: MergeOutcome,
}

/// Delete the cache directory tree and the credentials file, ignoring absence.
pub fn clear_state(cache_dir: &Path, credentials_file: &Path) -> Result<ClearReport, RefreshError> {
    let cache_status = remove_path(cache_dir).map_err(|source| RefreshError::Clear {
        path: cache_dir.to_path_buf(),
        source,
    })?;
    if cache_status == RemoveStatus::Removed {
        println!("AWS CLI cache cleared.");
    }

    let credentials_status =
        remove_path(credentials_file).map_err(|source| RefreshError::Clear {
            path: credentials_file.to_path_buf(),
            source,
        })?;
    if credentials_status == RemoveStatus::Removed {
        println!("AWS credentials file cleared.");
    }

    info!(
        target: "aws_sso_refresh::refresh",
        cache_dir = %cache_dir.display(),
        cache_dir_status = cache_status.as_str(),
        credentials_file = %credentials_file.display(),
        credentials_file_status = credentials_status.as_str(),
        "Cleared previous state"
    );

    Ok(ClearReport {
        cache_dir: cache_status,
        credentials_file: credentials_status,
    })
}

/// Refresh every profile in `plan` in order, stopping at the first failure.
pub fn run_refresh<A: Authenticator + ?Sized>(
    config: &RefreshConfig,
    plan: &RefreshPlan,
    authenticator: &A,
) -> Result<RefreshReport, RefreshError> {
    let run_id = Uuid::new_v4();
    emit_refresh_plan(&RefreshPlanTelemetry {
        run_id,
        config_path: config
            .source_path
            .as_deref()
            .map(|path| path.to_string_lossy())
            .as_deref(),
        cli_path: &config.aws.cli_path.to_string_lossy(),
        cache_dir: &config.aws.cache_dir.to_string_lossy(),
        credentials_file: &config.aws.credentials_file.to_string_lossy(),
        profiles: &plan.profiles,
        clear_on_start: plan.clear_on_start,
    });

    let cleared = if plan.clear_on_start {
        Some(clear_state(
            &config.aws.cache_dir,
            &config.aws.credentials_file,
        )?)
    } else {
        None
    };

    let mut refreshed = Vec::with_capacity(plan.profiles.len());
    for profile in &plan.profiles {
        let span = ProfileSpan::start(run_id, profile);
        let result = {
            let _entered = span.span().enter();
            refresh_profile(config, profile, authenticator)
        };
        match result {
            Ok(done) => {
                span.finish("refreshed");
                refreshed.push(done);
            }
            Err(err) => {
                span.finish("failed");
                return Err(err);
            }
        }
    }

    Ok(RefreshReport {
        run_id,
        cleared,
        refreshed,
    })
}

/// Log in, list buckets and import the artifact that listing wrote.
///
/// The artifact that was newest before login is never imported for `profile`.
fn refresh_profile<A: Authenticator + ?Sized>(
    config: &RefreshConfig,
    profile: &str,
    authenticator: &A,
) -> Result<RefreshedProfile, RefreshError> {
    let previous = find_latest_artifact_if_any(&config.aws.cache_dir)?;

    println!("Logging in to AWS SSO using profile: {profile}");
    authenticator
        .login(profile)
        .map_err(|source| RefreshError::Login {
            profile: profile.to_string(),
            source,
        })?;
    println!("AWS SSO login successful.");

    println!("Listing S3 buckets for profile: {profile}");
    if let Err(err) = authenticator.verify(profile) {
        warn!(
            target: "aws_sso_refresh::refresh",
            profile,
            reason = %err,
            "Verification failed; continuing"
        );
        println!("Failed to list S3 buckets: {err}");
    }

    let artifact = find_latest_artifact(&config.aws.cache_dir)?;
    if previous.as_ref() == Some(&artifact) {
        warn!(
            target: "aws_sso_refresh::refresh",
            profile,
            path = %artifact.path.display(),
            "Newest cache artifact predates this login"
        );
        return Err(CacheError::Stale {
            path: artifact.path,
            profile: profile.to_string(),
        }
        .into());
    }

    let file_profile = config.refresh.file_profile(profile);
    let imported = import_credentials(config, file_profile, Some(&artifact.path))?;

    Ok(RefreshedProfile {
        profile: profile.to_string(),
        file_profile: file_profile.to_string(),
        cache_file: imported.cache_file,
        sections: imported.merge.sections,
        expires_at: imported.expires_at,
    })
}

/// Merge-write the credentials from `cache_file` (or the newest artifact) under `file_profile`.
pub fn import_credentials(
    config: &RefreshConfig,
    file_profile: &str,
    cache_file: Option<&Path>,
) -> Result<ImportOutcome, RefreshError> {
    let cache_file = match cache_file {
        Some(path) => path.to_path_buf(),
        None => find_latest_artifact(&config.aws.cache_dir)?.path,
    };
    println!("Found cache file: {}", cache_file.display());

    let cached = extract_credentials(&cache_file)?;
    println!("Credentials extracted successfully.");

    let credentials_file = config.credentials_file();
    let merge = credentials_file.merge_write(file_profile, &cached.triple)?;
    println!(
        "Credentials for profile '{}' have been written to {}.",
        file_profile,
        credentials_file.path().display()
    );

    Ok(ImportOutcome {
        cache_file,
        expires_at: cached.expires_at,
        merge,
    })
}
