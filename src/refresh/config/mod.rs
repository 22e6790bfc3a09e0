//! Load and validate refresh configuration.
use std::{
    env,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{error, info};

use crate::{credentials::CredentialsFile, lib::errors::ConfigError};

pub mod aws;
pub mod credentials;
pub mod profiles;
pub mod telemetry;

pub use aws::{parse_aws_section, AwsSection, RawAwsSection, DEFAULT_CLI_PATH};
pub use credentials::{parse_credentials_section, CredentialsSection, RawCredentialsSection};
pub use profiles::{
    check_profile_name, parse_profiles_section, validate_profiles, ProfilesSection,
    RawProfilesSection,
    DEFAULT_PROFILES, DEFAULT_RENAMES,
};

pub(crate) const CONFIG_ENV_KEY: &str = "AWS_SSO_REFRESH_CONFIG";
const DEFAULTS_LABEL: &str = "(built-in defaults)";

/// Top-level configuration container.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    pub aws: AwsSection,
    pub refresh: ProfilesSection,
    pub credentials: CredentialsSection,
    /// `None` when running on built-in defaults.
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
struct RawRefreshConfig {
    aws: Option<RawAwsSection>,
    refresh: Option<RawProfilesSection>,
    credentials: Option<RawCredentialsSection>,
}

impl RefreshConfig {
    /// Prefer `AWS_SSO_REFRESH_CONFIG` if set; otherwise use built-in defaults.
    pub fn load_from_env_or_default() -> Result<Self, ConfigError> {
        match env::var(CONFIG_ENV_KEY) {
            Ok(value) if !value.trim().is_empty() => {
                let path = PathBuf::from(value);
                telemetry::log_source(Some(&path), true);
                Self::load_from_path(path)
            }
            _ => {
                telemetry::log_source(None, false);
                Self::defaults()
            }
        }
    }

    /// Load from an explicit path, or from the environment/defaults when `None`.
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                telemetry::log_source(Some(&path), false);
                Self::load_from_path(path)
            }
            None => Self::load_from_env_or_default(),
        }
    }

    /// Configuration derived from the home directory alone.
    pub fn defaults() -> Result<Self, ConfigError> {
        let config = Self::from_raw(RawRefreshConfig::default(), None)?;
        telemetry::log_loaded(&config);
        Ok(config)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        info!(
            target: "aws_sso_refresh::config",
            path = %path.display(),
            "Starting configuration load"
        );

        let builder = config::Config::builder().add_source(config::File::from(path.clone()));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "aws_sso_refresh::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawRefreshConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "aws_sso_refresh::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, Some(path.clone())).map_err(|err| {
            error!(
                target: "aws_sso_refresh::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    /// Path used in logs and error messages.
    pub fn source_label(&self) -> &Path {
        self.source_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULTS_LABEL))
    }

    /// The configured credentials file with its rewrite rules.
    pub fn credentials_file(&self) -> CredentialsFile {
        CredentialsFile::new(
            self.aws.credentials_file.clone(),
            self.credentials.fanout.clone(),
            self.credentials.blank_lines,
        )
    }

    fn from_raw(raw: RawRefreshConfig, path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let label = path.clone().unwrap_or_else(|| PathBuf::from(DEFAULTS_LABEL));
        let aws = parse_aws_section(raw.aws, &label)?;
        let refresh = parse_profiles_section(raw.refresh, &label)?;
        let credentials = parse_credentials_section(raw.credentials, &label)?;

        Ok(Self {
            aws,
            refresh,
            credentials,
            source_path: path,
        })
    }
}
