use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::lib::{errors::ConfigError, paths};

pub const DEFAULT_CLI_PATH: &str = "aws";

/// Locations of the `aws` executable and the files it owns.
#[derive(Debug, Clone)]
pub struct AwsSection {
    pub cli_path: PathBuf,
    pub cache_dir: PathBuf,
    pub credentials_file: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawAwsSection {
    pub cli_path: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    pub credentials_file: Option<PathBuf>,
}

pub fn parse_aws_section(raw: Option<RawAwsSection>, path: &Path) -> Result<AwsSection, ConfigError> {
    let aws_raw = raw.unwrap_or_default();

    let cli_path = aws_raw
        .cli_path
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CLI_PATH));
    if cli_path.as_os_str().is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "aws.cli_path",
            message: "Provide the aws executable name or path".into(),
        });
    }

    let cache_dir = match aws_raw.cache_dir {
        Some(dir) => dir,
        None => paths::default_cache_dir().ok_or(ConfigError::HomeUnavailable {
            field: "aws.cache_dir",
        })?,
    };
    validate_absolute(path, "aws.cache_dir", &cache_dir)?;

    let credentials_file = match aws_raw.credentials_file {
        Some(file) => file,
        None => paths::default_credentials_file().ok_or(ConfigError::HomeUnavailable {
            field: "aws.credentials_file",
        })?,
    };
    validate_absolute(path, "aws.credentials_file", &credentials_file)?;

    Ok(AwsSection {
        cli_path,
        cache_dir,
        credentials_file,
    })
}

fn validate_absolute(path: &Path, field: &'static str, value: &Path) -> Result<(), ConfigError> {
    if paths::is_nonempty_absolute(value) {
        return Ok(());
    }

    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field,
        message: format!("Only absolute paths are allowed: {}", value.display()),
    })
}
