use tracing::{debug, info};

use super::{RefreshConfig, CONFIG_ENV_KEY};

pub fn log_source(path: Option<&std::path::Path>, from_env: bool) {
    match path {
        Some(path) if from_env => info!(
            target: "aws_sso_refresh::config",
            path = %path.display(),
            "Loading configuration using AWS_SSO_REFRESH_CONFIG environment variable"
        ),
        Some(path) => info!(
            target: "aws_sso_refresh::config",
            path = %path.display(),
            "Loading configuration from --config"
        ),
        None => debug!(
            target: "aws_sso_refresh::config",
            env = CONFIG_ENV_KEY,
            "No configuration file given; using built-in defaults"
        ),
    }
}

pub fn log_loaded(config: &RefreshConfig) {
    info!(
        target: "aws_sso_refresh::config",
        path = %config.source_label().display(),
        cli_path = %config.aws.cli_path.display(),
        cache_dir = %config.aws.cache_dir.display(),
        credentials_file = %config.aws.credentials_file.display(),
        profiles = ?config.refresh.profiles,
        fanout_aliases = config.credentials.fanout.len(),
        "Configuration loaded successfully"
    );
}
