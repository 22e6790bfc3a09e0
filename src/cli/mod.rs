//! CLI entrypoint module structure.
use anyhow::{Context, Result};
use serde_json::json;

use crate::{
    cache::find_latest_artifact,
    refresh::{
        config::RefreshConfig,
        runtime::{clear_state, import_credentials},
    },
};

pub mod args;
pub mod profile;

pub use args::{CliCommand, ImportArgs, LaunchArgs, ParsedCommand};
pub use profile::{resolve_config_path, LaunchProfile};

/// Execute a single-step command and return a user-facing JSON payload.
pub fn execute_cli_command(command: CliCommand, config: &RefreshConfig) -> Result<String> {
    let payload = match command {
        CliCommand::Clear => {
            let report = clear_state(&config.aws.cache_dir, &config.aws.credentials_file)
                .context("failed to clear AWS CLI state")?;
            json!({
                "status": "cleared",
                "cache_dir": {
                    "path": config.aws.cache_dir.to_string_lossy(),
                    "status": report.cache_dir.as_str(),
                },
                "credentials_file": {
                    "path": config.aws.credentials_file.to_string_lossy(),
                    "status": report.credentials_file.as_str(),
                },
            })
        }
        CliCommand::Locate => {
            let artifact = find_latest_artifact(&config.aws.cache_dir)?;
            json!({
                "status": "found",
                "cache_file": artifact.path.to_string_lossy(),
                "modified": artifact.modified.to_rfc3339(),
            })
        }
        CliCommand::Import(args) => {
            let outcome = import_credentials(config, &args.profile, args.cache_file.as_deref())
                .with_context(|| format!("failed to import credentials for `{}`", args.profile))?;
            json!({
                "status": "written",
                "profile": outcome.merge.profile,
                "cache_file": outcome.cache_file.to_string_lossy(),
                "credentials_file": outcome.merge.path.to_string_lossy(),
                "sections": outcome.merge.sections,
                "expires_at": outcome.expires_at.map(|at| at.to_rfc3339()),
            })
        }
    };

    Ok(serde_json::to_string_pretty(&payload)?)
}
