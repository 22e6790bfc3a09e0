//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};

use crate::refresh::config::check_profile_name;

use super::{resolve_config_path, LaunchProfile};

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub enum ParsedCommand {
    Refresh(LaunchProfile),
    Cli(LaunchProfile, CliCommand),
}

/// Optional single-step commands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Delete the AWS CLI cache directory and the credentials file.
    Clear,
    /// Print the newest SSO cache artifact.
    Locate,
    /// Write credentials from a cache artifact without logging in.
    #[command(
        after_help = "Hint: without --cache-file the newest artifact in the cache directory is used."
    )]
    Import(ImportArgs),
}

/// Arguments for `import`.
#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// Section name to write the credentials under.
    pub profile: String,
    /// Cache artifact to read instead of the newest one.
    #[arg(long)]
    pub cache_file: Option<PathBuf>,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Refresh AWS SSO credentials for named profiles",
    long_about = "Refresh AWS SSO credentials for named profiles.\n\nWithout a subcommand every configured profile is logged in with `aws sso login`, the newest cache artifact is read and the credentials are merged into the shared credentials file."
)]
pub struct LaunchArgs {
    /// Path to a TOML config file (overrides AWS_SSO_REFRESH_CONFIG).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
    /// Profile to refresh; repeat to refresh several (overrides the configured list).
    #[arg(long = "profile", value_name = "NAME")]
    pub profiles: Vec<String>,
    /// Keep the cache directory and credentials file from previous runs.
    #[arg(long, default_value_t = false)]
    pub no_clear: bool,
    /// Optional single-step command.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl LaunchArgs {
    /// Build a `LaunchProfile` from CLI args.
    pub fn build(&self) -> Result<LaunchProfile> {
        let config_path = resolve_config_path(self.config_override.clone())?;

        Ok(LaunchProfile {
            config_path,
            profiles_override: self.profiles.clone(),
            no_clear: self.no_clear,
        })
    }

    /// Parse CLI args into either a full refresh or a single-step command.
    pub fn into_command(self) -> Result<ParsedCommand> {
        let profile = self.build()?;
        match self.command {
            Some(command) => {
                validate_command(&command)?;
                Ok(ParsedCommand::Cli(profile, command))
            }
            None => Ok(ParsedCommand::Refresh(profile)),
        }
    }
}

fn validate_command(command: &CliCommand) -> Result<()> {
    if let CliCommand::Import(args) = command {
        check_profile_name(&args.profile)
            .map_err(|message| anyhow!("invalid profile name for import: {message}"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_profile_flags_are_collected() {
        let args = LaunchArgs::try_parse_from([
            "aws-sso-refresh",
            "--profile",
            "dev",
            "--profile",
            "sandbox",
            "--no-clear",
        ])
        .expect("args parse");

        assert_eq!(args.profiles, vec!["dev", "sandbox"]);
        assert!(args.no_clear);
        assert!(args.command.is_none());
    }

    #[test]
    fn import_rejects_bracketed_profile() {
        let args = LaunchArgs::try_parse_from(["aws-sso-refresh", "import", "[dev]"])
            .expect("args parse");

        let error = args.into_command().expect_err("profile is rejected");

        assert!(error.to_string().contains("invalid profile name"), "{error}");
    }

    #[test]
    fn import_rejects_profile_with_newline() {
        let args = LaunchArgs::try_parse_from(["aws-sso-refresh", "import", "dev\nx"])
            .expect("args parse");

        let error = args.into_command().expect_err("profile is rejected");

        assert!(error.to_string().contains("section header"), "{error}");
    }

    #[test]
    fn verification_cannot_be_skipped() {
        let result = LaunchArgs::try_parse_from(["aws-sso-refresh", "--skip-verify"]);

        assert!(result.is_err());
    }

    #[test]
    fn import_accepts_cache_file() {
        let args = LaunchArgs::try_parse_from([
            "aws-sso-refresh",
            "import",
            "dev",
            "--cache-file",
            "/tmp/cache/abc.json",
        ])
        .expect("args parse");

        match args.into_command().expect("command is valid") {
            ParsedCommand::Cli(_, CliCommand::Import(import)) => {
                assert_eq!(import.profile, "dev");
                assert_eq!(import.cache_file, Some(PathBuf::from("/tmp/cache/abc.json")));
            }
            other => panic!("Unexpected command: {other:?}"),
        }
    }
}
