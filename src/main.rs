//! Entry point for aws-sso-refresh.
use std::process::ExitCode;

use anyhow::Error;
use aws_sso_refresh::{
    cli::{execute_cli_command, CliCommand, LaunchArgs, LaunchProfile, ParsedCommand},
    lib::telemetry,
    refresh::{
        config::RefreshConfig,
        runtime::{run_refresh, AwsCliAuthenticator, RunExit},
    },
};
use clap::Parser;

fn main() -> ExitCode {
    match bootstrap() {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

fn bootstrap() -> Result<(), RunExit> {
    telemetry::init_tracing().map_err(RunExit::from_error)?;
    let args = LaunchArgs::parse();
    let command = args.into_command().map_err(RunExit::from_error)?;

    match command {
        ParsedCommand::Refresh(profile) => refresh(profile),
        ParsedCommand::Cli(profile, command) => handle_cli_command(profile, command),
    }
}

fn load_config(profile: &LaunchProfile) -> Result<RefreshConfig, RunExit> {
    RefreshConfig::load(profile.config_path.clone())
        .map_err(|err| RunExit::from_error(Error::new(err)))
}

fn refresh(profile: LaunchProfile) -> Result<(), RunExit> {
    let config = load_config(&profile)?;
    let plan = profile
        .plan(&config)
        .map_err(|err| RunExit::from_error(Error::new(err)))?;
    let authenticator = AwsCliAuthenticator::new(config.aws.cli_path.clone());
    run_refresh(&config, &plan, &authenticator)
        .map_err(|err| RunExit::from_error(Error::new(err)))?;
    Ok(())
}

fn handle_cli_command(profile: LaunchProfile, command: CliCommand) -> Result<(), RunExit> {
    let config = load_config(&profile)?;
    let message = execute_cli_command(command, &config).map_err(RunExit::from_error)?;
    println!("{message}");
    Ok(())
}
