//! Shared helpers for building `aws` CLI commands.

use std::{path::Path, process::Command};

/// Build `aws sso login --profile <profile>`.
pub fn build_sso_login_command(cli_path: &Path, profile: &str) -> Command {
    let mut command = Command::new(cli_path);
    command.arg("sso").arg("login").arg("--profile").arg(profile);
    command
}

/// Build `aws s3 ls --profile <profile>`.
pub fn build_s3_list_command(cli_path: &Path, profile: &str) -> Command {
    let mut command = Command::new(cli_path);
    command.arg("s3").arg("ls").arg("--profile").arg(profile);
    command
}

/// Render a command line for logs and error messages.
pub fn describe_command(command: &Command) -> String {
    let mut rendered = command.get_program().to_string_lossy().into_owned();
    for arg in command.get_args() {
        rendered.push(' ');
        rendered.push_str(&arg.to_string_lossy());
    }
    rendered
}
