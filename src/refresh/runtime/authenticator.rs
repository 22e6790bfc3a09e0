use std::{path::PathBuf, process::Command};

use tracing::info;

use crate::lib::{
    aws_cli::{build_s3_list_command, build_sso_login_command, describe_command},
    errors::AuthenticatorError,
};

/// External login flow for a profile.
pub trait Authenticator {
    /// Interactive SSO login. Failure aborts the run.
    fn login(&self, profile: &str) -> Result<(), AuthenticatorError>;
    /// Post-login `aws s3 ls`, which also writes the CLI cache artifact.
    /// Failure is reported but never aborts the run.
    fn verify(&self, profile: &str) -> Result<(), AuthenticatorError>;
}

/// Authenticator that shells out to the `aws` CLI with inherited stdio.
pub struct AwsCliAuthenticator {
    cli_path: PathBuf,
}

impl AwsCliAuthenticator {
    pub fn new(cli_path: impl Into<PathBuf>) -> Self {
        Self {
            cli_path: cli_path.into(),
        }
    }
}

impl Authenticator for AwsCliAuthenticator {
    fn login(&self, profile: &str) -> Result<(), AuthenticatorError> {
        run_to_completion(build_sso_login_command(&self.cli_path, profile), profile)
    }

    fn verify(&self, profile: &str) -> Result<(), AuthenticatorError> {
        run_to_completion(build_s3_list_command(&self.cli_path, profile), profile)
    }
}

fn run_to_completion(mut command: Command, profile: &str) -> Result<(), AuthenticatorError> {
    let rendered = describe_command(&command);
    info!(
        target: "aws_sso_refresh::refresh",
        command = %rendered,
        "Running aws CLI"
    );
    let status = command.status().map_err(|source| AuthenticatorError::Spawn {
        program: command.get_program().to_string_lossy().into_owned(),
        source,
    })?;
    if status.success() {
        return Ok(());
    }

    Err(AuthenticatorError::CommandFailed {
        command: rendered,
        profile: profile.to_string(),
        exit_code: status.code(),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn mock_aws_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/mock-aws.sh")
    }

    #[test]
    fn zero_exit_is_success() {
        let authenticator = AwsCliAuthenticator::new(mock_aws_path());

        authenticator.login("dev").expect("login succeeds");
        authenticator.verify("dev").expect("verify succeeds");
    }

    #[test]
    fn non_zero_exit_reports_code_and_profile() {
        let authenticator = AwsCliAuthenticator::new(mock_aws_path());

        let error = authenticator.login("fail-login").expect_err("login fails");

        match error {
            AuthenticatorError::CommandFailed {
                command,
                profile,
                exit_code,
            } => {
                assert_eq!(profile, "fail-login");
                assert_eq!(exit_code, Some(3));
                assert!(
                    command.ends_with("sso login --profile fail-login"),
                    "{command}"
                );
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn verify_failure_is_reported() {
        let authenticator = AwsCliAuthenticator::new(mock_aws_path());

        let error = authenticator
            .verify("fail-verify")
            .expect_err("verify fails");

        assert!(
            matches!(error, AuthenticatorError::CommandFailed { exit_code: Some(1), .. }),
            "{error:?}"
        );
    }

    #[test]
    fn missing_executable_is_a_spawn_error() {
        let authenticator = AwsCliAuthenticator::new("/nonexistent/aws-sso-refresh/aws");

        let error = authenticator.login("dev").expect_err("spawn fails");

        assert!(matches!(error, AuthenticatorError::Spawn { .. }), "{error:?}");
    }
}
