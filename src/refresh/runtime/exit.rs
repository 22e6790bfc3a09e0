use std::process::ExitCode;

use anyhow::Error;

/// Bundles a run error message with an exit code.
#[derive(Debug)]
pub struct RunExit {
    message: String,
    exit_code: ExitCode,
}

impl RunExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
