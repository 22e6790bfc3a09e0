//! Refresh run sequencing and process exit reporting.
mod authenticator;
mod exit;
mod orchestrator;

pub use authenticator::{Authenticator, AwsCliAuthenticator};
pub use exit::RunExit;
pub use orchestrator::{
    clear_state, import_credentials, run_refresh, ClearReport, ImportOutcome, RefreshPlan,
    RefreshReport, RefreshedProfile,
};
