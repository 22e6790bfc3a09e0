//! Telemetry initialization and per-profile span helpers.

use std::time::Instant;

use anyhow::Result;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Initialize `tracing` and format developer logs.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper to record start and finish of a single profile refresh.
pub struct ProfileSpan {
    span: Span,
    started_at: Instant,
    run_id: Uuid,
    profile: String,
}

impl ProfileSpan {
    /// Start a profile span.
    pub fn start(run_id: Uuid, profile: &str) -> Self {
        let span = info_span!(
            target: "aws_sso_refresh::refresh",
            "profile_refresh",
            %run_id,
            profile
        );
        Self {
            span,
            started_at: Instant::now(),
            run_id,
            profile: profile.to_string(),
        }
    }

    /// Span to enter while the profile is being processed.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Close the span while recording the outcome.
    pub fn finish(self, status: &'static str) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "aws_sso_refresh::refresh",
            run_id = %self.run_id,
            profile = %self.profile,
            status = status,
            elapsed_ms = elapsed_ms,
            "Completed profile refresh"
        );
    }
}

/// Payload describing a refresh run before it starts.
#[derive(Debug)]
pub struct RefreshPlanTelemetry<'a> {
    pub run_id: Uuid,
    pub config_path: Option<&'a str>,
    pub cli_path: &'a str,
    pub cache_dir: &'a str,
    pub credentials_file: &'a str,
    pub profiles: &'a [String],
    pub clear_on_start: bool,
}

/// Emit the refresh plan to `tracing`.
pub fn emit_refresh_plan(telemetry: &RefreshPlanTelemetry<'_>) {
    info!(
        target: "aws_sso_refresh::refresh",
        run_id = %telemetry.run_id,
        config_path = telemetry.config_path.unwrap_or("(built-in defaults)"),
        cli_path = telemetry.cli_path,
        cache_dir = telemetry.cache_dir,
        credentials_file = telemetry.credentials_file,
        profiles = ?telemetry.profiles,
        clear_on_start = telemetry.clear_on_start,
        "Starting credential refresh"
    );
}
