//! LaunchProfile and config path resolution.
use std::{env, path::PathBuf};

use anyhow::{Context, Result};

use crate::{
    lib::errors::ConfigError,
    refresh::{
        config::{validate_profiles, RefreshConfig},
        runtime::RefreshPlan,
    },
};

/// Resolved launch profile.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    /// Explicit `--config`, absolute. `None` defers to the environment and defaults.
    pub config_path: Option<PathBuf>,
    pub profiles_override: Vec<String>,
    pub no_clear: bool,
}

impl LaunchProfile {
    /// Combine the loaded config with command-line overrides.
    pub fn plan(&self, config: &RefreshConfig) -> Result<RefreshPlan, ConfigError> {
        let mut plan = RefreshPlan::from_config(config);
        if !self.profiles_override.is_empty() {
            validate_profiles(config.source_label(), &self.profiles_override)?;
            plan.profiles = self.profiles_override.clone();
        }
        if self.no_clear {
            plan.clear_on_start = false;
        }
        Ok(plan)
    }
}

/// Make a `--config` override absolute against the current directory.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<Option<PathBuf>> {
    let Some(path) = override_path else {
        return Ok(None);
    };

    if path.is_absolute() {
        return Ok(Some(path));
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(Some(cwd.join(path)))
}
