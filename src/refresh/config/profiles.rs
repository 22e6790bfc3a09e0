use std::{collections::BTreeMap, path::Path};

use serde::Deserialize;

use crate::lib::errors::ConfigError;

pub const DEFAULT_PROFILES: &[&str] = &["shared", "dev", "sandbox"];
pub const DEFAULT_RENAMES: &[(&str, &str)] = &[("shared", "default")];

/// Which profiles to refresh and under which names they are written.
#[derive(Debug, Clone)]
pub struct ProfilesSection {
    pub profiles: Vec<String>,
    pub rename: BTreeMap<String, String>,
    pub clear_on_start: bool,
}

impl ProfilesSection {
    /// Section name the credentials for `profile` are written under.
    pub fn file_profile<'a>(&'a self, profile: &'a str) -> &'a str {
        self.rename
            .get(profile)
            .map(String::as_str)
            .unwrap_or(profile)
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawProfilesSection {
    pub profiles: Option<Vec<String>>,
    pub rename: Option<BTreeMap<String, String>>,
    pub clear_on_start: Option<bool>,
}

pub fn parse_profiles_section(
    raw: Option<RawProfilesSection>,
    path: &Path,
) -> Result<ProfilesSection, ConfigError> {
    let refresh_raw = raw.unwrap_or_default();

    let profiles = refresh_raw.profiles.unwrap_or_else(|| {
        DEFAULT_PROFILES
            .iter()
            .map(|profile| profile.to_string())
            .collect()
    });
    validate_profiles(path, &profiles)?;

    let rename = refresh_raw.rename.unwrap_or_else(|| {
        DEFAULT_RENAMES
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect()
    });
    validate_rename(path, &rename)?;

    Ok(ProfilesSection {
        profiles,
        rename,
        clear_on_start: refresh_raw.clear_on_start.unwrap_or(true),
    })
}

/// Shared by config parsing and the `--profile` override.
pub fn validate_profiles(path: &Path, profiles: &[String]) -> Result<(), ConfigError> {
    if profiles.is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "refresh.profiles",
            message: "Specify at least one profile name".into(),
        });
    }
    for profile in profiles {
        validate_profile_name(path, "refresh.profiles", profile)?;
    }
    Ok(())
}

fn validate_rename(path: &Path, rename: &BTreeMap<String, String>) -> Result<(), ConfigError> {
    for target in rename.values() {
        validate_profile_name(path, "refresh.rename", target)?;
    }
    Ok(())
}

pub(crate) fn validate_profile_name(
    path: &Path,
    field: &'static str,
    name: &str,
) -> Result<(), ConfigError> {
    check_profile_name(name).map_err(|message| ConfigError::InvalidField {
        path: path.to_path_buf(),
        field,
        message,
    })
}

/// A profile name must survive a round trip through a `[name]` header.
pub fn check_profile_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Profile names cannot be empty".into());
    }
    if name.trim() != name || name.contains(['[', ']', '\n']) {
        return Err(format!("Profile name cannot be written as a section header: {name:?}"));
    }
    Ok(())
}
