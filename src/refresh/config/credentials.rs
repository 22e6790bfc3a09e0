use std::{collections::BTreeMap, path::Path};

use serde::Deserialize;

use crate::{
    credentials::{BlankLines, FanoutPolicy},
    lib::errors::ConfigError,
};

use super::profiles::validate_profile_name;

/// Rules for rewriting the credentials file.
#[derive(Debug, Clone)]
pub struct CredentialsSection {
    pub fanout: FanoutPolicy,
    pub blank_lines: BlankLines,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawCredentialsSection {
    pub fanout: Option<BTreeMap<String, Vec<String>>>,
    pub preserve_blank_lines: Option<bool>,
}

pub fn parse_credentials_section(
    raw: Option<RawCredentialsSection>,
    path: &Path,
) -> Result<CredentialsSection, ConfigError> {
    let credentials_raw = raw.unwrap_or_default();

    let fanout = match credentials_raw.fanout {
        Some(table) => {
            validate_fanout(path, &table)?;
            FanoutPolicy::from_table(table)
        }
        None => FanoutPolicy::default(),
    };

    let blank_lines = if credentials_raw.preserve_blank_lines.unwrap_or(false) {
        BlankLines::Preserve
    } else {
        BlankLines::Drop
    };

    Ok(CredentialsSection {
        fanout,
        blank_lines,
    })
}

fn validate_fanout(path: &Path, table: &BTreeMap<String, Vec<String>>) -> Result<(), ConfigError> {
    let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
    for (alias, targets) in table {
        if targets.is_empty() {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "credentials.fanout",
                message: format!("Alias `{alias}` must list at least one section"),
            });
        }
        for target in targets {
            validate_profile_name(path, "credentials.fanout", target)?;
            if target == alias {
                continue;
            }
            if let Some(other) = owners.insert(target.as_str(), alias.as_str()) {
                return Err(ConfigError::InvalidField {
                    path: path.to_path_buf(),
                    field: "credentials.fanout",
                    message: format!(
                        "Section `{target}` is listed by both `{other}` and `{alias}`"
                    ),
                });
            }
        }
    }
    Ok(())
}
