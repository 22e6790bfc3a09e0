//! Read-modify-write of the credentials file.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::lib::{errors::CredentialsFileError, fs};

use super::{BlankLines, CredentialTriple, CredentialsStore, FanoutPolicy};

/// Sections written by a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub path: PathBuf,
    pub profile: String,
    /// Physical sections carrying the new credentials.
    pub sections: Vec<String>,
    /// Every section in the rewritten file, in order.
    pub file_sections: Vec<String>,
}

/// A credentials file together with the rules used to rewrite it.
#[derive(Debug, Clone)]
pub struct CredentialsFile {
    path: PathBuf,
    fanout: FanoutPolicy,
    blank_lines: BlankLines,
}

impl CredentialsFile {
    pub fn new(path: impl Into<PathBuf>, fanout: FanoutPolicy, blank_lines: BlankLines) -> Self {
        Self {
            path: path.into(),
            fanout,
            blank_lines,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the file, or return an empty store when it does not exist.
    pub fn load(&self) -> Result<CredentialsStore, CredentialsFileError> {
        Ok(fs::read_to_string_if_exists(&self.path)?
            .map(|contents| CredentialsStore::parse(&contents, self.blank_lines))
            .unwrap_or_default())
    }

    /// Set `profile` to `triple` and rewrite the whole file.
    ///
    /// Other sections keep their trimmed lines and their order.
    pub fn merge_write(
        &self,
        profile: &str,
        triple: &CredentialTriple,
    ) -> Result<MergeOutcome, CredentialsFileError> {
        let mut store = self.load()?;
        debug!(
            target: "aws_sso_refresh::credentials",
            path = %self.path.display(),
            existing_sections = store.len(),
            replacing = store.contains(profile),
            "Loaded credentials file"
        );

        store.upsert(profile, triple.to_lines());
        let rendered = store.render(&self.fanout);
        fs::write_atomically(&self.path, &rendered)?;

        let sections = match self.fanout.expand(profile) {
            Some(targets) => targets.to_vec(),
            None => vec![profile.to_string()],
        };
        let file_sections = store
            .physical_names(&self.fanout)
            .into_iter()
            .map(str::to_string)
            .collect();

        info!(
            target: "aws_sso_refresh::credentials",
            path = %self.path.display(),
            profile,
            sections = ?sections,
            "Wrote credentials"
        );

        Ok(MergeOutcome {
            path: self.path.clone(),
            profile: profile.to_string(),
            sections,
            file_sections,
        })
    }
}
