use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Result};
use tempfile::TempDir;

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_aws-sso-refresh");

pub fn mock_aws_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/mock-aws.sh")
}

/// Temporary AWS directory layout plus a config file pointing at it.
pub struct Workspace {
    _temp: TempDir,
    pub cache_dir: PathBuf,
    pub credentials_file: PathBuf,
    pub config_path: PathBuf,
}

impl Workspace {
    pub fn new(profiles: &[&str]) -> Result<Self> {
        let temp = tempfile::tempdir().context("failed to create temp dir")?;
        let aws_dir = temp.path().join(".aws");
        let cache_dir = aws_dir.join("cli").join("cache");
        let credentials_file = aws_dir.join("credentials");
        let config_path = temp.path().join("refresh.toml");

        let profiles = profiles
            .iter()
            .map(|profile| format!("\"{profile}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let config = format!(
            "[aws]\ncli_path = \"{}\"\ncache_dir = \"{}\"\ncredentials_file = \"{}\"\n\n[refresh]\nprofiles = [{profiles}]\n",
            mock_aws_path().display(),
            cache_dir.display(),
            credentials_file.display(),
        );
        fs::write(&config_path, config)
            .with_context(|| format!("failed to write config {}", config_path.display()))?;

        Ok(Self {
            _temp: temp,
            cache_dir,
            credentials_file,
            config_path,
        })
    }

    pub fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new(BINARY_PATH)
            .arg("--config")
            .arg(&self.config_path)
            .args(args)
            .env("MOCK_AWS_CACHE_DIR", &self.cache_dir)
            .env_remove("AWS_SSO_REFRESH_CONFIG")
            .env("RUST_LOG", "warn")
            .output()
            .context("failed to run aws-sso-refresh")
    }

    pub fn credentials(&self) -> Result<String> {
        fs::read_to_string(&self.credentials_file).with_context(|| {
            format!(
                "failed to read credentials file {}",
                self.credentials_file.display()
            )
        })
    }

    pub fn seed_credentials(&self, contents: &str) -> Result<()> {
        write_file(&self.credentials_file, contents)
    }

    pub fn seed_artifact(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.cache_dir.join(name);
        write_file(&path, contents)?;
        Ok(path)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

/// Section body the mock `aws` produces for `profile`.
pub fn mock_section(section: &str, profile: &str) -> String {
    format!(
        "[{section}]\naws_access_key_id = AKIA-{profile}\naws_secret_access_key = secret-{profile}\naws_session_token = token-{profile}\n\n"
    )
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
