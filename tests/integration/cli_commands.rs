use anyhow::{Context, Result};
use serde_json::Value;

use crate::common::{stderr, stdout, Workspace};

fn payload(output: &std::process::Output) -> Result<Value> {
    serde_json::from_str(&stdout(output)).context("stdout is not a JSON payload")
}

#[test]
fn locate_prints_newest_artifact() -> Result<()> {
    let workspace = Workspace::new(&["dev"])?;
    let artifact = workspace.seed_artifact("abc.json", "{}")?;

    let output = workspace.run(&["locate"])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let payload = payload(&output)?;
    assert_eq!(payload["status"], "found");
    assert_eq!(
        payload["cache_file"],
        Value::String(artifact.display().to_string())
    );
    Ok(())
}

#[test]
fn clear_removes_cache_and_credentials() -> Result<()> {
    let workspace = Workspace::new(&["dev"])?;
    workspace.seed_artifact("abc.json", "{}")?;
    workspace.seed_credentials("[dev]\nk = v\n")?;

    let output = workspace.run(&["clear"])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(!workspace.cache_dir.exists());
    assert!(!workspace.credentials_file.exists());
    Ok(())
}

#[test]
fn import_merges_newest_artifact_without_login() -> Result<()> {
    let workspace = Workspace::new(&["dev"])?;
    workspace.seed_credentials("[other]\nregion = eu-west-1\n\n")?;
    workspace.seed_artifact(
        "abc.json",
        r#"{"Credentials":{"AccessKeyId":"AKIA123","SecretAccessKey":"SECRET","SessionToken":"TOKEN"}}"#,
    )?;

    let output = workspace.run(&["import", "dev"])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        workspace.credentials()?,
        "[other]\nregion = eu-west-1\n\n[dev]\naws_access_key_id = AKIA123\naws_secret_access_key = SECRET\naws_session_token = TOKEN\n\n"
    );
    Ok(())
}

#[test]
fn import_of_malformed_artifact_fails() -> Result<()> {
    let workspace = Workspace::new(&["dev"])?;
    workspace.seed_artifact("abc.json", r#"{"Credentials":{"AccessKeyId":"A"}}"#)?;

    let output = workspace.run(&["import", "dev"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("Credentials.SecretAccessKey"),
        "stderr: {}",
        stderr(&output)
    );
    Ok(())
}
