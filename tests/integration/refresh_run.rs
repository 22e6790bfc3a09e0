use anyhow::Result;

use crate::common::{mock_section, stderr, stdout, Workspace};

#[test]
fn default_run_renames_shared_and_fans_out_sandbox() -> Result<()> {
    let workspace = Workspace::new(&["shared", "dev", "sandbox"])?;
    workspace.seed_credentials("[leftover]\naws_access_key_id = OLD\n")?;

    let output = workspace.run(&[])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let expected = [
        mock_section("default", "shared"),
        mock_section("dev", "dev"),
        mock_section("sandbox", "sandbox"),
        mock_section("sandbox2", "sandbox"),
        mock_section("sandbox3", "sandbox"),
    ]
    .concat();
    assert_eq!(workspace.credentials()?, expected);

    let stdout = stdout(&output);
    assert!(stdout.contains("AWS credentials file cleared."), "{stdout}");
    assert!(
        stdout.contains(&format!(
            "Credentials for profile 'default' have been written to {}.",
            workspace.credentials_file.display()
        )),
        "{stdout}"
    );
    Ok(())
}

#[test]
fn login_failure_stops_remaining_profiles() -> Result<()> {
    let workspace = Workspace::new(&["shared", "fail-login", "dev"])?;

    let output = workspace.run(&[])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("Login failed for profile `fail-login`"),
        "stderr: {}",
        stderr(&output)
    );
    assert_eq!(workspace.credentials()?, mock_section("default", "shared"));
    Ok(())
}

#[test]
fn verification_failure_is_soft() -> Result<()> {
    let workspace = Workspace::new(&["fail-verify"])?;

    let output = workspace.run(&[])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Failed to list S3 buckets"));
    assert_eq!(
        workspace.credentials()?,
        mock_section("fail-verify", "fail-verify")
    );
    Ok(())
}

#[test]
fn missing_cache_artifact_aborts_with_login_hint() -> Result<()> {
    let workspace = Workspace::new(&["no-cache"])?;

    let output = workspace.run(&[])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("Please run 'aws sso login' first."),
        "stderr: {}",
        stderr(&output)
    );
    assert!(!workspace.credentials_file.exists());
    Ok(())
}

#[test]
fn profile_override_without_clear_keeps_other_sections() -> Result<()> {
    let workspace = Workspace::new(&["shared", "dev", "sandbox"])?;
    workspace.seed_credentials("[personal]\naws_access_key_id = MINE\n\n")?;

    let output = workspace.run(&["--profile", "dev", "--no-clear"])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Listing S3 buckets for profile: dev"));
    assert_eq!(
        workspace.credentials()?,
        format!(
            "[personal]\naws_access_key_id = MINE\n\n{}",
            mock_section("dev", "dev")
        )
    );
    Ok(())
}

#[test]
fn previous_profiles_artifact_is_never_written_for_the_next() -> Result<()> {
    let workspace = Workspace::new(&["dev", "no-cache", "sandbox"])?;

    let output = workspace.run(&[])?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(
        stderr.contains("predates the login for profile `no-cache`"),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("dev.json"), "stderr: {stderr}");
    assert_eq!(workspace.credentials()?, mock_section("dev", "dev"));
    Ok(())
}

#[test]
fn leftover_artifact_is_not_imported_without_clear() -> Result<()> {
    let workspace = Workspace::new(&["shared"])?;
    workspace.seed_artifact(
        "old.json",
        r#"{"Credentials":{"AccessKeyId":"STALE","SecretAccessKey":"S","SessionToken":"T"}}"#,
    )?;
    workspace.seed_credentials("[personal]\naws_access_key_id = MINE\n")?;

    let output = workspace.run(&["--no-clear", "--profile", "no-cache", "--profile", "dev"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("old.json"),
        "stderr: {}",
        stderr(&output)
    );
    assert_eq!(
        workspace.credentials()?,
        "[personal]\naws_access_key_id = MINE\n"
    );
    Ok(())
}
