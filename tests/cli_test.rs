//! Integration tests for the driftscope binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CONFIG: &str = r#"
default_tool: terragrunt
tool_versions:
  terraform: "1.7.5"
scopes:
  - name: vpc
    project: network
    environment: prod
    directory: infra/vpc
  - name: dns
    project: network
    environment: staging
    directory: infra/dns
    tool: opentofu
"#;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".driftscope.yml"), config).unwrap();
    temp
}

/// The binary in `dir`, isolated from any Actions environment the tests
/// themselves run in.
fn driftscope(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(cargo_bin("driftscope"));
    cmd.current_dir(dir);
    for var in [
        "GITHUB_ACTIONS",
        "GITHUB_OUTPUT",
        "GITHUB_STEP_SUMMARY",
        "GITHUB_PATH",
        "INPUT_CONFIG",
        "INPUT_ENVIRONMENT",
        "INPUT_SCOPE",
        "INPUT_SCOPES",
        "RUNNER_DEBUG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    driftscope(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("drift detection"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    driftscope(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn resolve_prints_scopes_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    let output = driftscope(temp.path()).arg("resolve").output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["scopes"][0]["name"], "vpc");
    assert_eq!(json["scopes"][0]["tool"], "terragrunt");
    assert_eq!(
        json["tools"]["tools"],
        serde_json::json!(["terragrunt", "opentofu", "terraform"])
    );
    assert_eq!(
        json["tools"]["versions"],
        serde_json::json!({ "terraform": "1.7.5" })
    );
    Ok(())
}

#[test]
fn resolve_by_environment_from_action_input() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    let output = driftscope(temp.path())
        .arg("resolve")
        .env("INPUT_ENVIRONMENT", "staging")
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["scopes"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["scopes"][0]["name"], "dns");
    assert_eq!(json["tools"]["tools"], serde_json::json!(["opentofu"]));
    Ok(())
}

#[test]
fn empty_action_inputs_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    let output = driftscope(temp.path())
        .arg("resolve")
        .env("INPUT_ENVIRONMENT", "")
        .env("INPUT_SCOPE", "")
        .env("INPUT_SCOPES", "")
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["scopes"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[test]
fn resolve_writes_github_outputs() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    let output_file = temp.path().join("github_output");

    driftscope(temp.path())
        .args(["resolve", "--scope", "dns"])
        .env("GITHUB_OUTPUT", &output_file)
        .assert()
        .success();

    let content = fs::read_to_string(&output_file)?;
    assert!(content.contains("scopes<<DRIFTSCOPE_EOF\n[{\"name\":\"dns\""));
    assert!(content.contains("scope_count<<DRIFTSCOPE_EOF\n1\nDRIFTSCOPE_EOF\n"));
    Ok(())
}

#[test]
fn unknown_names_warn_but_succeed() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    driftscope(temp.path())
        .args(["resolve", "--scopes", "vpc,ghost"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ghost"));
    Ok(())
}

#[test]
fn unknown_names_are_annotated_in_actions() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    driftscope(temp.path())
        .args(["resolve", "--scopes", "vpc,ghost"])
        .env("GITHUB_ACTIONS", "true")
        .assert()
        .success()
        .stderr(predicate::str::contains("::warning title=Unknown scope::"));
    Ok(())
}

#[test]
fn matrix_prints_include_list() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    driftscope(temp.path())
        .args(["matrix", "--environment", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            r#"{"include":[{"name":"vpc","project":"network""#,
        ));
    Ok(())
}

#[test]
fn conflicting_filters_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    driftscope(temp.path())
        .args(["resolve", "--environment", "prod", "--scope", "vpc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Only one of --environment, --scope or --scopes may be set",
        ));
    Ok(())
}

#[test]
fn blank_action_inputs_do_not_conflict_with_a_set_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    let output = driftscope(temp.path())
        .arg("resolve")
        .env("INPUT_ENVIRONMENT", "")
        .env("INPUT_SCOPE", "dns")
        .env("INPUT_SCOPES", "")
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let names: Vec<&str> = json["scopes"]
        .as_array()
        .map(|scopes| scopes.iter().filter_map(|s| s["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, ["dns"]);
    Ok(())
}

#[test]
fn missing_config_exits_1() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    driftscope(temp.path())
        .arg("resolve")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(".driftscope.yml"));
    Ok(())
}

#[test]
fn config_flag_overrides_default_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::create_dir(temp.path().join("ci"))?;
    fs::write(temp.path().join("ci/drift.yml"), CONFIG)?;

    driftscope(temp.path())
        .args(["--config", "ci/drift.yml", "resolve", "--scope", "vpc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"vpc\""));
    Ok(())
}

#[test]
fn unknown_scope_exits_1() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    driftscope(temp.path())
        .args(["resolve", "--scope", "ghost"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ghost"));
    Ok(())
}

#[test]
fn missing_tool_without_default_exits_1() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(
        r#"
scopes:
  - name: orphan
    project: p
    environment: prod
    directory: orphan
"#,
    );
    driftscope(temp.path())
        .arg("resolve")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("orphan"));
    Ok(())
}

#[test]
fn install_dry_run_lists_tools() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    driftscope(temp.path())
        .args(["install", "--dry-run", "--environment", "prod"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Would install terragrunt latest"))
        .stderr(predicate::str::contains("Would install terraform 1.7.5"));
    assert!(!temp.path().join(".driftscope").exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn check_reports_drift_with_exit_code_2() -> Result<(), Box<dyn std::error::Error>> {
    use std::os::unix::fs::PermissionsExt;

    let temp = setup_project(CONFIG);
    fs::create_dir_all(temp.path().join("infra/vpc"))?;
    fs::create_dir_all(temp.path().join("infra/dns"))?;
    let cli = temp.path().join("fake-drift");
    fs::write(
        &cli,
        "#!/bin/sh\necho 'Plan: 0 to add, 1 to change, 0 to destroy.'\nexit 2\n",
    )?;
    fs::set_permissions(&cli, fs::Permissions::from_mode(0o755))?;

    driftscope(temp.path())
        .args(["check", "--scope", "vpc", "--cli"])
        .arg(&cli)
        .assert()
        .code(2);

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("drift-summary.json"))?)?;
    assert_eq!(summary["drift"], 1);
    assert_eq!(summary["results"][0]["changes"]["change"], 1);
    Ok(())
}

#[test]
fn report_renders_markdown() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(
        temp.path().join("drift-summary.json"),
        r#"{"generated_at":"2026-03-01T12:00:00Z","total":0,"ok":0,"drift":0,"error":0,"results":[]}"#,
    )?;

    driftscope(temp.path())
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("## Drift check results"));
    Ok(())
}
