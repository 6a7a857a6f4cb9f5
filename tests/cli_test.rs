//! Integration tests for the `stencil` binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_template(root: &Path, name: &str, descriptor: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("template.yml"), descriptor).unwrap();
}

/// A project with two configured repositories that both hold `node`.
fn setup_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let acme = temp.path().join("vendor").join("acme");
    write_template(&acme, "node", "version: 0.0.1\ndescription: Zero-OS node\n");
    write_template(&acme, "node-v2", "version: 0.0.2\n");
    write_template(&temp.path().join("vendor").join("other"), "node", "");

    let stencil_dir = temp.path().join(".stencil");
    fs::create_dir_all(&stencil_dir).unwrap();
    fs::write(
        stencil_dir.join("config.yml"),
        r#"
repositories:
  - url: https://github.com/acme/templates
    path: vendor/acme
  - url: git@gitlab.com:other/templates.git
    path: vendor/other
"#,
    )
    .unwrap();
    temp
}

fn stencil(project: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("stencil"));
    cmd.current_dir(project).env_remove("STENCIL_CONFIG").env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("stencil"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Template registry"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("stencil"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_no_args_lists_templates() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    stencil(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("github.com/acme/templates/node/0.0.1"))
        .stdout(predicate::str::contains("gitlab.com/other/templates/node"));
    Ok(())
}

#[test]
fn cli_list_without_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    stencil(temp.path())
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No configuration found"));
    Ok(())
}

#[test]
fn cli_list_json_filtered() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    let output = stencil(temp.path())
        .args(["list", "--json", "--host", "gitlab.com"])
        .output()?;

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["identifier"], "gitlab.com/other/templates/node");
    Ok(())
}

#[test]
fn cli_list_with_source_only() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    write_template(&temp.path().join("checkout"), "vm", "version: 1.2.3\n");

    stencil(temp.path())
        .args(["list", "--source", "https://github.com/acme/vms=checkout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("github.com/acme/vms/vm/1.2.3"));
    Ok(())
}

#[test]
fn cli_resolve_found() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    stencil(temp.path())
        .args(["resolve", "node-v2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("github.com/acme/templates/node-v2/0.0.2"));
    Ok(())
}

#[test]
fn cli_resolve_verbose_shows_directory() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    stencil(temp.path())
        .args(["resolve", "github.com/acme/templates/node", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("directory:"))
        .stdout(predicate::str::contains("Zero-OS node"));
    Ok(())
}

#[test]
fn cli_resolve_not_found_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    stencil(temp.path())
        .args(["resolve", "gateway"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Template not found: gateway"));
    Ok(())
}

#[test]
fn cli_resolve_ambiguous_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    stencil(temp.path())
        .args(["resolve", "node"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("github.com/acme/templates/node/0.0.1"))
        .stdout(predicate::str::contains("gitlab.com/other/templates/node"));
    Ok(())
}

#[test]
fn cli_resolve_uses_config_override() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    let custom = temp.path().join("only-other.yml");
    fs::write(
        &custom,
        "repositories:\n  - url: git@gitlab.com:other/templates.git\n    path: vendor/other\n",
    )?;

    stencil(temp.path())
        .args(["resolve", "node", "--config"])
        .arg(&custom)
        .assert()
        .success()
        .stdout(predicate::str::contains("gitlab.com/other/templates/node"));
    Ok(())
}

#[test]
fn cli_resolve_from_project_flag() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    let elsewhere = TempDir::new().unwrap();
    stencil(elsewhere.path())
        .args(["resolve", "node-v2", "--project"])
        .arg(temp.path())
        .assert()
        .success();
    Ok(())
}

#[test]
fn cli_parse_rejects_three_segments() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    stencil(temp.path())
        .args(["parse", "a/b/c"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid template identifier"));
    Ok(())
}

#[test]
fn cli_parse_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    let output = stencil(temp.path())
        .args(["parse", "github.com/jumpscale/0-robot/node/0.0.1", "--json"])
        .output()?;

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["repository"], "0-robot");
    assert_eq!(value["version"], "0.0.1");
    Ok(())
}

#[test]
fn cli_normalize_output() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    let output = stencil(temp.path())
        .args(["normalize", "ssh://git@docs.example.com:10022/Org/repo.git"])
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    insta::assert_snapshot!(stdout, @r"
    protocol: git
    host: docs.example.com
    account: Org
    repository: repo
    ");
    Ok(())
}

#[test]
fn cli_normalize_malformed_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    stencil(temp.path())
        .args(["normalize", "/not/existing/path"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Malformed repository URL"));
    Ok(())
}

#[test]
fn cli_completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("stencil"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("stencil"));
    Ok(())
}

#[test]
fn cli_rejects_bad_source() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("stencil"));
    cmd.args(["list", "--source", "no-directory"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("URL=DIR"));
    Ok(())
}

#[test]
fn cli_load_conflict_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    stencil(temp.path())
        .args(["list", "--source", "git@github.com:acme/templates=vendor/acme"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Template conflict between"));
    Ok(())
}
