//! Tests for error messages, suggestions and exit codes.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn hatch(dir: &Path) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("hatch");
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("HATCH_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_no_arguments_shows_usage() {
    let temp = TempDir::new().unwrap();
    hatch(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_template_parse_error_is_user_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bad.tmpl"), "line one\n{{#if x}}never closed\n").unwrap();

    hatch(temp.path())
        .args(["render", "bad.tmpl"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("{{#if x}} block opened on line 2"));
}

#[test]
fn test_mismatched_close_names_both_blocks() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bad.tmpl"), "{{#each items}}x{{/if}}\n").unwrap();

    hatch(temp.path())
        .args(["render", "bad.tmpl"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("{{/if}}"))
        .stderr(predicate::str::contains("{{#each}}"));
}

#[test]
fn test_missing_template_is_not_found() {
    let temp = TempDir::new().unwrap();
    hatch(temp.path())
        .args(["render", "nope.tmpl"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_bad_context_file_is_user_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("t.tmpl"), "{{name}}").unwrap();
    fs::write(temp.path().join("ctx.json"), "not json").unwrap();

    hatch(temp.path())
        .args(["render", "t.tmpl", "--context", "ctx.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a JSON object"));
}

#[test]
fn test_malformed_var_is_rejected() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("t.tmpl"), "x").unwrap();

    hatch(temp.path())
        .args(["render", "t.tmpl", "--var", "novalue"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn test_existing_directory_needs_force() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("coke")).unwrap();

    hatch(temp.path())
        .args(["new", "coke", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));

    hatch(temp.path())
        .args(["new", "coke", "--dry-run", "--force"])
        .assert()
        .success();
}

#[test]
fn test_invalid_project_name() {
    let temp = TempDir::new().unwrap();
    hatch(temp.path())
        .args(["new", ".hidden", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"));
}

#[test]
fn test_missing_explicit_config_is_config_error() {
    let temp = TempDir::new().unwrap();
    hatch(temp.path())
        .args(["--config", "absent.toml", "config", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_unknown_config_key() {
    let temp = TempDir::new().unwrap();
    hatch(temp.path())
        .args(["config", "get", "defaults.language"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_verbose_hides_hint() {
    let temp = TempDir::new().unwrap();
    hatch(temp.path())
        .args(["render", "nope.tmpl"])
        .assert()
        .stderr(predicate::str::contains("--verbose"));

    hatch(temp.path())
        .args(["-v", "render", "nope.tmpl"])
        .assert()
        .stderr(predicate::str::contains("Use -v / --verbose").not());
}
