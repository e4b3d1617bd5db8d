//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn configer() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("configer"));
    cmd.env_clear();
    cmd
}

#[test]
fn test_cli_version() {
    let mut cmd = configer();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("configer"));
}

#[test]
fn test_cli_help() {
    let mut cmd = configer();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_no_files_prints_defaults() {
    let mut cmd = configer();
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"\""))
        .stdout(predicate::str::contains("\"ids\": []"));
}

#[test]
fn test_layers_repeated_config_flags() {
    let tmp = TempDir::new().expect("tmp");
    let json = tmp.path().join("config.json");
    let yaml = tmp.path().join("config.yml");
    let env = tmp.path().join(".env");
    fs::write(&json, r#"{"Name": "from-json", "Log": {"Level": "info", "File": "app.log"}, "IDs": [1, 2]}"#)
        .expect("write json");
    fs::write(&yaml, "name: from-yaml\nenvironment: staging\n").expect("write yaml");
    fs::write(&env, "LOG_LEVEL=debug\nIDS=7,8\n").expect("write env");

    let mut cmd = configer();
    cmd.arg("-c").arg(&json).arg("--config").arg(&yaml).arg("-c").arg(&env);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"from-yaml\""))
        .stdout(predicate::str::contains("\"level\": \"debug\""))
        .stdout(predicate::str::contains("\"file\": \"app.log\""))
        .stdout(predicate::str::contains("\"environment\": \"staging\""))
        .stdout(predicate::str::contains("7"))
        .stdout(predicate::str::contains("8"));
}

#[test]
fn test_environment_overrides_files() {
    let tmp = TempDir::new().expect("tmp");
    let json = tmp.path().join("config.json");
    fs::write(&json, r#"{"Name": "from-json", "Environment": "dev"}"#).expect("write json");

    let mut cmd = configer();
    cmd.env("NAME", "from-env").arg("-c").arg(&json);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"from-env\""))
        .stdout(predicate::str::contains("\"environment\": \"dev\""));
}

#[test]
fn test_unrecognized_extension_is_skipped() {
    let tmp = TempDir::new().expect("tmp");
    let toml = tmp.path().join("config.toml");
    fs::write(&toml, "name = \"from-toml\"\n").expect("write toml");

    let mut cmd = configer();
    cmd.arg("-c").arg(&toml);
    cmd.assert().success().stdout(predicate::str::contains("\"name\": \"\""));
}

#[test]
fn test_missing_file_fails() {
    let tmp = TempDir::new().expect("tmp");

    let mut cmd = configer();
    cmd.arg("-c").arg(tmp.path().join("absent.json"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed loading configuration"))
        .stderr(predicate::str::contains("absent.json"));
}

#[test]
fn test_validation_failure_is_reported() {
    let mut cmd = configer();
    cmd.env("LOG_LEVEL", "loud");
    cmd.assert().failure().stderr(predicate::str::contains("\"LOG_LEVEL\" must be one of"));
}

#[test]
fn test_file_server_sample_loads_nested_server_section() {
    let tmp = TempDir::new().expect("tmp");
    let json = tmp.path().join("config.json");
    fs::write(&json, r#"{"Server": {"Addr": "0.0.0.0", "Port": 8080}, "Directory": "public"}"#)
        .expect("write json");

    let mut cmd = configer();
    cmd.env("SERVER_PORT", "9090").args(["--sample", "file-server", "-c"]).arg(&json);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"addr\": \"0.0.0.0\""))
        .stdout(predicate::str::contains("\"port\": 9090"))
        .stdout(predicate::str::contains("\"directory\": \"public\""));
}

#[test]
fn test_file_server_sample_requires_addr() {
    let mut cmd = configer();
    cmd.env("DIRECTORY", "public").args(["--sample", "file-server"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("missing required config variable \"SERVER_ADDR\""));
}

#[test]
fn test_file_server_sample_rejects_out_of_range_port() {
    let mut cmd = configer();
    cmd.env("SERVER_ADDR", "127.0.0.1")
        .env("DIRECTORY", "public")
        .env("SERVER_PORT", "70000")
        .args(["--sample", "file-server"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("\"SERVER_PORT\" must be between 1 and 65535"));
}
