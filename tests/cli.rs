use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PROJECT: &str = "5e9f088b4797476aa0a5d56a";

/// The binary with an isolated config file and no inherited `MCLI_` settings.
fn mongocli(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mongocli").unwrap();
    cmd.env("MCLI_CONFIG_PATH", dir.path().join("config.yaml"))
        .env_remove("MCLI_PUBLIC_API_KEY")
        .env_remove("MCLI_PRIVATE_API_KEY")
        .env_remove("MCLI_PROJECT_ID")
        .env_remove("MCLI_ORG_ID")
        .env_remove("MCLI_LOG");
    cmd
}

fn with_credentials(dir: &TempDir) -> Command {
    let mut cmd = mongocli(dir);
    cmd.env("MCLI_PUBLIC_API_KEY", "public")
        .env("MCLI_PRIVATE_API_KEY", "private");
    cmd
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    mongocli(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("mongocli version: "))
        .stdout(predicate::str::contains("git version: "))
        .stdout(predicate::str::contains("   compiler: rustc"));
}

#[test]
fn test_completion() {
    let dir = TempDir::new().unwrap();
    mongocli(&dir)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mongocli"));

    mongocli(&dir)
        .args(["completion", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported shell type \"tcsh\""));
}

#[test]
fn test_completion_ignores_broken_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.yaml"), "default: [not, a, profile").unwrap();

    mongocli(&dir)
        .args(["completion", "zsh"])
        .assert()
        .success();

    mongocli(&dir)
        .args(["config", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config.yaml"));
}

#[test]
fn test_invalid_cluster_name() {
    let dir = TempDir::new().unwrap();
    with_credentials(&dir)
        .args([
            "atlas", "clusters", "create", "my_cluster", "--provider", "AWS", "--region",
            "US_EAST_1", "--projectId", PROJECT,
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("my_cluster"));
}

#[test]
fn test_missing_credentials() {
    let dir = TempDir::new().unwrap();
    mongocli(&dir)
        .args(["atlas", "clusters", "list", "--projectId", PROJECT])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing credentials"));
}

#[test]
fn test_dry_run_request() {
    let dir = TempDir::new().unwrap();
    with_credentials(&dir)
        .args(["atlas", "clusters", "list", "--projectId", PROJECT])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"atlas clusters list\""))
        .stdout(predicate::str::contains(PROJECT));
}

#[test]
fn test_password_redacted_in_output() {
    let dir = TempDir::new().unwrap();
    with_credentials(&dir)
        .args([
            "atlas", "dbusers", "create", "-u", "admin", "-p", "s3cret", "--role", "backup",
            "--projectId", PROJECT,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[REDACTED]"))
        .stdout(predicate::str::contains("s3cret").not());
}

#[test]
fn test_config_set_then_describe() {
    let dir = TempDir::new().unwrap();
    mongocli(&dir)
        .args(["config", "set", "org_id", "5e9f088b4797476aa0a5d56b", "-P", "work"])
        .assert()
        .success();

    mongocli(&dir)
        .args(["config", "describe", "work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5e9f088b4797476aa0a5d56b"));

    mongocli(&dir)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("work"));
}
