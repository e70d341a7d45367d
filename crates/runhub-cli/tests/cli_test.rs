use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FIXTURE: &str = r#"
users:
  - user_name: alice
    token: t-alice
projects:
  - name: main
    repos:
      - repo_id: trainer
        repo_info:
          repo_type: local
          repo_dir: /work/trainer
        runs:
          - run_name: wild-cat-1
            status: running
            submitted_at: 1678786013000
          - run_name: brave-fox-3
            status: done
            submitted_at: 1678786013000
"#;

fn fixture_file(tmp: &TempDir) -> std::path::PathBuf {
    let path = tmp.path().join("hub.yaml");
    std::fs::write(&path, FIXTURE).unwrap();
    path
}

#[test]
fn test_help() {
    Command::cargo_bin("runhub")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_check_summarises_fixture() {
    let tmp = TempDir::new().unwrap();
    let path = fixture_file(&tmp);
    Command::cargo_bin("runhub")
        .unwrap()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 user(s), 1 project(s), 2 run(s)"))
        .stdout(predicate::str::contains("trainer"));
}

#[test]
fn test_check_rejects_broken_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.yaml");
    std::fs::write(&path, "projects: [").unwrap();
    Command::cargo_bin("runhub")
        .unwrap()
        .arg("check")
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn test_runs_lists_available_actions() {
    let tmp = TempDir::new().unwrap();
    let path = fixture_file(&tmp);
    Command::cargo_bin("runhub")
        .unwrap()
        .args(["runs"])
        .arg(&path)
        .args(["--project", "main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Abort, Stop"))
        .stdout(predicate::str::contains("Delete"));
}

#[test]
fn test_runs_unknown_project() {
    let tmp = TempDir::new().unwrap();
    let path = fixture_file(&tmp);
    Command::cargo_bin("runhub")
        .unwrap()
        .args(["runs"])
        .arg(&path)
        .args(["--project", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project not found"));
}
