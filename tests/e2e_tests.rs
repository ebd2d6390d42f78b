//! End-to-end tests for the monorelease CLI
//!
//! These tests verify:
//! - Dry-run mode rewrites manifests but runs no external command
//! - Invalid versions abort before any manifest is touched
//! - Exit codes are correct for various scenarios

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Command for the compiled binary
fn monorelease() -> Command {
    Command::new(env!("CARGO_BIN_EXE_monorelease"))
}

fn write_manifest(dir: &Path, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("package.json"), content).unwrap();
}

/// Create a workspace with one public and one private package
fn create_test_workspace() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");

    write_manifest(
        temp_dir.path(),
        r#"{
  "name": "tgtest",
  "version": "1.0.0",
  "private": true,
  "devDependencies": {
    "typescript": "^5.0.0"
  }
}
"#,
    );

    let packages = temp_dir.path().join("packages");
    write_manifest(
        &packages.join("sheet"),
        r#"{
  "name": "tgtest-sheet",
  "version": "1.0.0",
  "dependencies": {
    "tgtest-shared": "1.0.0",
    "lodash": "^4.17.21"
  }
}
"#,
    );
    write_manifest(
        &packages.join("shared"),
        r#"{
  "name": "tgtest-shared",
  "version": "1.0.0",
  "private": true
}
"#,
    );
    fs::write(packages.join("global.d.ts"), "declare const __DEV__: boolean\n").unwrap();

    temp_dir
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

mod dry_run {
    use super::*;

    #[test]
    fn test_dry_run_logs_commands() {
        let ws = create_test_workspace();

        monorelease()
            .args(["1.1.0", "--dry", "--yes", "--no-color", "-C"])
            .arg(ws.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Updating cross dependencies..."))
            .stdout(predicate::str::contains(
                "tgtest-sheet -> dependencies -> tgtest-shared@1.1.0",
            ))
            .stdout(predicate::str::contains("[dryrun] git diff"))
            .stdout(predicate::str::contains("No changes to commit."))
            .stdout(predicate::str::contains(
                "[dryrun] yarn publish --new-version 1.1.0 --access public",
            ))
            .stdout(predicate::str::contains("Skipping private package: shared"))
            .stdout(predicate::str::contains(
                "Dry run finished - run git diff to see package changes.",
            ));
    }

    #[test]
    fn test_dry_run_rewrites_manifests() {
        let ws = create_test_workspace();

        monorelease()
            .args(["1.1.0", "--dry-run", "-y", "--no-color", "-C"])
            .arg(ws.path())
            .assert()
            .success();

        assert_eq!(
            read(&ws.path().join("packages/sheet/package.json")),
            r#"{
  "name": "tgtest-sheet",
  "version": "1.1.0",
  "dependencies": {
    "tgtest-shared": "1.1.0",
    "lodash": "^4.17.21"
  }
}
"#
        );
        assert!(read(&ws.path().join("package.json")).contains("\"version\": \"1.1.0\""));
        assert!(read(&ws.path().join("package.json")).contains("\"typescript\": \"^5.0.0\""));
    }

    #[test]
    fn test_dry_run_infers_beta_tag() {
        let ws = create_test_workspace();

        monorelease()
            .args(["2.0.0-beta.0", "--dry", "--yes", "--no-color", "-C"])
            .arg(ws.path())
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "[dryrun] yarn publish --new-version 2.0.0-beta.0 --tag beta --access public",
            ));
    }

    #[test]
    fn test_dry_run_push() {
        let ws = create_test_workspace();

        monorelease()
            .args(["1.1.0", "--dry", "--yes", "--push", "--no-color", "-C"])
            .arg(ws.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("[dryrun] git tag v1.1.0"))
            .stdout(predicate::str::contains(
                "[dryrun] git push origin refs/tags/v1.1.0",
            ));
    }
}

mod failures {
    use super::*;

    #[test]
    fn test_invalid_version_fails_without_changes() {
        let ws = create_test_workspace();
        let before = read(&ws.path().join("packages/sheet/package.json"));

        monorelease()
            .args(["1.1", "--dry", "--yes", "--no-color", "-C"])
            .arg(ws.path())
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("1.1"));

        assert_eq!(read(&ws.path().join("packages/sheet/package.json")), before);
    }

    #[test]
    fn test_missing_root_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();

        monorelease()
            .args(["1.1.0", "--dry", "--yes", "--no-color", "-C"])
            .arg(temp_dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("package.json"));
    }

    #[test]
    fn test_declined_confirmation() {
        let ws = create_test_workspace();

        monorelease()
            .args(["1.1.0", "--dry", "--no-color", "-C"])
            .arg(ws.path())
            .write_stdin("n\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Releasing v1.1.0. Confirm?"))
            .stdout(predicate::str::contains("[dryrun]").not());

        assert!(read(&ws.path().join("package.json")).contains("\"version\": \"1.0.0\""));
    }
}

mod flags {
    use super::*;

    #[test]
    fn test_print_version() {
        monorelease()
            .arg("--print-version")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("monorelease "));
    }

    #[test]
    fn test_unknown_flag() {
        monorelease().arg("--bogus").assert().failure();
    }
}
