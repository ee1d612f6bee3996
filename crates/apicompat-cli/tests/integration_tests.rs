//! Integration tests for the apicompat CLI
//!
//! These tests verify the CLI behavior end-to-end

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const CONTRACT: &str = r#"{
  "identity": { "name": "Contoso", "version": "1.0.0.0" },
  "namespaces": [
    {
      "name": "Contoso",
      "types": [
        {
          "name": "Client",
          "members": [
            {
              "name": "Run",
              "kind": "method",
              "parameters": [
                { "name": "count", "type": { "kind": "named", "name": "System.Int32" } }
              ]
            }
          ]
        },
        { "name": "Server" }
      ]
    }
  ]
}"#;

const IMPLEMENTATION: &str = r#"{
  "identity": { "name": "Contoso", "version": "1.0.0.0" },
  "namespaces": [
    {
      "name": "Contoso",
      "types": [
        {
          "name": "Client",
          "members": [
            {
              "name": "Run",
              "kind": "method",
              "parameters": [
                { "name": "times", "type": { "kind": "named", "name": "System.Int32" } }
              ]
            }
          ]
        }
      ]
    }
  ]
}"#;

const MISSING_SERVER: &str =
    "CP0001 : Type 'Contoso.Server' exists on the contract but not on the implementation";

#[allow(deprecated)]
fn cli() -> Command {
    Command::cargo_bin("apicompat").unwrap()
}

/// Contract under `contract/`, implementation under `impl/`
struct Project {
    dir: TempDir,
}

impl Project {
    fn new(contract: &str, implementation: &str) -> Self {
        let dir = TempDir::new().unwrap();
        for (sub, content) in [("contract", contract), ("impl", implementation)] {
            fs::create_dir(dir.path().join(sub)).unwrap();
            fs::write(dir.path().join(sub).join("Contoso.json"), content).unwrap();
        }
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn contract(&self) -> PathBuf {
        self.path().join("contract")
    }

    fn implementation(&self) -> PathBuf {
        self.path().join("impl")
    }

    fn check(&self) -> Command {
        let mut cmd = cli();
        cmd.current_dir(self.path())
            .arg("--no-color")
            .arg("--left")
            .arg(self.contract())
            .arg("--right")
            .arg(self.implementation());
        cmd
    }
}

#[test]
fn test_help_command() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "compares a contract API surface (left) against an implementation (right)",
        ))
        .stdout(predicate::str::contains("--right-dir"));
}

#[test]
fn test_version_command() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(VERSION));
}

#[test]
fn test_compatible_surfaces_exit_zero() {
    let project = Project::new(CONTRACT, CONTRACT);

    project
        .check()
        .assert()
        .code(0)
        .stdout(predicate::str::contains(
            "'implementation' is compatible with 'contract'",
        ));
}

#[test]
fn test_missing_type_exits_one() {
    let project = Project::new(CONTRACT, IMPLEMENTATION);

    project
        .check()
        .assert()
        .code(1)
        .stdout(predicate::str::contains(MISSING_SERVER))
        .stdout(predicate::str::contains(
            "Found 1 compatibility difference(s) between 'contract' and 'implementation'",
        ));
}

#[test]
fn test_piped_output_is_plain_without_no_color() {
    let project = Project::new(CONTRACT, IMPLEMENTATION);

    let output = cli()
        .current_dir(project.path())
        .env_remove("NO_COLOR")
        .arg("--left")
        .arg(project.contract())
        .arg("--right")
        .arg(project.implementation())
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.starts_with(&format!("{MISSING_SERVER}\n")));
    assert!(!stdout.contains('\u{1b}'));
}

#[test]
fn test_parameter_rename_is_compatible() {
    let project = Project::new(CONTRACT, IMPLEMENTATION);

    project
        .check()
        .assert()
        .stdout(predicate::str::contains("CP0002").not());
}

#[test]
fn test_no_warn_suppresses_diagnostic() {
    let project = Project::new(CONTRACT, IMPLEMENTATION);

    project
        .check()
        .args(["--no-warn", "CP0001"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("(1 suppressed)"));
}

#[test]
fn test_ignore_suppresses_one_difference() {
    let project = Project::new(CONTRACT, IMPLEMENTATION);

    project
        .check()
        .args(["--ignore", "CP0001=T:Contoso.Server"])
        .assert()
        .code(0);
}

#[test]
fn test_invalid_ignore_is_rejected() {
    let project = Project::new(CONTRACT, IMPLEMENTATION);

    project
        .check()
        .args(["--ignore", "CP0001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expected 'ID=MEMBER'"));
}

#[test]
fn test_json_format() {
    let project = Project::new(CONTRACT, IMPLEMENTATION);

    let output = project
        .check()
        .args(["--format", "json"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["id"], "CP0001");
    assert_eq!(parsed[0]["memberId"], "T:Contoso.Server");
}

#[test]
fn test_strict_mode_reports_additions() {
    let project = Project::new(IMPLEMENTATION, CONTRACT);

    project.check().assert().code(0);
    project
        .check()
        .arg("--strict")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "CP0001 : Type 'Contoso.Server' exists on the implementation but not on the contract",
        ));
}

#[test]
fn test_custom_side_names() {
    let project = Project::new(CONTRACT, IMPLEMENTATION);

    project
        .check()
        .args(["--left-name", "v1", "--right-name", "v2"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("between 'v1' and 'v2'"));
}

#[test]
fn test_missing_left_is_an_error() {
    cli()
        .arg("--no-color")
        .args(["--right", "impl"])
        .current_dir(TempDir::new().unwrap().path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("left input is required"));
}

#[test]
fn test_malformed_surface_is_an_error() {
    let project = Project::new(CONTRACT, "{ not json");

    let output = project.check().assert().code(2).get_output().stderr.clone();

    let stderr = String::from_utf8(output).unwrap();
    assert_eq!(stderr.matches("Failed to load the right side").count(), 1);
    assert!(stderr.contains("error: "));
}

#[test]
fn test_config_file_is_discovered() {
    let project = Project::new(CONTRACT, IMPLEMENTATION);
    let config = r#"
{
  "diffing": { "noWarn": "CP0001" },
  "inputs": { "left": ["contract"], "right": ["impl"] }
}
"#;
    fs::write(project.path().join(".apicompatrc.json"), config).unwrap();

    cli()
        .current_dir(project.path())
        .arg("--no-color")
        .assert()
        .code(0);
}

#[test]
fn test_yaml_config_with_ignored_difference() {
    let project = Project::new(CONTRACT, IMPLEMENTATION);
    let config = r#"
diffing:
  ignoredDifferences:
    - diagnosticId: CP0001
      memberId: "T:Contoso.Server"
"#;
    let config_path = project.path().join("apicompat.yaml");
    fs::write(&config_path, config).unwrap();

    project
        .check()
        .arg("--config")
        .arg(&config_path)
        .assert()
        .code(0);
}

#[test]
fn test_explicit_config_must_exist() {
    let project = Project::new(CONTRACT, IMPLEMENTATION);

    project
        .check()
        .args(["--config", "missing.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_right_dir_matches_by_assembly_name() {
    let project = Project::new(CONTRACT, IMPLEMENTATION);

    cli()
        .current_dir(project.path())
        .arg("--no-color")
        .arg("--left")
        .arg(project.contract().join("Contoso.json"))
        .arg("--right-dir")
        .arg(project.implementation())
        .assert()
        .code(1)
        .stdout(predicate::str::contains(MISSING_SERVER));
}

#[test]
fn test_right_dir_without_candidate_reports_missing_assembly() {
    let project = Project::new(CONTRACT, IMPLEMENTATION);
    let empty = project.path().join("empty");
    fs::create_dir(&empty).unwrap();

    cli()
        .current_dir(project.path())
        .arg("--no-color")
        .arg("--left")
        .arg(project.contract())
        .arg("--right-dir")
        .arg(&empty)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "CP0004 : Assembly 'Contoso' exists on the contract but not on the implementation",
        ));
}

#[test]
fn test_identity_validation() {
    let drifted = CONTRACT.replace("1.0.0.0", "2.0.0.0");
    let project = Project::new(CONTRACT, &drifted);

    project.check().assert().code(0);
    project
        .check()
        .arg("--validate-identity")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("CP0003"));
}

#[test]
fn test_list_rules() {
    cli()
        .args(["--no-color", "--list-rules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CP0001"))
        .stdout(predicate::str::contains("MemberMustExist"))
        .stdout(predicate::str::contains("CP0004"));
}

#[test]
fn test_print_config_schema() {
    let output = cli()
        .arg("--print-config-schema")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let schema: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(schema["properties"]["diffing"].is_object());
}

#[test]
fn test_generate_completion() {
    cli()
        .args(["--generate-completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("apicompat"));
}
