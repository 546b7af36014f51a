//! Binary-level behaviour of `pbxpatch`.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PROJECT: &str = include_str!("fixtures/project.pbxproj");
const SUCCESS: &str = "Successfully added GoogleMaps.bundle to the Xcode project!\n";

fn pbxpatch() -> Command {
    Command::cargo_bin("pbxpatch").expect("pbxpatch binary")
}

fn manifest(root: &Path) -> PathBuf {
    root.join("EcoVision.xcodeproj").join("project.pbxproj")
}

fn create_temp_project(contents: &str) -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(td.path().join("EcoVision.xcodeproj")).unwrap();
    fs::write(manifest(td.path()), contents).unwrap();
    td
}

#[test]
fn test_no_args_patches_current_dir() {
    let temp = create_temp_project(PROJECT);

    pbxpatch()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(SUCCESS);

    let written = fs::read_to_string(manifest(temp.path())).unwrap();
    assert_eq!(written.matches("GoogleMaps.bundle in Resources").count(), 2);
    assert!(written.contains("path = EcoVision/GoogleMaps.bundle; sourceTree = SOURCE_ROOT;"));
}

#[test]
fn test_unmatched_manifest_still_reports_success() {
    let temp = create_temp_project("// !$*UTF8*$!\n{\n}\n");

    pbxpatch()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(SUCCESS);

    assert_eq!(
        fs::read_to_string(manifest(temp.path())).unwrap(),
        "// !$*UTF8*$!\n{\n}\n"
    );
}

#[test]
fn test_missing_manifest_fails_without_writing() {
    let temp = tempfile::tempdir().unwrap();

    pbxpatch()
        .current_dir(temp.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("manifest not found"));

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_project_root_flag() {
    let temp = create_temp_project(PROJECT);

    pbxpatch()
        .arg("--project-root")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(SUCCESS);

    assert_ne!(fs::read_to_string(manifest(temp.path())).unwrap(), PROJECT);
}

#[test]
fn test_dry_run_prints_patch_and_keeps_file() {
    let temp = create_temp_project(PROJECT);

    pbxpatch()
        .current_dir(temp.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "diff --git a/EcoVision.xcodeproj/project.pbxproj",
        ))
        .stdout(predicate::str::contains("+\t\t\t\t"))
        .stdout(predicate::str::contains("Successfully").not());

    assert_eq!(fs::read_to_string(manifest(temp.path())).unwrap(), PROJECT);
}

#[test]
fn test_config_file_enables_dry_run() {
    let temp = create_temp_project(PROJECT);
    fs::write(temp.path().join("pbxpatch.toml"), "[run]\ndry_run = true\n").unwrap();

    pbxpatch()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("diff --git"));

    assert_eq!(fs::read_to_string(manifest(temp.path())).unwrap(), PROJECT);
}

#[test]
fn test_invalid_config_fails() {
    let temp = create_temp_project(PROJECT);
    fs::write(temp.path().join("pbxpatch.toml"), "[run\n").unwrap();

    pbxpatch()
        .current_dir(temp.path())
        .assert()
        .failure()
        .code(1);

    assert_eq!(fs::read_to_string(manifest(temp.path())).unwrap(), PROJECT);
}

#[test]
fn test_out_dir_writes_artifacts() {
    let temp = create_temp_project(PROJECT);

    pbxpatch()
        .current_dir(temp.path())
        .arg("--out-dir")
        .arg("artifacts")
        .assert()
        .success()
        .stdout(SUCCESS);

    let out = temp.path().join("artifacts");
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("report.json")).unwrap()).unwrap();
    assert_eq!(report["schema"], "pbxpatch.report.v1");
    assert_eq!(report["summary"]["applied"], 4);
    assert_eq!(report["manifest"]["written"], true);

    let file_ref = report["ids"]["file_ref"].as_str().unwrap();
    let written = fs::read_to_string(manifest(temp.path())).unwrap();
    assert_eq!(written.matches(file_ref).count(), 3);

    assert!(fs::read_to_string(out.join("report.md")).unwrap().contains("# pbxpatch report"));
    assert!(fs::read_to_string(out.join("patch.diff")).unwrap().contains(file_ref));
}

#[test]
fn test_unknown_flag_rejected() {
    pbxpatch().arg("--frobnicate").assert().failure();
}
