// crates/kraton-golden-cli/tests/check_command.rs
// ============================================================================
// Module: CLI Check Command Tests
// Description: Integration tests for the check and list subcommands.
// Purpose: Ensure failures surface in output, exit codes, and reports.
// Dependencies: kraton-golden binary, serde_json, tempfile
// ============================================================================

//! ## Overview
//! Builds a small module tree on disk, runs the CLI binary against it, and
//! checks per-case output lines, the exit status, and the JSON report.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn kraton_golden_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_kraton-golden"))
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
    fs::write(path, content).expect("write file");
}

/// Creates a project with one language module and a quiet config file.
fn project(generated: &[(&str, &str)], golden: &[(&str, &str)]) -> TempDir {
    let temp = tempfile::tempdir().expect("temp dir");
    let module = temp.path().join("modules/lang-java");
    for (name, content) in generated {
        write(&module.join("build/kraton/generated").join(name), content);
    }
    for (name, content) in golden {
        write(&module.join("src/test-integration/resources").join(name), content);
    }
    fs::create_dir_all(module.join("src/test-integration")).expect("integration dir");
    write(&temp.path().join("kraton-golden.toml"), "[logging]\nsink = \"none\"\n");
    temp
}

fn run(project: &Path, args: &[&str]) -> Output {
    Command::new(kraton_golden_bin())
        .args(args)
        .arg("--project-root")
        .arg(project)
        .arg("--config")
        .arg(project.join("kraton-golden.toml"))
        .env_remove("KRATON_GOLDEN_CONFIG")
        .current_dir(project)
        .output()
        .expect("run kraton-golden")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Verifies matching trees pass and exit successfully.
#[test]
fn check_passes_for_matching_trees() {
    let temp = project(&[("Foo.java", "class Foo {}\n")], &[("Foo.java", "class Foo {}\r\n")]);
    let output = run(temp.path(), &["check"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "unexpected stdout: {stdout}");
    assert!(stdout.contains("ok java/Foo.java"), "unexpected stdout: {stdout}");
    assert!(stdout.contains("1 passed, 0 failed, 1 total"), "unexpected stdout: {stdout}");
}

/// Verifies mismatches fail the run and are reported per case.
#[test]
fn check_fails_and_names_each_failure() {
    let temp = project(
        &[("Foo.java", "class Foo {}\n"), ("Extra.java", "extra\n")],
        &[("Foo.java", "class Bar {}\n"), ("Gone.java", "gone\n")],
    );
    let output = run(temp.path(), &["check"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!output.status.success());
    assert!(
        stdout.contains(
            "FAILED java/Foo.java: Line 1 of output file 'Foo.java' does not match the expected result (first difference at column 7)."
        ),
        "unexpected stdout: {stdout}"
    );
    assert!(
        stdout.contains("FAILED java/Extra.java: The output file 'Extra.java' was generated unexpectedly."),
        "unexpected stdout: {stdout}"
    );
    assert!(
        stdout.contains(
            "FAILED java/Gone.java: The expected output file 'Gone.java' has not been generated."
        ),
        "unexpected stdout: {stdout}"
    );
    assert!(stdout.contains("0 passed, 3 failed, 3 total"), "unexpected stdout: {stdout}");
}

/// Verifies a module that never generated output reports the sentinel case.
#[test]
fn check_reports_missing_output_directory() {
    let temp = project(&[], &[("Foo.java", "foo\n")]);
    let output = run(temp.path(), &["check", "--module", "java"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!output.status.success());
    assert!(stdout.contains("FAILED java/NoTestOutputDir: "), "unexpected stdout: {stdout}");
    assert!(stdout.contains("does not exist!"), "unexpected stdout: {stdout}");
}

/// Verifies the JSON report mirrors the printed outcome.
#[test]
fn check_writes_json_report() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project(
        &[("Foo.java", "foo\n"), ("Extra.java", "extra\n")],
        &[("Foo.java", "foo\n")],
    );
    let report_path = temp.path().join("out/report.json");
    let report_arg = report_path.to_string_lossy().into_owned();
    let output = run(temp.path(), &["check", "--report", &report_arg]);
    assert!(!output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&fs::read(&report_path)?)?;
    assert_eq!(report["summary"]["total"], 2);
    assert_eq!(report["summary"]["passed"], 1);
    assert_eq!(report["summary"]["failed"], 1);
    let cases = report["suites"][0]["cases"].as_array().expect("cases");
    assert_eq!(report["suites"][0]["module"], "java");
    assert_eq!(cases[0]["name"], "Extra.java");
    assert_eq!(cases[0]["classification"], "unexpected");
    assert_eq!(cases[0]["status"], "failed");
    assert_eq!(cases[1]["name"], "Foo.java");
    assert_eq!(cases[1]["status"], "passed");
    Ok(())
}

/// Verifies list prints classifications without running cases.
#[test]
fn list_prints_classified_cases() {
    let temp = project(
        &[("Foo.java", "foo\n"), ("Extra.java", "extra\n")],
        &[("Foo.java", "different\n"), ("Gone.java", "gone\n")],
    );
    let output = run(temp.path(), &["list"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "unexpected stdout: {stdout}");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "java/Extra.java [unexpected]",
            "java/Foo.java [matched]",
            "java/Gone.java [missing]",
        ]
    );
}

/// Verifies an invalid module id fails before any case runs.
#[test]
fn check_rejects_invalid_module_id() {
    let temp = project(&[("Foo.java", "foo\n")], &[("Foo.java", "foo\n")]);
    let output = run(temp.path(), &["check", "--module", "../escape"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}

/// Verifies an explicitly requested config file must exist.
#[test]
fn check_fails_on_missing_config_file() {
    let temp = tempfile::tempdir().expect("temp dir");
    let output = Command::new(kraton_golden_bin())
        .args(["check", "--config"])
        .arg(temp.path().join("absent.toml"))
        .env_remove("KRATON_GOLDEN_CONFIG")
        .current_dir(temp.path())
        .output()
        .expect("run kraton-golden");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config io error"), "unexpected stderr: {stderr}");
}
