// crates/kraton-golden/src/report/tests.rs
// ============================================================================
// Module: Run Report Unit Tests
// Description: Suite execution, summaries, and report persistence.
// Purpose: Ensure every case runs once and reports stay deterministic.
// Dependencies: kraton-golden, serde_json, tempfile
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::use_debug,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions are permitted."
)]

use std::fs;

use super::CaseStatus;
use super::RunReport;
use super::run_suite;
use crate::case::CaseFailure;
use crate::case::Classification;
use crate::case::TestCase;
use crate::discovery::ModuleSuite;
use crate::events::HarnessEvent;
use crate::events::MemoryEventSink;

fn suite_with_matching_file() -> (tempfile::TempDir, ModuleSuite) {
    let temp = tempfile::tempdir().unwrap();
    let actual = temp.path().join("actual");
    let expected = temp.path().join("expected");
    fs::create_dir_all(&actual).unwrap();
    fs::create_dir_all(&expected).unwrap();
    fs::write(actual.join("Same.java"), b"class Same {}\n").unwrap();
    fs::write(expected.join("Same.java"), b"class Same {}\n").unwrap();
    let suite = ModuleSuite {
        module: "java".to_string(),
        cases: vec![
            TestCase::file(Classification::Matched, "Same.java", &actual, &expected),
            TestCase::file(Classification::Unexpected, "Extra.java", &actual, &expected),
            TestCase::file(Classification::Missing, "Gone.java", &actual, &expected),
        ],
    };
    (temp, suite)
}

#[test]
fn run_suite_records_one_result_and_event_per_case() {
    let (_temp, suite) = suite_with_matching_file();
    let sink = MemoryEventSink::new();
    let report = run_suite(&suite, &sink);

    let statuses: Vec<(&str, CaseStatus)> =
        report.cases.iter().map(|case| (case.name.as_str(), case.status)).collect();
    assert_eq!(
        statuses,
        vec![
            ("Same.java", CaseStatus::Passed),
            ("Extra.java", CaseStatus::Failed),
            ("Gone.java", CaseStatus::Failed),
        ]
    );
    assert_eq!(report.failures().count(), 2);
    let finished = sink
        .events()
        .into_iter()
        .filter(|event| matches!(event, HarnessEvent::CaseFinished { .. }))
        .count();
    assert_eq!(finished, 3);
}

#[test]
fn setup_failures_are_reported_without_classification() {
    let suite = ModuleSuite {
        module: "java".to_string(),
        cases: vec![TestCase::setup_failure(CaseFailure::OutputDirMissing {
            path: "/work/modules/lang-java/build/kraton/generated".to_string(),
        })],
    };
    let report = run_suite(&suite, &MemoryEventSink::new());
    assert_eq!(report.cases.len(), 1);
    assert_eq!(report.cases[0].name, "NoTestOutputDir");
    assert_eq!(report.cases[0].classification, None);
    assert_eq!(
        report.cases[0].message.as_deref(),
        Some("/work/modules/lang-java/build/kraton/generated does not exist!")
    );
}

#[test]
fn summary_tracks_pushed_suites() {
    let (_temp, suite) = suite_with_matching_file();
    let mut report = RunReport::new();
    assert!(report.is_success());
    report.push(run_suite(&suite, &MemoryEventSink::new()));
    report.push(run_suite(
        &ModuleSuite {
            module: "empty".to_string(),
            cases: Vec::new(),
        },
        &MemoryEventSink::new(),
    ));
    assert_eq!(report.summary.total, 3);
    assert_eq!(report.summary.passed, 1);
    assert_eq!(report.summary.failed, 2);
    assert!(!report.is_success());
    assert_eq!(report.suites.len(), 2);
}

#[test]
fn json_report_is_canonical_and_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let (temp, suite) = suite_with_matching_file();
    let mut report = RunReport::new();
    report.push(run_suite(&suite, &MemoryEventSink::new()));

    let path = temp.path().join("reports/nested/golden.json");
    report.write_json(&path)?;
    let first = fs::read(&path)?;
    report.write_json(&path)?;
    assert_eq!(first, fs::read(&path)?);
    assert_eq!(first.last(), Some(&b'\n'));

    let parsed: RunReport = serde_json::from_slice(&first)?;
    assert_eq!(parsed, report);
    Ok(())
}
