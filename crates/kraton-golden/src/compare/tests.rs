// crates/kraton-golden/src/compare/tests.rs
// ============================================================================
// Module: Line Comparison Unit Tests
// Description: Edge cases for the streaming line comparison.
// Purpose: Pin terminator handling, column reporting, and IO failures.
// Dependencies: kraton-golden, tempfile
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
use std::path::PathBuf;

use tempfile::TempDir;

use super::compare;
use super::first_difference;
use crate::case::CaseFailure;

fn pair(actual: &[u8], expected: &[u8]) -> (TempDir, PathBuf, PathBuf) {
    let temp = tempfile::tempdir().unwrap();
    let actual_path = temp.path().join("actual.txt");
    let expected_path = temp.path().join("expected.txt");
    fs::write(&actual_path, actual).unwrap();
    fs::write(&expected_path, expected).unwrap();
    (temp, actual_path, expected_path)
}

#[test]
fn trailing_newline_does_not_add_a_line() {
    let (_temp, actual, expected) = pair(b"a\nb\n", b"a\nb");
    assert_eq!(compare(&actual, &expected, "x.txt"), Ok(()));
}

#[test]
fn crlf_and_lf_terminators_compare_equal() {
    let (_temp, actual, expected) = pair(b"a\r\nb\r\n", b"a\nb\n");
    assert_eq!(compare(&actual, &expected, "x.txt"), Ok(()));
}

#[test]
fn lone_carriage_return_ends_a_line() {
    let (_temp, actual, expected) = pair(b"a\rb\r", b"a\nb\n");
    assert_eq!(compare(&actual, &expected, "x.txt"), Ok(()));
}

#[test]
fn mixed_terminators_keep_blank_lines() {
    let (_temp, actual, expected) = pair(b"a\r\rb\r\n\nc", b"a\n\nb\n\nc\n");
    assert_eq!(compare(&actual, &expected, "x.txt"), Ok(()));
}

#[test]
fn carriage_return_inside_a_line_splits_it() {
    let (_temp, actual, expected) = pair(b"ab\rc\n", b"abc\n");
    assert_eq!(
        compare(&actual, &expected, "x.txt"),
        Err(CaseFailure::LineMismatch {
            path: "x.txt".to_string(),
            line: 1,
            column: 3,
        })
    );
}

#[test]
fn trailing_whitespace_is_significant() {
    let (_temp, actual, expected) = pair(b"a \nb", b"a\nb");
    assert_eq!(
        compare(&actual, &expected, "x.txt"),
        Err(CaseFailure::LineMismatch {
            path: "x.txt".to_string(),
            line: 1,
            column: 2,
        })
    );
}

#[test]
fn blank_trailing_line_counts_as_a_line() {
    let (_temp, actual, expected) = pair(b"a\n\n", b"a\n");
    assert_eq!(
        compare(&actual, &expected, "x.txt"),
        Err(CaseFailure::MoreLines {
            path: "x.txt".to_string(),
        })
    );
}

#[test]
fn empty_files_match() {
    let (_temp, actual, expected) = pair(b"", b"");
    assert_eq!(compare(&actual, &expected, "empty.txt"), Ok(()));
}

#[test]
fn empty_actual_is_shorter_than_nonempty_expected() {
    let (_temp, actual, expected) = pair(b"", b"package foo;\n");
    assert_eq!(
        compare(&actual, &expected, "Foo.java"),
        Err(CaseFailure::Shorter {
            path: "Foo.java".to_string(),
        })
    );
}

#[test]
fn non_utf8_content_is_compared_bytewise() {
    let (_temp, actual, expected) = pair(&[0xff, 0xfe, b'\n'], &[0xff, 0xfd, b'\n']);
    assert_eq!(
        compare(&actual, &expected, "bin.dat"),
        Err(CaseFailure::LineMismatch {
            path: "bin.dat".to_string(),
            line: 1,
            column: 2,
        })
    );
}

#[test]
fn missing_file_is_an_io_failure() {
    let temp = tempfile::tempdir().unwrap();
    let expected = temp.path().join("expected.txt");
    fs::write(&expected, b"a").unwrap();
    let actual = temp.path().join("gone.txt");
    let result = compare(&actual, &expected, "gone.txt");
    assert!(matches!(result, Err(CaseFailure::Io { ref path, .. }) if path.ends_with("gone.txt")));
}

#[test]
fn first_difference_reports_prefix_length() {
    assert_eq!(first_difference(b"abc", b"abd"), 2);
    assert_eq!(first_difference(b"ab", b"abc"), 2);
    assert_eq!(first_difference(b"", b"x"), 0);
}
