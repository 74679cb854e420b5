// crates/kraton-golden/src/case.rs
// ============================================================================
// Module: Test Cases
// Description: Named, independently executable golden-file test cases.
// Purpose: Carry one classified path (or setup failure) to execution time.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`TestCase`] is constructed once during discovery and run once by
//! whatever drives the suite. Matched cases compare both files on disk when
//! run; every other kind fails with a message fixed at discovery time and
//! performs no IO.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::compare::compare;
use crate::fileset::display_name;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Display name of the case emitted when the generated tree is unusable.
pub const NO_OUTPUT_DIR_CASE: &str = "NoTestOutputDir";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Bucket a relative path falls into after reconciling both trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Present in both trees.
    Matched,
    /// Present only in the generated tree.
    Unexpected,
    /// Present only in the golden tree.
    Missing,
}

impl Classification {
    /// Returns the stable label for this classification.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::Unexpected => "unexpected",
            Self::Missing => "missing",
        }
    }
}

/// Reason a case failed.
///
/// # Invariants
/// - `Display` output is the human-readable failure message for reports.
/// - Content and structural variants carry the case's relative path; setup
///   and IO variants carry the filesystem path that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaseFailure {
    /// A line differs between generated and golden file.
    #[error(
        "Line {line} of output file '{path}' does not match the expected result (first difference at column {column})."
    )]
    LineMismatch {
        /// Relative file path.
        path: String,
        /// 1-based line number.
        line: usize,
        /// 1-based byte column of the first difference.
        column: usize,
    },
    /// The generated file continues past the end of the golden file.
    #[error("The output file '{path}' contains more lines than expected.")]
    MoreLines {
        /// Relative file path.
        path: String,
    },
    /// The generated file ends before the golden file does.
    #[error("The output file '{path}' is shorter than expected.")]
    Shorter {
        /// Relative file path.
        path: String,
    },
    /// The file exists only in the generated tree.
    #[error("The output file '{path}' was generated unexpectedly.")]
    Unexpected {
        /// Relative file path.
        path: String,
    },
    /// The file exists only in the golden tree.
    #[error("The expected output file '{path}' has not been generated.")]
    Missing {
        /// Relative file path.
        path: String,
    },
    /// The generated output directory does not exist.
    #[error("{path} does not exist!")]
    OutputDirMissing {
        /// Absolute path of the missing directory.
        path: String,
    },
    /// The generated output directory exists but cannot be read.
    #[error("{path} is not accessible: {message}")]
    OutputDirInaccessible {
        /// Path of the unreadable directory.
        path: String,
        /// IO error text.
        message: String,
    },
    /// A file could not be read while comparing.
    #[error("failed to read '{path}': {message}")]
    Io {
        /// Path of the unreadable file.
        path: String,
        /// IO error text.
        message: String,
    },
}

/// What a case checks when it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CaseSubject {
    /// A relative path classified against both trees.
    File {
        /// Reconciliation bucket.
        classification: Classification,
        /// Candidate location in the generated tree.
        actual: PathBuf,
        /// Candidate location in the golden tree.
        expected: PathBuf,
    },
    /// Discovery could not inspect the generated tree.
    Setup(CaseFailure),
}

/// Named golden-file test case.
///
/// # Invariants
/// - `name` is the `/`-separated relative path, or [`NO_OUTPUT_DIR_CASE`].
/// - Running a case never mutates either tree.
///
/// # Examples
/// ```
/// use kraton_golden::Classification;
/// use kraton_golden::TestCase;
///
/// let case = TestCase::file(Classification::Missing, "Foo.java", "out", "golden");
/// let err = case.run().unwrap_err();
/// assert_eq!(err.to_string(), "The expected output file 'Foo.java' has not been generated.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Display name.
    name: String,
    /// Work performed by `run`.
    subject: CaseSubject,
}

impl TestCase {
    /// Creates a case for `relative` resolved against both tree roots.
    ///
    /// The case name is the `/`-separated display form of `relative`.
    #[must_use]
    pub fn file(
        classification: Classification,
        relative: impl AsRef<Path>,
        actual_root: impl AsRef<Path>,
        expected_root: impl AsRef<Path>,
    ) -> Self {
        let relative = relative.as_ref();
        Self {
            name: display_name(relative),
            subject: CaseSubject::File {
                classification,
                actual: actual_root.as_ref().join(relative),
                expected: expected_root.as_ref().join(relative),
            },
        }
    }

    /// Creates the sentinel case for a generated tree that cannot be walked.
    #[must_use]
    pub fn setup_failure(failure: CaseFailure) -> Self {
        Self {
            name: NO_OUTPUT_DIR_CASE.to_string(),
            subject: CaseSubject::Setup(failure),
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the classification, or `None` for the setup sentinel.
    #[must_use]
    pub const fn classification(&self) -> Option<Classification> {
        match &self.subject {
            CaseSubject::File {
                classification, ..
            } => Some(*classification),
            CaseSubject::Setup(_) => None,
        }
    }

    /// Returns the candidate generated and golden paths for file cases.
    #[must_use]
    pub fn paths(&self) -> Option<(&Path, &Path)> {
        match &self.subject {
            CaseSubject::File {
                actual,
                expected,
                ..
            } => Some((actual.as_path(), expected.as_path())),
            CaseSubject::Setup(_) => None,
        }
    }

    /// Executes the case.
    ///
    /// # Errors
    ///
    /// Returns [`CaseFailure`] describing why the case failed.
    pub fn run(&self) -> Result<(), CaseFailure> {
        match &self.subject {
            CaseSubject::File {
                classification: Classification::Matched,
                actual,
                expected,
            } => compare(actual, expected, &self.name),
            CaseSubject::File {
                classification: Classification::Unexpected,
                ..
            } => Err(CaseFailure::Unexpected {
                path: self.name.clone(),
            }),
            CaseSubject::File {
                classification: Classification::Missing,
                ..
            } => Err(CaseFailure::Missing {
                path: self.name.clone(),
            }),
            CaseSubject::Setup(failure) => Err(failure.clone()),
        }
    }
}
