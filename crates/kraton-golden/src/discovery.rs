// crates/kraton-golden/src/discovery.rs
// ============================================================================
// Module: Discovery
// Description: Reconciles generated and golden trees into test cases.
// Purpose: Emit exactly one case per path found in either tree.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Discovery collects both trees into [`FileSet`]s and reconciles them with
//! plain set operations: `actual ∩ expected` is matched, `actual − expected`
//! is unexpected, `expected − actual` is missing. Case order is the generated
//! tree's walk order (matched and unexpected interleaved) followed by the
//! missing paths in the golden tree's walk order.
//!
//! A generated tree that does not exist or cannot be opened produces a single
//! [`crate::NO_OUTPUT_DIR_CASE`] failure instead of an empty list, so the absence
//! shows up in reports.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use crate::case::CaseFailure;
use crate::case::Classification;
use crate::case::TestCase;
use crate::events::EventSink;
use crate::events::HarnessEvent;
use crate::fileset::FileSet;
use crate::fileset::open_root;
use crate::layout::ModuleLayout;

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Paths of both trees split into the three reconciliation buckets.
///
/// # Invariants
/// - Buckets are pairwise disjoint and their union is `actual ∪ expected`.
/// - Each bucket keeps the walk order of the tree it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    /// Paths present in both trees.
    pub matched: Vec<PathBuf>,
    /// Paths present only in the generated tree.
    pub unexpected: Vec<PathBuf>,
    /// Paths present only in the golden tree.
    pub missing: Vec<PathBuf>,
}

impl Classified {
    /// Returns the total number of classified paths.
    #[must_use]
    pub fn total(&self) -> usize {
        self.matched.len() + self.unexpected.len() + self.missing.len()
    }
}

/// Splits both file sets into matched, unexpected, and missing paths.
#[must_use]
pub fn classify(actual: &FileSet, expected: &FileSet) -> Classified {
    let mut classified = Classified::default();
    for (classification, path) in reconcile(actual, expected) {
        let bucket = match classification {
            Classification::Matched => &mut classified.matched,
            Classification::Unexpected => &mut classified.unexpected,
            Classification::Missing => &mut classified.missing,
        };
        bucket.push(path.to_path_buf());
    }
    classified
}

/// Pairs every path of both sets with its classification, in case order.
fn reconcile<'a>(
    actual: &'a FileSet,
    expected: &'a FileSet,
) -> impl Iterator<Item = (Classification, &'a Path)> {
    let from_actual = actual.iter().map(move |path| {
        if expected.contains(path) {
            (Classification::Matched, path)
        } else {
            (Classification::Unexpected, path)
        }
    });
    let from_expected = expected
        .iter()
        .filter(move |path| !actual.contains(path))
        .map(|path| (Classification::Missing, path));
    from_actual.chain(from_expected)
}

// ============================================================================
// SECTION: Discovery
// ============================================================================

/// Discovers the test cases for one generated tree and its golden tree.
///
/// A golden tree that cannot be walked is logged and treated as empty.
#[must_use]
pub fn discover(actual_root: &Path, expected_root: &Path, sink: &dyn EventSink) -> Vec<TestCase> {
    let actual_dir = match open_root(actual_root) {
        Ok(dir) => dir,
        Err(err) => {
            let path = std::path::absolute(actual_root)
                .unwrap_or_else(|_| actual_root.to_path_buf())
                .display()
                .to_string();
            let failure = if err.kind() == ErrorKind::NotFound {
                CaseFailure::OutputDirMissing {
                    path,
                }
            } else {
                CaseFailure::OutputDirInaccessible {
                    path,
                    message: err.to_string(),
                }
            };
            return vec![TestCase::setup_failure(failure)];
        }
    };
    let actual = FileSet::collect_from(actual_root, &actual_dir, sink);
    drop(actual_dir);
    let expected = FileSet::collect(expected_root, sink);

    reconcile(&actual, &expected)
        .map(|(classification, path)| {
            TestCase::file(classification, path, actual_root, expected_root)
        })
        .collect()
}

// ============================================================================
// SECTION: Module Suites
// ============================================================================

/// Test cases discovered for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSuite {
    /// Module identifier.
    pub module: String,
    /// Cases in discovery order.
    pub cases: Vec<TestCase>,
}

impl ModuleSuite {
    /// Returns true when the module has nothing to test.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Counts cases with the given classification.
    #[must_use]
    pub fn count(&self, classification: Classification) -> usize {
        self.cases.iter().filter(|case| case.classification() == Some(classification)).count()
    }

    /// Returns true when discovery produced the setup-failure sentinel.
    #[must_use]
    pub fn has_setup_failure(&self) -> bool {
        self.cases.iter().any(|case| case.classification().is_none())
    }
}

/// Discovers the test cases of a module.
///
/// Modules without integration tests yield an empty suite.
#[must_use]
pub fn discover_module(layout: &ModuleLayout, sink: &dyn EventSink) -> ModuleSuite {
    let module = layout.module().to_string();
    if !layout.holds_integration_tests() {
        return ModuleSuite {
            module,
            cases: Vec::new(),
        };
    }
    let cases = discover(layout.actual_root(), layout.expected_root(), sink);
    let suite = ModuleSuite {
        module,
        cases,
    };
    sink.record(&HarnessEvent::discovery_complete(
        &suite.module,
        suite.count(Classification::Matched),
        suite.count(Classification::Unexpected),
        suite.count(Classification::Missing),
    ));
    suite
}

// ============================================================================
// SECTION: Tests
// ============================================================================
