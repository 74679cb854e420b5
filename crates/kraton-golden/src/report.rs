// crates/kraton-golden/src/report.rs
// ============================================================================
// Module: Run Reports
// Description: Execution of module suites and aggregated results.
// Purpose: Run every case once and persist a deterministic JSON report.
// Dependencies: serde, serde_jcs
// ============================================================================

//! ## Overview
//! [`run_suite`] executes each case of a [`ModuleSuite`] exactly once and
//! keeps one [`CaseResult`] per case, in discovery order. A [`RunReport`]
//! aggregates suites and is written as canonical JSON so reports from two
//! runs over the same trees are byte-identical.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::GoldenError;
use crate::case::Classification;
use crate::discovery::ModuleSuite;
use crate::events::EventSink;
use crate::events::HarnessEvent;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome of one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// The case passed.
    Passed,
    /// The case failed.
    Failed,
}

/// Result of one executed case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseResult {
    /// Case display name.
    pub name: String,
    /// Classification, absent for setup failures.
    pub classification: Option<Classification>,
    /// Case outcome.
    pub status: CaseStatus,
    /// Failure message when the case failed.
    pub message: Option<String>,
}

/// Results for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Module identifier.
    pub module: String,
    /// Case results in discovery order.
    pub cases: Vec<CaseResult>,
}

impl SuiteReport {
    /// Returns the failed cases.
    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> {
        self.cases.iter().filter(|case| case.status == CaseStatus::Failed)
    }
}

/// Pass/fail totals across all suites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of executed cases.
    pub total: usize,
    /// Number of passed cases.
    pub passed: usize,
    /// Number of failed cases.
    pub failed: usize,
}

/// Aggregated report of a harness run.
///
/// # Invariants
/// - `summary` always reflects the cases in `suites`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Per-module results, in execution order.
    pub suites: Vec<SuiteReport>,
    /// Totals across all suites.
    pub summary: RunSummary,
}

impl RunReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a suite and updates the summary.
    pub fn push(&mut self, suite: SuiteReport) {
        for case in &suite.cases {
            self.summary.total += 1;
            match case.status {
                CaseStatus::Passed => self.summary.passed += 1,
                CaseStatus::Failed => self.summary.failed += 1,
            }
        }
        self.suites.push(suite);
    }

    /// Returns true when no case failed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.summary.failed == 0
    }

    /// Serializes the report as canonical JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns [`GoldenError::Report`] when serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, GoldenError> {
        let mut bytes =
            serde_jcs::to_vec(self).map_err(|err| GoldenError::Report(err.to_string()))?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Writes the report to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`GoldenError`] when serialization or the write fails.
    pub fn write_json(&self, path: &Path) -> Result<(), GoldenError> {
        let bytes = self.to_json_bytes()?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| GoldenError::Io(err.to_string()))?;
        }
        fs::write(path, bytes).map_err(|err| GoldenError::Io(format!("{}: {err}", path.display())))
    }
}

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Runs every case of `suite` once.
#[must_use]
pub fn run_suite(suite: &ModuleSuite, sink: &dyn EventSink) -> SuiteReport {
    let mut cases = Vec::with_capacity(suite.cases.len());
    for case in &suite.cases {
        let message = case.run().err().map(|failure| failure.to_string());
        sink.record(&HarnessEvent::case_finished(
            &suite.module,
            case.name(),
            case.classification(),
            message.clone(),
        ));
        cases.push(CaseResult {
            name: case.name().to_string(),
            classification: case.classification(),
            status: if message.is_some() { CaseStatus::Failed } else { CaseStatus::Passed },
            message,
        });
    }
    SuiteReport {
        module: suite.module.clone(),
        cases,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
