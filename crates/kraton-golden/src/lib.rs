// crates/kraton-golden/src/lib.rs
// ============================================================================
// Module: Kraton Golden Library
// Description: Golden-file reconciler for Kraton generator outputs.
// Purpose: Turn actual/expected output trees into per-file test cases.
// Dependencies: cap-std, serde, serde_jcs, serde_json, thiserror, toml
// ============================================================================

//! ## Overview
//! `kraton-golden` checks what a code generator wrote for a module against
//! golden reference files checked into that module. Every file present in
//! either tree becomes exactly one [`TestCase`]:
//!
//! - present in both trees: a line-exact comparison ([`Classification::Matched`]),
//! - present only in the generated tree: [`Classification::Unexpected`],
//! - present only in the golden tree: [`Classification::Missing`].
//!
//! Cases are plain data and can be executed in any order, on any thread.
//! Problems with individual files are reported as case failures; only
//! configuration and report persistence surface as [`GoldenError`].
//!
//! ## Index
//! - Layout: [`ModuleLayout`], [`discover_modules`]
//! - Discovery: [`discover`], [`discover_module`], [`classify`]
//! - Execution: [`TestCase::run`], [`compare`], [`run_suite`]
//! - Ambient: [`HarnessConfig`], [`EventSink`], [`RunReport`]

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod case;
pub mod compare;
pub mod config;
pub mod discovery;
pub mod events;
pub mod fileset;
pub mod layout;
pub mod report;

// ============================================================================
// SECTION: Errors
// ============================================================================

use thiserror::Error;

/// Errors raised outside of individual test cases.
///
/// # Invariants
/// - Per-file mismatches never appear here; they are [`CaseFailure`] values.
#[derive(Debug, Error)]
pub enum GoldenError {
    /// IO failure while persisting harness output.
    #[error("io error: {0}")]
    Io(String),
    /// Report serialization failure.
    #[error("report error: {0}")]
    Report(String),
    /// Module layout could not be derived.
    #[error("layout error: {0}")]
    Layout(String),
    /// Configuration failed to load or validate.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use case::CaseFailure;
pub use case::Classification;
pub use case::NO_OUTPUT_DIR_CASE;
pub use case::TestCase;
pub use compare::compare;
pub use config::ConfigError;
pub use config::HarnessConfig;
pub use config::LoggingConfig;
pub use config::ProjectConfig;
pub use config::SinkKind;
pub use discovery::Classified;
pub use discovery::ModuleSuite;
pub use discovery::classify;
pub use discovery::discover;
pub use discovery::discover_module;
pub use events::EventSink;
pub use events::FileEventSink;
pub use events::HarnessEvent;
pub use events::MemoryEventSink;
pub use events::NoopEventSink;
pub use events::StderrEventSink;
pub use fileset::FileSet;
pub use fileset::display_name;
pub use layout::ModuleLayout;
pub use layout::discover_modules;
pub use report::CaseResult;
pub use report::CaseStatus;
pub use report::RunReport;
pub use report::RunSummary;
pub use report::SuiteReport;
pub use report::run_suite;
