// crates/kraton-golden/src/events.rs
// ============================================================================
// Module: Harness Events
// Description: Structured JSON-lines events for discovery and execution.
// Purpose: Report walk problems and case outcomes without failing the run.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Discovery keeps going when parts of a tree cannot be read; the problems
//! are recorded here instead. Each event is one JSON object per line, tagged
//! by its `event` field. Sinks swallow their own write failures so logging
//! can never change a test outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::case::Classification;
use crate::fileset::display_name;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Event emitted by the harness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HarnessEvent {
    /// A directory or entry could not be read during a walk.
    WalkError {
        /// Event timestamp (milliseconds since epoch).
        timestamp_ms: u128,
        /// Root of the walk.
        root: String,
        /// Path relative to the root, empty for the root itself.
        path: String,
        /// IO error text.
        error: String,
    },
    /// An entry was intentionally left out of a file set.
    EntrySkipped {
        /// Event timestamp (milliseconds since epoch).
        timestamp_ms: u128,
        /// Root of the walk.
        root: String,
        /// Path relative to the root (lossy for non UTF-8 names).
        path: String,
        /// Why the entry was skipped.
        reason: &'static str,
    },
    /// Discovery finished for one module.
    DiscoveryComplete {
        /// Event timestamp (milliseconds since epoch).
        timestamp_ms: u128,
        /// Module identifier.
        module: String,
        /// Paths present in both trees.
        matched: usize,
        /// Paths present only in the generated tree.
        unexpected: usize,
        /// Paths present only in the golden tree.
        missing: usize,
    },
    /// A test case finished executing.
    CaseFinished {
        /// Event timestamp (milliseconds since epoch).
        timestamp_ms: u128,
        /// Module identifier.
        module: String,
        /// Case display name.
        name: String,
        /// Classification, absent for setup failures.
        classification: Option<Classification>,
        /// Whether the case passed.
        passed: bool,
        /// Failure message when the case failed.
        message: Option<String>,
    },
}

impl HarnessEvent {
    /// Builds a walk error event.
    #[must_use]
    pub fn walk_error(root: &Path, path: &Path, error: &io::Error) -> Self {
        Self::WalkError {
            timestamp_ms: now_millis(),
            root: root.display().to_string(),
            path: display_name(path),
            error: error.to_string(),
        }
    }

    /// Builds an entry skipped event.
    #[must_use]
    pub fn entry_skipped(root: &Path, path: &Path, reason: &'static str) -> Self {
        Self::EntrySkipped {
            timestamp_ms: now_millis(),
            root: root.display().to_string(),
            path: display_name(path),
            reason,
        }
    }

    /// Builds a discovery summary event.
    #[must_use]
    pub fn discovery_complete(
        module: &str,
        matched: usize,
        unexpected: usize,
        missing: usize,
    ) -> Self {
        Self::DiscoveryComplete {
            timestamp_ms: now_millis(),
            module: module.to_string(),
            matched,
            unexpected,
            missing,
        }
    }

    /// Builds a case outcome event.
    #[must_use]
    pub fn case_finished(
        module: &str,
        name: &str,
        classification: Option<Classification>,
        message: Option<String>,
    ) -> Self {
        Self::CaseFinished {
            timestamp_ms: now_millis(),
            module: module.to_string(),
            name: name.to_string(),
            classification,
            passed: message.is_none(),
            message,
        }
    }
}

/// Returns the current time in milliseconds since the Unix epoch.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Destination for harness events.
pub trait EventSink: Send + Sync {
    /// Record an event.
    fn record(&self, event: &HarnessEvent);
}

/// Sink that logs JSON lines to stderr.
pub struct StderrEventSink;

impl EventSink for StderrEventSink {
    fn record(&self, event: &HarnessEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Sink that appends JSON lines to a file.
pub struct FileEventSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileEventSink {
    /// Opens the log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl EventSink for FileEventSink {
    fn record(&self, event: &HarnessEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Sink that drops every event.
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn record(&self, _event: &HarnessEvent) {}
}

/// Sink that keeps events in memory for later inspection.
#[derive(Default)]
pub struct MemoryEventSink {
    /// Recorded events in arrival order.
    events: Mutex<Vec<HarnessEvent>>,
}

impl MemoryEventSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<HarnessEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl EventSink for MemoryEventSink {
    fn record(&self, event: &HarnessEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
