// crates/kraton-golden/src/compare.rs
// ============================================================================
// Module: Line Comparison
// Description: Streaming, line-exact comparison of generated vs golden files.
// Purpose: Report the first diverging line or the length asymmetry.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Both files are read in lockstep through buffered readers. Lines are raw
//! bytes, so files need not be UTF-8 and nothing is normalized beyond the
//! line terminator itself (`\n`, `\r\n`, or a lone `\r`). Readers live only for the
//! duration of one call and are dropped on every return path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use crate::case::CaseFailure;

// ============================================================================
// SECTION: Comparison
// ============================================================================

/// Compares a generated file against its golden counterpart.
///
/// `name` is the relative path used in failure messages.
///
/// # Errors
///
/// Returns [`CaseFailure::LineMismatch`] for the first differing line,
/// [`CaseFailure::MoreLines`] or [`CaseFailure::Shorter`] when only the line
/// counts differ, and [`CaseFailure::Io`] when either file cannot be read.
pub fn compare(actual_file: &Path, expected_file: &Path, name: &str) -> Result<(), CaseFailure> {
    let mut actual = LineReader::open(actual_file)?;
    let mut expected = LineReader::open(expected_file)?;
    let mut line = 0_usize;

    loop {
        let Some(actual_line) = actual.next_line()? else {
            break;
        };
        let Some(expected_line) = expected.next_line()? else {
            return Err(CaseFailure::MoreLines {
                path: name.to_string(),
            });
        };
        line += 1;
        if actual_line != expected_line {
            return Err(CaseFailure::LineMismatch {
                path: name.to_string(),
                line,
                column: first_difference(actual_line, expected_line) + 1,
            });
        }
    }

    if expected.next_line()?.is_some() {
        return Err(CaseFailure::Shorter {
            path: name.to_string(),
        });
    }
    Ok(())
}

/// Returns the 0-based byte index where two distinct lines diverge.
fn first_difference(lhs: &[u8], rhs: &[u8]) -> usize {
    lhs.iter().zip(rhs).position(|(l, r)| l != r).unwrap_or_else(|| lhs.len().min(rhs.len()))
}

// ============================================================================
// SECTION: Line Reader
// ============================================================================

/// Buffered reader yielding raw lines without their terminator.
///
/// A line ends at `\n`, `\r\n`, or a lone `\r`.
struct LineReader {
    /// Source path, kept for error messages.
    path: String,
    /// Buffered file handle.
    reader: BufReader<File>,
    /// Reused line buffer.
    buffer: Vec<u8>,
    /// The previous line ended in `\r`; a leading `\n` belongs to it.
    after_cr: bool,
}

impl LineReader {
    /// Opens `path` for line reading.
    fn open(path: &Path) -> Result<Self, CaseFailure> {
        let display = path.display().to_string();
        let file = File::open(path).map_err(|err| io_failure(&display, &err))?;
        Ok(Self {
            path: display,
            reader: BufReader::new(file),
            buffer: Vec::new(),
            after_cr: false,
        })
    }

    /// Reads the next line, or `None` at end of file.
    fn next_line(&mut self) -> Result<Option<&[u8]>, CaseFailure> {
        self.buffer.clear();
        let mut started = false;
        loop {
            let available = self.reader.fill_buf().map_err(|err| io_failure(&self.path, &err))?;
            if available.is_empty() {
                return Ok(started.then_some(self.buffer.as_slice()));
            }
            if self.after_cr {
                self.after_cr = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }
            started = true;
            match available.iter().position(|byte| matches!(byte, b'\n' | b'\r')) {
                Some(end) => {
                    self.after_cr = available[end] == b'\r';
                    self.buffer.extend_from_slice(&available[..end]);
                    self.reader.consume(end + 1);
                    return Ok(Some(self.buffer.as_slice()));
                }
                None => {
                    let consumed = available.len();
                    self.buffer.extend_from_slice(available);
                    self.reader.consume(consumed);
                }
            }
        }
    }
}

/// Maps an IO error into a case failure for `path`.
fn io_failure(path: &str, err: &io::Error) -> CaseFailure {
    CaseFailure::Io {
        path: path.to_string(),
        message: err.to_string(),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
