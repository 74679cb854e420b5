// crates/kraton-golden/src/fileset.rs
// ============================================================================
// Module: File Sets
// Description: Recursive collection of regular files relative to a root.
// Purpose: Build the actual and expected path sets for reconciliation.
// Dependencies: cap-std
// ============================================================================

//! ## Overview
//! A [`FileSet`] is every regular file below a root, stored as a path
//! relative to that root. Paths keep their raw file names, so names that are
//! not valid UTF-8 still resolve against either root; [`display_name`] turns
//! one into the `/`-separated case name.
//!
//! Directories are opened through capability handles. A symlink whose target
//! is a regular file counts as that file; symlinked directories are recorded
//! as skipped and never entered, so the walk cannot cycle. Entries are visited
//! in file-name order, which makes the walk order (and every case list
//! derived from it) deterministic.
//!
//! IO problems below the root are reported through the [`EventSink`] and the
//! walk continues with the remaining entries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use cap_std::fs::DirEntry;

use crate::events::EventSink;
use crate::events::HarnessEvent;

// ============================================================================
// SECTION: File Set
// ============================================================================

/// Relative file paths collected from one tree, in walk order.
///
/// # Invariants
/// - Each path appears once; `paths` and `index` hold the same entries.
/// - Paths are relative and never contain `..` components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    /// Paths in walk order.
    paths: Vec<PathBuf>,
    /// Membership index.
    index: BTreeSet<PathBuf>,
}

impl FileSet {
    /// Walks `root` and collects every regular file below it.
    ///
    /// A root that cannot be opened yields an empty set and one `walk_error`
    /// event.
    #[must_use]
    pub fn collect(root: &Path, sink: &dyn EventSink) -> Self {
        match open_root(root) {
            Ok(dir) => Self::collect_from(root, &dir, sink),
            Err(err) => {
                sink.record(&HarnessEvent::walk_error(root, Path::new(""), &err));
                Self::default()
            }
        }
    }

    /// Walks an already opened root directory.
    pub(crate) fn collect_from(root: &Path, dir: &Dir, sink: &dyn EventSink) -> Self {
        let mut set = Self::default();
        let mut walker = Walker {
            root,
            sink,
            set: &mut set,
        };
        walker.walk(dir, Path::new(""));
        set
    }

    /// Builds a set from explicit relative paths, keeping first occurrences.
    #[must_use]
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut set = Self::default();
        for path in paths {
            set.insert(path.into());
        }
        set
    }

    /// Returns true when `path` is part of the set.
    #[must_use]
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.index.contains(path.as_ref())
    }

    /// Iterates paths in walk order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    /// Returns the number of paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true when the set holds no paths.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Adds a path unless it is already present.
    fn insert(&mut self, path: PathBuf) {
        if self.index.insert(path.clone()) {
            self.paths.push(path);
        }
    }
}

/// Returns the `/`-separated display name of a relative path.
///
/// Bytes that are not valid UTF-8 are replaced with `U+FFFD`.
#[must_use]
pub fn display_name(relative: &Path) -> String {
    let parts: Vec<_> =
        relative.components().map(|component| component.as_os_str().to_string_lossy()).collect();
    parts.join("/")
}

/// Opens a tree root through the ambient filesystem.
pub(crate) fn open_root(root: &Path) -> io::Result<Dir> {
    Dir::open_ambient_dir(root, ambient_authority())
}

// ============================================================================
// SECTION: Walker
// ============================================================================

/// Recursive walk state.
struct Walker<'a> {
    /// Root path, for events.
    root: &'a Path,
    /// Event destination.
    sink: &'a dyn EventSink,
    /// Set under construction.
    set: &'a mut FileSet,
}

impl Walker<'_> {
    /// Visits every entry of `dir`, whose path relative to the root is `prefix`.
    fn walk(&mut self, dir: &Dir, prefix: &Path) {
        let entries = match dir.entries() {
            Ok(entries) => entries,
            Err(err) => {
                self.walk_error(prefix, &err);
                return;
            }
        };
        let mut children: Vec<(PathBuf, DirEntry)> = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => children.push((prefix.join(entry.file_name()), entry)),
                Err(err) => self.walk_error(prefix, &err),
            }
        }
        children.sort_by(|lhs, rhs| lhs.0.cmp(&rhs.0));

        for (relative, entry) in children {
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    self.walk_error(&relative, &err);
                    continue;
                }
            };
            if file_type.is_symlink() {
                self.visit_symlink(relative);
            } else if file_type.is_dir() {
                match entry.open_dir() {
                    Ok(child) => self.walk(&child, &relative),
                    Err(err) => self.walk_error(&relative, &err),
                }
            } else if file_type.is_file() {
                self.set.insert(relative);
            } else {
                self.skip(&relative, "not_regular_file");
            }
        }
    }

    /// Keeps a symlink when its target is a regular file.
    ///
    /// Targets may live outside the walked tree, so the link is resolved
    /// against the ambient filesystem.
    fn visit_symlink(&mut self, relative: PathBuf) {
        match fs::metadata(self.root.join(&relative)) {
            Ok(metadata) if metadata.is_file() => self.set.insert(relative),
            Ok(metadata) if metadata.is_dir() => self.skip(&relative, "symlinked_directory"),
            Ok(_) => self.skip(&relative, "not_regular_file"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                self.skip(&relative, "dangling_symlink");
            }
            Err(err) => self.walk_error(&relative, &err),
        }
    }

    /// Records a walk error for `relative`.
    fn walk_error(&self, relative: &Path, err: &io::Error) {
        self.sink.record(&HarnessEvent::walk_error(self.root, relative, err));
    }

    /// Records a skipped entry.
    fn skip(&self, relative: &Path, reason: &'static str) {
        self.sink.record(&HarnessEvent::entry_skipped(self.root, relative, reason));
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
