// crates/kraton-golden/src/layout.rs
// ============================================================================
// Module: Module Layout
// Description: Path conventions shared with the surrounding build tooling.
// Purpose: Derive generated and golden tree roots for a language module.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A Kraton project keeps one directory per language module under
//! `<root>/modules/lang-<id>`. The generator writes into the module's build
//! directory and golden files live with the module's integration test
//! sources. These locations are a contract with the build, so every segment
//! comes from [`ProjectConfig`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::GoldenError;
use crate::config::ProjectConfig;

// ============================================================================
// SECTION: Layout
// ============================================================================

/// Resolved directories for one language module.
///
/// # Invariants
/// - `module` is a validated identifier (see [`validate_module_id`]).
/// - All roots are below `module_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLayout {
    /// Module identifier without prefix.
    module: String,
    /// Module directory.
    module_dir: PathBuf,
    /// Directory the generator writes to.
    actual_root: PathBuf,
    /// Directory holding golden files.
    expected_root: PathBuf,
    /// Directory whose presence marks a module with integration tests.
    integration_dir: PathBuf,
}

impl ModuleLayout {
    /// Derives the layout of `module` inside `project_root`.
    ///
    /// # Errors
    ///
    /// Returns [`GoldenError::Layout`] when the module identifier is invalid.
    pub fn new(
        project_root: &Path,
        module: &str,
        project: &ProjectConfig,
    ) -> Result<Self, GoldenError> {
        validate_module_id(module)?;
        let module_dir = project_root
            .join(&project.modules_dir)
            .join(format!("{}{module}", project.module_prefix));
        Ok(Self {
            module: module.to_string(),
            actual_root: module_dir.join(&project.build_dir).join(&project.generated_output_dir),
            expected_root: module_dir.join(&project.expected_dir),
            integration_dir: module_dir.join(&project.integration_dir),
            module_dir,
        })
    }

    /// Returns the module identifier.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Returns the module directory.
    #[must_use]
    pub fn module_dir(&self) -> &Path {
        &self.module_dir
    }

    /// Returns the generated output root.
    #[must_use]
    pub fn actual_root(&self) -> &Path {
        &self.actual_root
    }

    /// Returns the golden file root.
    #[must_use]
    pub fn expected_root(&self) -> &Path {
        &self.expected_root
    }

    /// Returns true when the module carries integration tests.
    #[must_use]
    pub fn holds_integration_tests(&self) -> bool {
        self.integration_dir.is_dir()
    }
}

// ============================================================================
// SECTION: Module Discovery
// ============================================================================

/// Lists the modules of a project that carry integration tests.
///
/// Identifiers are returned without the module prefix, sorted ascending.
///
/// # Errors
///
/// Returns [`GoldenError::Io`] when the modules directory cannot be listed.
pub fn discover_modules(
    project_root: &Path,
    project: &ProjectConfig,
) -> Result<Vec<String>, GoldenError> {
    let modules_dir = project_root.join(&project.modules_dir);
    let entries = fs::read_dir(&modules_dir)
        .map_err(|err| GoldenError::Io(format!("{}: {err}", modules_dir.display())))?;
    let mut modules = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| GoldenError::Io(err.to_string()))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(module) = name.strip_prefix(&project.module_prefix) else {
            continue;
        };
        if validate_module_id(module).is_err() {
            continue;
        }
        let layout = ModuleLayout::new(project_root, module, project)?;
        if layout.module_dir().is_dir() && layout.holds_integration_tests() {
            modules.push(module.to_string());
        }
    }
    modules.sort();
    Ok(modules)
}

/// Validates a module identifier.
///
/// # Errors
///
/// Returns [`GoldenError::Layout`] when the identifier is empty or could
/// escape the modules directory.
pub fn validate_module_id(module: &str) -> Result<(), GoldenError> {
    if module.trim().is_empty() {
        return Err(GoldenError::Layout("module identifier is empty".to_string()));
    }
    if module.contains(['/', '\\']) || module == "." || module.contains("..") {
        return Err(GoldenError::Layout(format!("invalid module identifier: {module}")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
