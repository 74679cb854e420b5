// crates/kraton-golden/src/config.rs
// ============================================================================
// Module: Harness Configuration
// Description: Configuration loading and validation for the golden harness.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! Configuration is an optional TOML file. An explicitly requested file (flag
//! or environment variable) must exist; when only the default file name is
//! considered and it is absent, built-in defaults apply. Whatever is loaded
//! is validated before use: unknown keys, escaping sub-paths, and oversized
//! files are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::events::EventSink;
use crate::events::FileEventSink;
use crate::events::NoopEventSink;
use crate::events::StderrEventSink;
use crate::layout::validate_module_id;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "kraton-golden.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "KRATON_GOLDEN_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Golden harness configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Project layout configuration.
    #[serde(default)]
    pub project: ProjectConfig,
    /// Event logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Run report configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

impl HarnessConfig {
    /// Loads configuration using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, required) = resolve_path(path)?;
        validate_path(&resolved)?;
        if !required && !resolved.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let bytes = read_bounded(&resolved)?;
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.project.validate()?;
        self.logging.validate()?;
        if let Some(path) = &self.report.path {
            validate_path(path)?;
        }
        Ok(())
    }
}

/// Project layout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project root directory.
    pub root: PathBuf,
    /// Directory under the root holding language modules.
    pub modules_dir: String,
    /// Prefix of language module directory names.
    pub module_prefix: String,
    /// Build directory inside a module.
    pub build_dir: String,
    /// Generator output directory inside the build directory.
    pub generated_output_dir: String,
    /// Golden file directory inside a module.
    pub expected_dir: String,
    /// Directory whose presence marks a module with integration tests.
    pub integration_dir: String,
    /// Modules to check; empty means every module with integration tests.
    pub modules: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            modules_dir: "modules".to_string(),
            module_prefix: "lang-".to_string(),
            build_dir: "build".to_string(),
            generated_output_dir: "kraton/generated".to_string(),
            expected_dir: "src/test-integration/resources".to_string(),
            integration_dir: "src/test-integration".to_string(),
            modules: Vec::new(),
        }
    }
}

impl ProjectConfig {
    /// Validates layout segments and module identifiers.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path(&self.root)?;
        validate_relative_segment("project.modules_dir", &self.modules_dir)?;
        validate_relative_segment("project.build_dir", &self.build_dir)?;
        validate_relative_segment("project.generated_output_dir", &self.generated_output_dir)?;
        validate_relative_segment("project.expected_dir", &self.expected_dir)?;
        validate_relative_segment("project.integration_dir", &self.integration_dir)?;
        if self.module_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("project.module_prefix must be non-empty".to_string()));
        }
        if self.module_prefix.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(
                "project.module_prefix must not contain path separators".to_string(),
            ));
        }
        for module in &self.modules {
            validate_module_id(module).map_err(|err| ConfigError::Invalid(err.to_string()))?;
        }
        Ok(())
    }
}

/// Event sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to `logging.path`.
    File,
    /// No logging.
    None,
}

/// Event logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Sink receiving harness events.
    pub sink: SinkKind,
    /// Log file path for the file sink.
    pub path: Option<PathBuf>,
}

impl LoggingConfig {
    /// Validates sink settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (SinkKind::File, None) => {
                Err(ConfigError::Invalid("logging.path is required for the file sink".to_string()))
            }
            (SinkKind::File, Some(path)) => validate_path(path),
            (SinkKind::Stderr | SinkKind::None, _) => Ok(()),
        }
    }

    /// Opens the configured event sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the log file cannot be opened.
    pub fn open_sink(&self) -> Result<Box<dyn EventSink>, ConfigError> {
        match (self.sink, &self.path) {
            (SinkKind::Stderr, _) => Ok(Box::new(StderrEventSink)),
            (SinkKind::None, _) => Ok(Box::new(NoopEventSink)),
            (SinkKind::File, Some(path)) => FileEventSink::new(path)
                .map(|sink| Box::new(sink) as Box<dyn EventSink>)
                .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display()))),
            (SinkKind::File, None) => {
                Err(ConfigError::Invalid("logging.path is required for the file sink".to_string()))
            }
        }
    }
}

/// Run report configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// JSON report destination, if any.
    pub path: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path and whether it must exist.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Reads a config file, refusing files above [`MAX_CONFIG_FILE_SIZE`].
///
/// The size is checked before reading, and the read itself is capped in case
/// the file grows in between.
fn read_bounded(path: &Path) -> Result<Vec<u8>, ConfigError> {
    let io_error = |err: io::Error| ConfigError::Io(format!("{}: {err}", path.display()));
    let too_large = || ConfigError::Invalid("config file exceeds size limit".to_string());
    let file = File::open(path).map_err(io_error)?;
    let len = file.metadata().map_err(io_error)?.len();
    if len > MAX_CONFIG_FILE_SIZE as u64 {
        return Err(too_large());
    }
    let mut bytes = Vec::new();
    file.take((MAX_CONFIG_FILE_SIZE + 1) as u64).read_to_end(&mut bytes).map_err(io_error)?;
    if bytes.len() > MAX_CONFIG_FILE_SIZE {
        return Err(too_large());
    }
    Ok(bytes)
}

/// Validates a path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a layout segment joined below a module or project directory.
fn validate_relative_segment(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    let path = Path::new(trimmed);
    validate_path(path).map_err(|err| ConfigError::Invalid(format!("{field}: {err}")))?;
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(ConfigError::Invalid(format!("{field} must not contain '..'")));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(ConfigError::Invalid(format!("{field} must be relative")));
            }
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
