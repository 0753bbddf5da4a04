// crates/tunnelcheck-cli/src/settings.rs
// ============================================================================
// Module: CLI Settings
// Description: Settings loading and validation for the tunnelcheck CLI.
// Purpose: Provide strict, fail-closed settings parsing with hard limits.
// Dependencies: serde, thiserror, toml, tunnelcheck-core
// ============================================================================

//! ## Overview
//! Settings are loaded from a TOML file with strict size and path limits.
//! An explicitly named settings file must exist; when none is named and the
//! default file is absent, built-in defaults apply. Invalid settings fail
//! closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use tunnelcheck_core::FileAuditSink;
use tunnelcheck_core::NoopAuditSink;
use tunnelcheck_core::StderrAuditSink;
use tunnelcheck_core::ValidationAuditSink;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default settings filename when no path is specified.
pub const DEFAULT_SETTINGS_NAME: &str = "tunnelcheck.toml";
/// Environment variable used to override the settings path.
pub const SETTINGS_ENV_VAR: &str = "TUNNELCHECK_CONFIG";
/// Maximum settings file size in bytes.
pub const MAX_SETTINGS_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default maximum size of a validated input in bytes.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 64 * 1024;
/// Largest configurable input size in bytes.
pub const MAX_INPUT_BYTES_LIMIT: usize = 1024 * 1024;

// ============================================================================
// SECTION: Settings Types
// ============================================================================

/// Tunnelcheck CLI settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Input size limits.
    #[serde(default)]
    pub limits: LimitsSettings,
    /// Audit event routing.
    #[serde(default)]
    pub audit: AuditSettings,
    /// Result rendering.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Input size limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsSettings {
    /// Largest accepted input in bytes.
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
}

impl Default for LimitsSettings {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Audit events are discarded.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `audit.path`.
    File,
}

/// Audit event routing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditSettings {
    /// Where audit events go.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Audit log path, required for the file sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Output rendering format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Serialized validation result.
    Json,
}

/// Result rendering settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    /// Default output format when no flag is given.
    #[serde(default)]
    pub format: OutputFormat,
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl Settings {
    /// Loads settings using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let (resolved, explicit) = resolve_path(path)?;
        validate_path(&resolved)?;
        if !explicit && !resolved.exists() {
            return Ok(Self::default());
        }
        let metadata =
            fs::metadata(&resolved).map_err(|err| SettingsError::Io(err.to_string()))?;
        let within_limit = usize::try_from(metadata.len())
            .is_ok_and(|size| size <= MAX_SETTINGS_FILE_SIZE);
        if !within_limit {
            return Err(SettingsError::Invalid("settings file exceeds size limit".to_string()));
        }
        let bytes = fs::read(&resolved).map_err(|err| SettingsError::Io(err.to_string()))?;
        if bytes.len() > MAX_SETTINGS_FILE_SIZE {
            return Err(SettingsError::Invalid("settings file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| SettingsError::Invalid("settings file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            toml::from_str(content).map_err(|err| SettingsError::Parse(err.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validates settings values.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when settings are invalid.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.limits.validate()?;
        self.audit.validate()
    }

    /// Builds the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] when the audit log cannot be opened.
    pub fn audit_sink(&self) -> Result<Box<dyn ValidationAuditSink>, SettingsError> {
        match (self.audit.sink, self.audit.path.as_deref()) {
            (AuditSinkKind::None, _) => Ok(Box::new(NoopAuditSink)),
            (AuditSinkKind::Stderr, _) => Ok(Box::new(StderrAuditSink)),
            (AuditSinkKind::File, Some(path)) => FileAuditSink::new(path)
                .map(|sink| Box::new(sink) as Box<dyn ValidationAuditSink>)
                .map_err(|err| SettingsError::Io(format!("{}: {err}", path.display()))),
            (AuditSinkKind::File, None) => {
                Err(SettingsError::Invalid("file audit sink requires audit.path".to_string()))
            }
        }
    }
}

impl LimitsSettings {
    /// Validates input limits.
    fn validate(&self) -> Result<(), SettingsError> {
        if self.max_input_bytes == 0 {
            return Err(SettingsError::Invalid(
                "limits.max_input_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_input_bytes > MAX_INPUT_BYTES_LIMIT {
            return Err(SettingsError::Invalid(format!(
                "limits.max_input_bytes must be at most {MAX_INPUT_BYTES_LIMIT}"
            )));
        }
        Ok(())
    }
}

impl AuditSettings {
    /// Validates audit routing.
    fn validate(&self) -> Result<(), SettingsError> {
        match (self.sink, self.path.as_deref()) {
            (AuditSinkKind::File, None) => {
                Err(SettingsError::Invalid("file audit sink requires audit.path".to_string()))
            }
            (AuditSinkKind::File, Some(path)) => validate_path_string("audit.path", path),
            (_, Some(_)) => Err(SettingsError::Invalid(
                "audit.path is only valid with the file audit sink".to_string(),
            )),
            (_, None) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Settings loading and validation errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O failure while reading settings.
    #[error("settings io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("settings parse error: {0}")]
    Parse(String),
    /// Invalid settings data.
    #[error("invalid settings: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default for `limits.max_input_bytes`.
const fn default_max_input_bytes() -> usize {
    DEFAULT_MAX_INPUT_BYTES
}

/// Resolves the settings path from CLI or environment defaults.
///
/// The flag reports whether the path was named explicitly.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), SettingsError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(SETTINGS_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(SettingsError::Invalid("settings path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_SETTINGS_NAME), false))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), SettingsError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SettingsError::Invalid("settings path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SettingsError::Invalid("settings path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a configured path value against length constraints.
fn validate_path_string(field: &str, path: &Path) -> Result<(), SettingsError> {
    let text = path.to_string_lossy();
    if text.trim().is_empty() {
        return Err(SettingsError::Invalid(format!("{field} must be non-empty")));
    }
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SettingsError::Invalid(format!("{field} exceeds max length")));
    }
    for component in path.components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SettingsError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}
