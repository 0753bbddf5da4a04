// crates/tunnelcheck-cli/src/lib.rs
// ============================================================================
// Module: Tunnelcheck CLI Library
// Description: Shared helpers for the tunnelcheck command-line interface.
// Purpose: Provide reusable components (messages, settings) for the binary and tests.
// Dependencies: serde, thiserror, toml, tunnelcheck-core
// ============================================================================

//! ## Overview
//! This library houses the CLI message catalog and the settings model. The
//! binary entry point (`src/main.rs`) imports these helpers to keep all
//! user-facing output consistent.
//!
//! Security posture: validated inputs carry private keys; the CLI never
//! echoes them outside the validation errors it was asked to produce.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Message catalog and formatting macro.
pub mod i18n;
/// TOML settings model and loader.
pub mod settings;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use settings::AuditSinkKind;
pub use settings::OutputFormat;
pub use settings::Settings;
pub use settings::SettingsError;
