// crates/tunnelcheck-core/src/result.rs
// ============================================================================
// Module: Validation Result
// Description: Verdict plus ordered error list returned by every validator.
// Purpose: Keep `valid` and `errors` consistent by construction.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`ValidationResult`] is the only output of the validators. `valid` is
//! derived from the error list when the result is built, so the two can never
//! disagree.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Validation verdict with ordered, human-readable errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// True iff `errors` is empty.
    valid: bool,
    /// Errors in deterministic field order.
    errors: Vec<String>,
}

impl ValidationResult {
    /// Builds a result from collected errors.
    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Builds a failed result carrying a single error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::from_errors(vec![message.into()])
    }

    /// Returns true when no errors were found.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the errors in report order.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Consumes the result and returns its errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}
