// crates/tunnelcheck-core/tests/common/mod.rs
// =============================================================================
// Module: Validation Test Helpers
// Description: Shared fixtures for tunnel config validation tests.
// Purpose: Reduce duplication across integration tests for tunnelcheck-core.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]
#![allow(clippy::use_debug, reason = "Failure messages print error lists.")]

use tunnelcheck_core::FieldRecord;
use tunnelcheck_core::ValidationResult;

/// Well-formed interface private key.
pub const PRIVATE_KEY: &str = "yAnz5TF+lXXJte14tji3zlMNq+hd2rYUIgJBgB3fBmk=";
/// Well-formed peer public key.
pub const PUBLIC_KEY: &str = "xTIBA5rboUvnH4htodjb6e697QjLERt1NAB4mZqp8Dg=";
/// Well-formed pre-shared key.
pub const PRESHARED_KEY: &str = "HIgo9xNzJMWLKASShiTqIybxZ0U3wGLiUeJ1PKf8ykw=";

pub type TestResult = Result<(), String>;

/// Returns the minimal valid config with `overrides` replacing whole lines.
///
/// Each override is `(key, line)`; the line that starts with `key =` is
/// replaced by `line`.
pub fn config_with(overrides: &[(&str, &str)]) -> String {
    let base = minimal_config();
    base.lines()
        .map(|line| {
            overrides
                .iter()
                .find(|(key, _)| line.starts_with(&format!("{key} =")))
                .map_or_else(|| line.to_string(), |(_, replacement)| (*replacement).to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Minimal valid config text.
pub fn minimal_config() -> String {
    format!(
        "[Interface]\nPrivateKey = {PRIVATE_KEY}\nAddress = 10.0.0.2/24\n\n[Peer]\nPublicKey = \
         {PUBLIC_KEY}\nEndpoint = vpn.example.com:51820\nAllowedIPs = 0.0.0.0/0\n"
    )
}

/// Minimal valid form record.
pub fn minimal_form() -> FieldRecord {
    FieldRecord {
        private_key: Some(PRIVATE_KEY.to_string()),
        address: Some("10.0.0.2/24".to_string()),
        public_key: Some(PUBLIC_KEY.to_string()),
        endpoint: Some("vpn.example.com:51820".to_string()),
        allowed_ips: Some("0.0.0.0/0".to_string()),
        ..FieldRecord::default()
    }
}

/// Asserts a result is valid.
pub fn assert_valid(result: &ValidationResult) -> TestResult {
    if result.is_valid() && result.errors().is_empty() {
        Ok(())
    } else {
        Err(format!("expected valid result, got errors {:?}", result.errors()))
    }
}

/// Asserts a result is invalid and some error contains `needle`.
pub fn assert_error(result: &ValidationResult, needle: &str) -> TestResult {
    if result.is_valid() {
        return Err(format!("expected invalid result containing {needle}"));
    }
    if result.errors().iter().any(|error| error.contains(needle)) {
        Ok(())
    } else {
        Err(format!("errors {:?} did not contain {needle}", result.errors()))
    }
}

/// Asserts the exact error list.
pub fn assert_errors(result: &ValidationResult, expected: &[&str]) -> TestResult {
    if result.errors() == expected {
        Ok(())
    } else {
        Err(format!("expected errors {expected:?}, got {:?}", result.errors()))
    }
}
