// crates/tunnelcheck-core/src/text.rs
// ============================================================================
// Module: Text Config Validator
// Description: Validates raw `[Interface]` / `[Peer]` config text.
// Purpose: Turn config text into a verdict plus ordered, per-field errors.
// Dependencies: crate::sections, crate::rules
// ============================================================================

//! ## Overview
//! The text path parses the config with [`parse_sections`] and then runs the
//! shared field rules per section. Interface errors always precede Peer
//! errors. A missing or empty section yields exactly one error and its field
//! checks are skipped.
//!
//! Security posture: config text contains private keys. Nothing here stores,
//! logs, or returns the text beyond the entries quoted in error messages.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::fields::KEEPALIVE_RANGE;
use crate::fields::MTU_RANGE;
use crate::result::ValidationResult;
use crate::rules::FieldRule;
use crate::rules::Phrasing;
use crate::rules::Shape;
use crate::rules::check_fields;
use crate::sections::SectionMap;
use crate::sections::parse_sections;

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Error returned for empty or non-text input.
pub const EMPTY_CONFIG_ERROR: &str = "config is empty or invalid";

/// Interface section name used in messages.
const INTERFACE: &str = "Interface";
/// Peer section name used in messages.
const PEER: &str = "Peer";

/// Interface field rules in report order.
const INTERFACE_RULES: &[FieldRule] = &[
    FieldRule::required("PrivateKey", Shape::Key),
    FieldRule::required("Address", Shape::CidrList),
    FieldRule::optional("DNS", Shape::DnsServers),
    FieldRule::optional("MTU", Shape::Integer(MTU_RANGE)),
];

/// Peer field rules in report order.
const PEER_RULES: &[FieldRule] = &[
    FieldRule::required("PublicKey", Shape::Key),
    FieldRule::required("Endpoint", Shape::Endpoint),
    FieldRule::required("AllowedIPs", Shape::CidrList),
    FieldRule::optional("PreSharedKey", Shape::Key),
    FieldRule::optional("PersistentKeepAlive", Shape::Integer(KEEPALIVE_RANGE)),
];

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates raw tunnel config text.
///
/// Empty input short-circuits to [`EMPTY_CONFIG_ERROR`]. Otherwise every
/// section and field check runs and all violations are reported.
#[must_use]
pub fn validate_config(text: &str) -> ValidationResult {
    if text.is_empty() {
        return ValidationResult::rejected(EMPTY_CONFIG_ERROR);
    }

    let sections = parse_sections(text);
    let mut errors = Vec::new();
    check_section(INTERFACE, &sections.interface, INTERFACE_RULES, &mut errors);
    check_section(PEER, &sections.peer, PEER_RULES, &mut errors);
    ValidationResult::from_errors(errors)
}

/// Validates config bytes, rejecting input that is not UTF-8 text.
#[must_use]
pub fn validate_config_bytes(bytes: &[u8]) -> ValidationResult {
    std::str::from_utf8(bytes)
        .map_or_else(|_| ValidationResult::rejected(EMPTY_CONFIG_ERROR), validate_config)
}

/// Runs one section's rules, or reports the section as missing.
fn check_section(
    name: &'static str,
    section: &SectionMap,
    rules: &[FieldRule],
    errors: &mut Vec<String>,
) {
    if section.is_empty() {
        errors.push(format!("missing [{name}] section"));
        return;
    }
    check_fields(
        rules,
        |field| section.get(field).map(String::as_str),
        Phrasing::Sectioned(name),
        errors,
    );
}
