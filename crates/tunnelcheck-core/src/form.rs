// crates/tunnelcheck-core/src/form.rs
// ============================================================================
// Module: Form Validator
// Description: Validates a flat, structured tunnel field record.
// Purpose: Apply the shared field rules to form submissions.
// Dependencies: serde, serde_json, crate::rules
// ============================================================================

//! ## Overview
//! The form path sees one flat record instead of two sections. It runs the
//! same field rules as the text path with shorter messages and one
//! cardinality difference: `Address` is a single CIDR value here, while the
//! text path accepts a comma-separated list.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::fields::KEEPALIVE_RANGE;
use crate::result::ValidationResult;
use crate::rules::FieldRule;
use crate::rules::Phrasing;
use crate::rules::Shape;
use crate::rules::check_fields;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Error returned when an untyped form payload is not a record of strings.
pub const INVALID_FORM_ERROR: &str = "form is empty or invalid";

/// Flat tunnel field record as submitted by a form.
///
/// Field names on the wire match the config keys (`PrivateKey`, `AllowedIPs`,
/// ...). Unknown fields are ignored.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FieldRecord {
    /// Interface private key.
    #[serde(rename = "PrivateKey", default)]
    pub private_key: Option<String>,
    /// Single interface address in CIDR notation.
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
    /// Comma-separated IPv4 DNS servers.
    #[serde(rename = "DNS", default)]
    pub dns: Option<String>,
    /// Peer public key.
    #[serde(rename = "PublicKey", default)]
    pub public_key: Option<String>,
    /// Optional peer pre-shared key.
    #[serde(rename = "PreSharedKey", default)]
    pub pre_shared_key: Option<String>,
    /// Comma-separated CIDR blocks routed to the peer.
    #[serde(rename = "AllowedIPs", default)]
    pub allowed_ips: Option<String>,
    /// Keepalive interval in seconds.
    #[serde(rename = "PersistentKeepAlive", default)]
    pub persistent_keep_alive: Option<String>,
    /// Peer `host:port`.
    #[serde(rename = "Endpoint", default)]
    pub endpoint: Option<String>,
}

impl FieldRecord {
    /// Returns the value submitted for a config field name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        let value = match name {
            "PrivateKey" => &self.private_key,
            "Address" => &self.address,
            "DNS" => &self.dns,
            "PublicKey" => &self.public_key,
            "PreSharedKey" => &self.pre_shared_key,
            "AllowedIPs" => &self.allowed_ips,
            "PersistentKeepAlive" => &self.persistent_keep_alive,
            "Endpoint" => &self.endpoint,
            _ => return None,
        };
        value.as_deref()
    }
}

impl fmt::Debug for FieldRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let present: Vec<&str> = FORM_RULES
            .iter()
            .map(|rule| rule.name)
            .filter(|name| self.get(name).is_some())
            .collect();
        f.debug_struct("FieldRecord").field("present", &present).finish()
    }
}

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Form field rules in report order.
const FORM_RULES: &[FieldRule] = &[
    FieldRule::required("PrivateKey", Shape::Key),
    FieldRule::required("Address", Shape::Cidr),
    FieldRule::optional("DNS", Shape::DnsServers),
    FieldRule::required("PublicKey", Shape::Key),
    FieldRule::required("Endpoint", Shape::Endpoint),
    FieldRule::required("AllowedIPs", Shape::CidrList),
    FieldRule::optional("PreSharedKey", Shape::Key),
    FieldRule::optional("PersistentKeepAlive", Shape::Integer(KEEPALIVE_RANGE)),
];

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates a structured field record.
#[must_use]
pub fn validate_form(fields: &FieldRecord) -> ValidationResult {
    let mut errors = Vec::new();
    check_fields(FORM_RULES, |name| fields.get(name), Phrasing::Flat, &mut errors);
    ValidationResult::from_errors(errors)
}

/// Validates an untyped form payload.
///
/// The payload must be a JSON object whose known fields are strings or null;
/// anything else short-circuits to [`INVALID_FORM_ERROR`].
#[must_use]
pub fn validate_form_json(value: &Value) -> ValidationResult {
    if !value.is_object() {
        return ValidationResult::rejected(INVALID_FORM_ERROR);
    }
    FieldRecord::deserialize(value).map_or_else(
        |_| ValidationResult::rejected(INVALID_FORM_ERROR),
        |record| validate_form(&record),
    )
}
