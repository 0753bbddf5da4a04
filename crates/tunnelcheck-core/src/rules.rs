// crates/tunnelcheck-core/src/rules.rs
// ============================================================================
// Module: Field Rules
// Description: Declarative per-field rules shared by the text and form paths.
// Purpose: Keep both orchestrators on one rule runner so they cannot drift.
// Dependencies: crate::fields
// ============================================================================

//! ## Overview
//! A rule names a field, says whether it is required, and picks the shape its
//! value must have. [`check_fields`] evaluates a rule table in order against
//! any field lookup and appends one error per failing field.
//!
//! ## Invariants
//! - Rules run independently; a failing rule never suppresses a later one.
//! - A required field that is absent or empty yields only the "required" error.
//! - An optional field that is absent or empty is skipped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::fields::NumericRange;
use crate::fields::invalid_entries;
use crate::fields::is_in_range;
use crate::fields::is_valid_cidr;
use crate::fields::is_valid_endpoint;
use crate::fields::is_valid_ipv4;
use crate::fields::is_valid_key;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Whether a field must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Presence {
    /// Absent or empty values are reported.
    Required,
    /// Absent or empty values are skipped.
    Optional,
}

/// Value shape enforced for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    /// 44-character base64 key.
    Key,
    /// One CIDR block.
    Cidr,
    /// Comma-separated CIDR blocks.
    CidrList,
    /// Comma-separated IPv4 DNS servers.
    DnsServers,
    /// `host:port` endpoint.
    Endpoint,
    /// Integer in an inclusive range.
    Integer(NumericRange),
}

/// Validation rule for a single named field.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldRule {
    /// Field name as written in the config.
    pub name: &'static str,
    /// Presence requirement.
    pub presence: Presence,
    /// Shape the value must satisfy.
    pub shape: Shape,
}

impl FieldRule {
    /// Rule for a field that must be present.
    pub const fn required(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            presence: Presence::Required,
            shape,
        }
    }

    /// Rule for a field checked only when present.
    pub const fn optional(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            presence: Presence::Optional,
            shape,
        }
    }
}

/// Message style for a validation path.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Phrasing {
    /// Text path: messages name the section, e.g. `in [Interface]`.
    Sectioned(&'static str),
    /// Form path: short messages without a section.
    Flat,
}

impl Phrasing {
    /// Suffix appended to every message.
    fn suffix(self) -> String {
        match self {
            Self::Sectioned(section) => format!(" in [{section}]"),
            Self::Flat => String::new(),
        }
    }

    /// Message for a missing required field.
    fn required(self, name: &str) -> String {
        format!("{name} is required{}", self.suffix())
    }

    /// Message for a value with the wrong shape.
    fn invalid_format(self, name: &str) -> String {
        format!("invalid {name} format{}", self.suffix())
    }

    /// Message listing the failing entries of a list field.
    fn invalid_entries(self, name: &str, noun: &str, entries: &[&str]) -> String {
        format!("invalid {name} {noun}{}: {}", self.suffix(), entries.join(", "))
    }

    /// Message for an integer outside its range or not an integer at all.
    fn out_of_range(self, name: &str, range: NumericRange) -> String {
        format!("{name} must be an integer in {range}{}", self.suffix())
    }
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Evaluates `rules` in order, appending errors to `errors`.
pub(crate) fn check_fields<'a, F>(
    rules: &[FieldRule],
    lookup: F,
    phrasing: Phrasing,
    errors: &mut Vec<String>,
) where
    F: Fn(&str) -> Option<&'a str>,
{
    for rule in rules {
        let value = lookup(rule.name).filter(|value| !value.is_empty());
        match (value, rule.presence) {
            (None, Presence::Required) => errors.push(phrasing.required(rule.name)),
            (None, Presence::Optional) => {}
            (Some(value), _) => {
                if let Some(message) = check_shape(rule, value, phrasing) {
                    errors.push(message);
                }
            }
        }
    }
}

/// Checks one present value against its rule's shape.
fn check_shape(rule: &FieldRule, value: &str, phrasing: Phrasing) -> Option<String> {
    let name = rule.name;
    match rule.shape {
        Shape::Key => (!is_valid_key(value)).then(|| phrasing.invalid_format(name)),
        Shape::Cidr => (!is_valid_cidr(value)).then(|| phrasing.invalid_format(name)),
        Shape::Endpoint => (!is_valid_endpoint(value)).then(|| phrasing.invalid_format(name)),
        Shape::CidrList => list_error(name, "CIDR(s)", value, is_valid_cidr, phrasing),
        Shape::DnsServers => list_error(name, "server(s)", value, is_valid_ipv4, phrasing),
        Shape::Integer(range) => {
            (!is_in_range(value, range)).then(|| phrasing.out_of_range(name, range))
        }
    }
}

/// Aggregates every failing list entry into a single error.
fn list_error(
    name: &str,
    noun: &str,
    list: &str,
    predicate: fn(&str) -> bool,
    phrasing: Phrasing,
) -> Option<String> {
    let failed = invalid_entries(list, predicate);
    (!failed.is_empty()).then(|| phrasing.invalid_entries(name, noun, &failed))
}
