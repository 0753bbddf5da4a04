// crates/tunnelcheck-core/src/lib.rs
// ============================================================================
// Module: Tunnelcheck Core Library
// Description: Tunnel config parsing, field validation, and audit events.
// Purpose: Single source of truth for tunnel config validation semantics.
// Dependencies: regex, serde, serde_json
// ============================================================================

//! ## Overview
//! `tunnelcheck-core` validates peer-to-peer tunnel configurations made of an
//! `[Interface]` and a `[Peer]` section. Two entry points share one rule set:
//! [`validate_config`] for raw config text and [`validate_form`] for a flat
//! field record. Both return a [`ValidationResult`] and never fail or panic on
//! bad input.
//!
//! Security posture: inputs carry private keys. Validation is pure and keeps
//! nothing after it returns; audit events are redacted by construction.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod fields;
pub mod form;
pub mod result;
mod rules;
pub mod sections;
pub mod text;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::InputSource;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use audit::ValidationAuditEvent;
pub use audit::ValidationAuditSink;
pub use fields::IPV4_PREFIX_MAX;
pub use fields::IPV6_PREFIX_MAX;
pub use fields::KEEPALIVE_RANGE;
pub use fields::MTU_RANGE;
pub use fields::NumericRange;
pub use fields::PORT_RANGE;
pub use fields::invalid_entries;
pub use fields::is_in_range;
pub use fields::is_valid_cidr;
pub use fields::is_valid_domain;
pub use fields::is_valid_endpoint;
pub use fields::is_valid_ipv4;
pub use fields::is_valid_ipv6;
pub use fields::is_valid_key;
pub use fields::is_valid_port;
pub use fields::parse_in_range;
pub use form::FieldRecord;
pub use form::INVALID_FORM_ERROR;
pub use form::validate_form;
pub use form::validate_form_json;
pub use result::ValidationResult;
pub use sections::ConfigSections;
pub use sections::SectionMap;
pub use sections::parse_sections;
pub use text::EMPTY_CONFIG_ERROR;
pub use text::validate_config;
pub use text::validate_config_bytes;
