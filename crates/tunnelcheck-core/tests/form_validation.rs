//! Form validation tests for tunnelcheck-core.
// crates/tunnelcheck-core/tests/form_validation.rs
// =============================================================================
// Module: Form Validation Tests
// Description: Validate flat field records and untyped JSON form payloads.
// Purpose: Pin the form path's single-address rule and message phrasing.
// =============================================================================

#![allow(clippy::use_debug, reason = "Debug output is asserted for redaction.")]

use common::TestResult;
use serde_json::json;
use tunnelcheck_core::FieldRecord;
use tunnelcheck_core::INVALID_FORM_ERROR;
use tunnelcheck_core::validate_form;
use tunnelcheck_core::validate_form_json;

mod common;

#[test]
fn minimal_form_is_valid() -> TestResult {
    common::assert_valid(&validate_form(&common::minimal_form()))
}

#[test]
fn empty_record_reports_required_fields_in_order() -> TestResult {
    common::assert_errors(
        &validate_form(&FieldRecord::default()),
        &[
            "PrivateKey is required",
            "Address is required",
            "PublicKey is required",
            "Endpoint is required",
            "AllowedIPs is required",
        ],
    )
}

#[test]
fn address_list_is_rejected_on_form_path() -> TestResult {
    let mut form = common::minimal_form();
    form.address = Some("10.0.0.0/24,10.0.1.0/24".to_string());
    common::assert_errors(&validate_form(&form), &["invalid Address format"])
}

#[test]
fn address_ipv6_is_accepted() -> TestResult {
    let mut form = common::minimal_form();
    form.address = Some("fd00::2/64".to_string());
    common::assert_valid(&validate_form(&form))
}

#[test]
fn allowed_ips_is_still_a_list() -> TestResult {
    let mut form = common::minimal_form();
    form.allowed_ips = Some("10.0.0.0/24, 10.0.1.0/24".to_string());
    common::assert_valid(&validate_form(&form))?;
    form.allowed_ips = Some("10.0.0.0/24, 10.0.1.0/99".to_string());
    common::assert_errors(&validate_form(&form), &["invalid AllowedIPs CIDR(s): 10.0.1.0/99"])
}

#[test]
fn dns_is_still_a_list() -> TestResult {
    let mut form = common::minimal_form();
    form.dns = Some("1.1.1.1,8.8.8.800".to_string());
    common::assert_errors(&validate_form(&form), &["invalid DNS server(s): 8.8.8.800"])
}

#[test]
fn keepalive_out_of_range() -> TestResult {
    let mut form = common::minimal_form();
    form.persistent_keep_alive = Some("70000".to_string());
    common::assert_errors(
        &validate_form(&form),
        &["PersistentKeepAlive must be an integer in [0, 65535]"],
    )
}

#[test]
fn empty_optional_fields_are_skipped() -> TestResult {
    let mut form = common::minimal_form();
    form.dns = Some(String::new());
    form.pre_shared_key = Some(String::new());
    form.persistent_keep_alive = Some(String::new());
    common::assert_valid(&validate_form(&form))
}

#[test]
fn form_values_are_not_trimmed() -> TestResult {
    let mut form = common::minimal_form();
    form.endpoint = Some(" vpn.example.com:51820".to_string());
    common::assert_errors(&validate_form(&form), &["invalid Endpoint format"])
}

#[test]
fn all_field_errors_are_reported_in_order() -> TestResult {
    let form = FieldRecord {
        private_key: Some("short".to_string()),
        address: Some("10.0.0.1".to_string()),
        dns: Some("dns.example".to_string()),
        public_key: Some("short".to_string()),
        pre_shared_key: Some("short".to_string()),
        allowed_ips: Some("everything".to_string()),
        persistent_keep_alive: Some("soon".to_string()),
        endpoint: Some("nowhere".to_string()),
    };
    common::assert_errors(
        &validate_form(&form),
        &[
            "invalid PrivateKey format",
            "invalid Address format",
            "invalid DNS server(s): dns.example",
            "invalid PublicKey format",
            "invalid Endpoint format",
            "invalid AllowedIPs CIDR(s): everything",
            "invalid PreSharedKey format",
            "PersistentKeepAlive must be an integer in [0, 65535]",
        ],
    )
}

// ============================================================================
// SECTION: JSON Payloads
// ============================================================================

#[test]
fn json_payload_uses_config_field_names() -> TestResult {
    let payload = json!({
        "PrivateKey": common::PRIVATE_KEY,
        "Address": "10.0.0.2/24",
        "PublicKey": common::PUBLIC_KEY,
        "Endpoint": "vpn.example.com:51820",
        "AllowedIPs": "0.0.0.0/0",
        "PersistentKeepAlive": "25",
        "Comment": "ignored"
    });
    common::assert_valid(&validate_form_json(&payload))
}

#[test]
fn json_null_fields_are_absent() -> TestResult {
    let payload = json!({ "PrivateKey": null });
    common::assert_error(&validate_form_json(&payload), "PrivateKey is required")
}

#[test]
fn json_non_string_field_short_circuits() -> TestResult {
    let payload = json!({ "PersistentKeepAlive": 25 });
    common::assert_errors(&validate_form_json(&payload), &[INVALID_FORM_ERROR])
}

#[test]
fn json_non_object_short_circuits() -> TestResult {
    common::assert_errors(&validate_form_json(&json!(["a", "b"])), &[INVALID_FORM_ERROR])?;
    common::assert_errors(&validate_form_json(&json!("text")), &[INVALID_FORM_ERROR])
}

#[test]
fn debug_output_omits_values() {
    let rendered = format!("{:?}", common::minimal_form());
    assert!(rendered.contains("PrivateKey"));
    assert!(!rendered.contains(common::PRIVATE_KEY));
}
