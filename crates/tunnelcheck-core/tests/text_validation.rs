//! Text config validation tests for tunnelcheck-core.
// crates/tunnelcheck-core/tests/text_validation.rs
// =============================================================================
// Module: Text Config Validation Tests
// Description: Validate section presence, per-field rules, and error order.
// Purpose: Ensure raw config text yields deterministic, complete verdicts.
// =============================================================================

use common::TestResult;
use tunnelcheck_core::EMPTY_CONFIG_ERROR;
use tunnelcheck_core::validate_config;
use tunnelcheck_core::validate_config_bytes;

mod common;

// ============================================================================
// SECTION: Scenarios
// ============================================================================

#[test]
fn minimal_config_is_valid() -> TestResult {
    common::assert_valid(&validate_config(&common::minimal_config()))
}

#[test]
fn empty_private_key_is_required() -> TestResult {
    let config = common::config_with(&[("PrivateKey", "PrivateKey = ")]);
    let result = validate_config(&config);
    common::assert_errors(&result, &["PrivateKey is required in [Interface]"])
}

#[test]
fn address_prefix_over_32_names_entry() -> TestResult {
    let config = common::config_with(&[("Address", "Address = 10.0.0.2/33")]);
    let result = validate_config(&config);
    common::assert_errors(&result, &["invalid Address CIDR(s) in [Interface]: 10.0.0.2/33"])
}

#[test]
fn keepalive_out_of_range_cites_range() -> TestResult {
    let config = format!("{}PersistentKeepAlive = 70000\n", common::minimal_config());
    let result = validate_config(&config);
    common::assert_errors(
        &result,
        &["PersistentKeepAlive must be an integer in [0, 65535] in [Peer]"],
    )
}

// ============================================================================
// SECTION: Short Circuits
// ============================================================================

#[test]
fn empty_input_short_circuits() -> TestResult {
    common::assert_errors(&validate_config(""), &[EMPTY_CONFIG_ERROR])
}

#[test]
fn non_utf8_bytes_short_circuit() -> TestResult {
    common::assert_errors(&validate_config_bytes(&[0xff, 0xfe, b'[']), &[EMPTY_CONFIG_ERROR])
}

#[test]
fn utf8_bytes_match_text_path() {
    let config = common::minimal_config();
    assert_eq!(validate_config_bytes(config.as_bytes()), validate_config(&config));
}

#[test]
fn byte_order_mark_prefixed_file_is_valid() -> TestResult {
    let mut bytes = vec![0xef, 0xbb, 0xbf];
    bytes.extend_from_slice(common::minimal_config().as_bytes());
    common::assert_valid(&validate_config_bytes(&bytes))
}

#[test]
fn whitespace_only_reports_both_sections_missing() -> TestResult {
    common::assert_errors(
        &validate_config("   \n\t\n"),
        &["missing [Interface] section", "missing [Peer] section"],
    )
}

#[test]
fn missing_peer_reports_one_peer_error() -> TestResult {
    let config = "[Interface]\nPrivateKey = nope\nAddress = 999.0.0.1/40\nDNS = x\nMTU = 1\n";
    let result = validate_config(config);
    let peer_errors: Vec<&String> =
        result.errors().iter().filter(|error| error.contains("Peer")).collect();
    if peer_errors.len() != 1 {
        return Err(format!("expected one peer error, got {}", peer_errors.len()));
    }
    common::assert_error(&result, "missing [Peer] section")
}

#[test]
fn header_without_keys_counts_as_missing() -> TestResult {
    let config = format!("[Interface]\n[Peer]\nPublicKey = {}\n", common::PUBLIC_KEY);
    let result = validate_config(&config);
    common::assert_errors(
        &result,
        &[
            "missing [Interface] section",
            "Endpoint is required in [Peer]",
            "AllowedIPs is required in [Peer]",
        ],
    )
}

// ============================================================================
// SECTION: Interface Fields
// ============================================================================

#[test]
fn malformed_private_key_is_rejected() -> TestResult {
    let config = common::config_with(&[("PrivateKey", "PrivateKey = not-a-key")]);
    common::assert_errors(&validate_config(&config), &["invalid PrivateKey format in [Interface]"])
}

#[test]
fn address_list_accepts_mixed_families() -> TestResult {
    let config = common::config_with(&[("Address", "Address = 10.0.0.2/24, fd00::2/64")]);
    common::assert_valid(&validate_config(&config))
}

#[test]
fn address_list_aggregates_failures() -> TestResult {
    let config =
        common::config_with(&[("Address", "Address = 10.0.0.2/33,10.0.0.3/24, bogus")]);
    common::assert_errors(
        &validate_config(&config),
        &["invalid Address CIDR(s) in [Interface]: 10.0.0.2/33, bogus"],
    )
}

#[test]
fn missing_address_is_required() -> TestResult {
    let config = format!(
        "[Interface]\nPrivateKey = {}\n[Peer]\nPublicKey = {}\nEndpoint = a.example:1\nAllowedIPs \
         = 0.0.0.0/0\n",
        common::PRIVATE_KEY,
        common::PUBLIC_KEY
    );
    common::assert_errors(&validate_config(&config), &["Address is required in [Interface]"])
}

#[test]
fn dns_accepts_ipv4_list() -> TestResult {
    let config = common::minimal_config()
        .replace("Address = 10.0.0.2/24", "Address = 10.0.0.2/24\nDNS = 1.1.1.1, 9.9.9.9");
    common::assert_valid(&validate_config(&config))
}

#[test]
fn dns_rejects_ipv6_servers() -> TestResult {
    let config = common::minimal_config()
        .replace("Address = 10.0.0.2/24", "Address = 10.0.0.2/24\nDNS = 1.1.1.1, 2606:4700::1111");
    common::assert_errors(
        &validate_config(&config),
        &["invalid DNS server(s) in [Interface]: 2606:4700::1111"],
    )
}

#[test]
fn empty_dns_is_skipped() -> TestResult {
    let config =
        common::minimal_config().replace("Address = 10.0.0.2/24", "Address = 10.0.0.2/24\nDNS =");
    common::assert_valid(&validate_config(&config))
}

#[test]
fn mtu_bounds() -> TestResult {
    let cases = [("576", true), ("1420", true), ("575", false), ("65536", false), ("big", false)];
    for (mtu, valid) in cases {
        let config = common::minimal_config()
            .replace("Address = 10.0.0.2/24", &format!("Address = 10.0.0.2/24\nMTU = {mtu}"));
        let result = validate_config(&config);
        if valid {
            common::assert_valid(&result)?;
        } else {
            common::assert_errors(
                &result,
                &["MTU must be an integer in [576, 65535] in [Interface]"],
            )?;
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Peer Fields
// ============================================================================

#[test]
fn endpoint_without_port_is_rejected() -> TestResult {
    let config = common::config_with(&[("Endpoint", "Endpoint = vpn.example.com")]);
    common::assert_errors(&validate_config(&config), &["invalid Endpoint format in [Peer]"])
}

#[test]
fn allowed_ips_accepts_ipv6_default_route() -> TestResult {
    let config = common::config_with(&[("AllowedIPs", "AllowedIPs = 0.0.0.0/0, ::/0")]);
    common::assert_valid(&validate_config(&config))
}

#[test]
fn allowed_ips_aggregates_failures() -> TestResult {
    let config = common::config_with(&[("AllowedIPs", "AllowedIPs = 0.0.0.0/0, 10.0.0.0/40,")]);
    common::assert_errors(
        &validate_config(&config),
        &["invalid AllowedIPs CIDR(s) in [Peer]: 10.0.0.0/40, "],
    )
}

#[test]
fn preshared_key_checked_when_present() -> TestResult {
    let valid = format!("{}PreSharedKey = {}\n", common::minimal_config(), common::PRESHARED_KEY);
    common::assert_valid(&validate_config(&valid))?;
    let invalid = format!("{}PreSharedKey = short\n", common::minimal_config());
    common::assert_errors(&validate_config(&invalid), &["invalid PreSharedKey format in [Peer]"])
}

#[test]
fn keepalive_zero_is_valid() -> TestResult {
    let config = format!("{}PersistentKeepAlive = 0\n", common::minimal_config());
    common::assert_valid(&validate_config(&config))
}

#[test]
fn keepalive_non_numeric_is_rejected() -> TestResult {
    let config = format!("{}PersistentKeepAlive = often\n", common::minimal_config());
    common::assert_error(&validate_config(&config), "PersistentKeepAlive must be an integer")
}

#[test]
fn misspelled_keepalive_key_is_ignored() -> TestResult {
    let config = format!("{}PersistentKeepalive = often\n", common::minimal_config());
    common::assert_valid(&validate_config(&config))
}

// ============================================================================
// SECTION: Ordering
// ============================================================================

#[test]
fn errors_follow_section_then_field_order() -> TestResult {
    let config = "[Peer]\nPersistentKeepAlive = -1\nPreSharedKey = x\nAllowedIPs = nope\nEndpoint \
                  = nope\n[Interface]\nMTU = 1\nDNS = nope\nAddress = nope\n";
    common::assert_errors(
        &validate_config(config),
        &[
            "PrivateKey is required in [Interface]",
            "invalid Address CIDR(s) in [Interface]: nope",
            "invalid DNS server(s) in [Interface]: nope",
            "MTU must be an integer in [576, 65535] in [Interface]",
            "PublicKey is required in [Peer]",
            "invalid Endpoint format in [Peer]",
            "invalid AllowedIPs CIDR(s) in [Peer]: nope",
            "invalid PreSharedKey format in [Peer]",
            "PersistentKeepAlive must be an integer in [0, 65535] in [Peer]",
        ],
    )
}

#[test]
fn repeated_validation_is_identical() {
    let config = "[Interface]\nAddress = 1.2.3.4/99\n[Peer]\nEndpoint = x\n";
    assert_eq!(validate_config(config), validate_config(config));
}
