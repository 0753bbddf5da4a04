// crates/tunnelcheck-core/src/fields.rs
// ============================================================================
// Module: Field Validators
// Description: Pure predicates for tunnel config primitive values.
// Purpose: Single shared rule set for the text and form validation paths.
// Dependencies: regex
// ============================================================================

//! ## Overview
//! Every validator here is a pure `&str -> bool` predicate over surface
//! syntax: keys, IPv4/IPv6 addresses, CIDR blocks, endpoints, domain names,
//! and bounded integers. Shapes come from a process-wide, read-only pattern
//! table compiled on first use.
//!
//! ## Invariants
//! - Validators never panic and never allocate results that outlive the call.
//! - Empty input is invalid for every shape.
//! - Digit classes are ASCII-only (`[0-9]`), never Unicode `\d`.
//! - Keys are checked for shape only; decoding to 32 bytes is not verified.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// ============================================================================
// SECTION: Ranges
// ============================================================================

/// Inclusive integer range accepted by a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericRange {
    /// Smallest accepted value.
    pub min: i64,
    /// Largest accepted value.
    pub max: i64,
}

impl NumericRange {
    /// Creates a new inclusive range.
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self {
            min,
            max,
        }
    }

    /// Returns true when `value` lies inside the range.
    #[must_use]
    pub const fn contains(self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Accepted interface MTU values.
pub const MTU_RANGE: NumericRange = NumericRange::new(576, 65_535);
/// Accepted persistent keepalive intervals in seconds (0 disables).
pub const KEEPALIVE_RANGE: NumericRange = NumericRange::new(0, 65_535);
/// Accepted UDP ports for endpoints.
pub const PORT_RANGE: NumericRange = NumericRange::new(1, 65_535);
/// Accepted IPv4 octet values.
const OCTET_RANGE: NumericRange = NumericRange::new(0, 255);
/// Largest IPv4 prefix length.
pub const IPV4_PREFIX_MAX: i64 = 32;
/// Largest IPv6 prefix length.
pub const IPV6_PREFIX_MAX: i64 = 128;

// ============================================================================
// SECTION: Pattern Table
// ============================================================================

/// 42 unpadded base64 characters followed by 2 possibly padded ones.
static KEY_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"^[A-Za-z0-9+/]{42}[A-Za-z0-9+/=]{2}$"));
/// Dotted quad shape; octet bounds are checked numerically.
static IPV4_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"^[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}$"));
/// Exactly eight colon-separated hex groups; `::` shorthand is not expanded.
static IPV6_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"^(?:[0-9A-Fa-f]{0,4}:){7}[0-9A-Fa-f]{0,4}$"));
/// IPv4 CIDR: address capture and prefix capture.
static IPV4_CIDR_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"^([0-9]{1,3}(?:\.[0-9]{1,3}){3})/([0-9]{1,3})$"));
/// IPv6 CIDR: 2 to 7 colons between hex groups, then the prefix capture.
static IPV6_CIDR_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"^(?:[0-9A-Fa-f]{0,4}:){2,7}[0-9A-Fa-f]{0,4}/([0-9]{1,3})$"));
/// `host:port` with a single colon.
static ENDPOINT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"^([^:]+):([0-9]+)$"));
/// Dot-separated labels of 1 to 63 characters with internal hyphens only.
static DOMAIN_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    compile(
        r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
});

/// Compiles a table pattern. A pattern that fails to compile rejects all input.
fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(pattern).ok()
}

/// Returns true when the compiled pattern matches the whole value.
fn matches(pattern: Option<&Regex>, value: &str) -> bool {
    pattern.is_some_and(|regex| regex.is_match(value))
}

// ============================================================================
// SECTION: Validators
// ============================================================================

/// Returns true when `value` has the 44-character base64 key shape.
///
/// Surrounding whitespace is ignored. Only the surface shape is checked.
#[must_use]
pub fn is_valid_key(value: &str) -> bool {
    matches(KEY_PATTERN.as_ref(), value.trim())
}

/// Returns true for a dotted-quad IPv4 address with every octet in `[0, 255]`.
#[must_use]
pub fn is_valid_ipv4(value: &str) -> bool {
    if !matches(IPV4_PATTERN.as_ref(), value) {
        return false;
    }
    value.split('.').all(|octet| parse_in_range(octet, OCTET_RANGE).is_some())
}

/// Returns true for an IPv6 address written as exactly eight groups.
///
/// Zero-compressed forms such as `fe80::1` are rejected.
#[must_use]
pub fn is_valid_ipv6(value: &str) -> bool {
    matches(IPV6_PATTERN.as_ref(), value)
}

/// Returns true for an IPv4 or IPv6 CIDR block.
///
/// The IPv6 branch only checks the coarse group shape of the address, not the
/// stricter [`is_valid_ipv6`] rule, so `fd00::/64` is accepted.
#[must_use]
pub fn is_valid_cidr(value: &str) -> bool {
    if let Some(captures) = IPV4_CIDR_PATTERN.as_ref().and_then(|regex| regex.captures(value)) {
        let address_ok = captures.get(1).is_some_and(|address| is_valid_ipv4(address.as_str()));
        let prefix_ok = captures.get(2).is_some_and(|prefix| {
            parse_in_range(prefix.as_str(), NumericRange::new(0, IPV4_PREFIX_MAX)).is_some()
        });
        if address_ok && prefix_ok {
            return true;
        }
    }
    IPV6_CIDR_PATTERN.as_ref().and_then(|regex| regex.captures(value)).is_some_and(|captures| {
        captures.get(1).is_some_and(|prefix| {
            parse_in_range(prefix.as_str(), NumericRange::new(0, IPV6_PREFIX_MAX)).is_some()
        })
    })
}

/// Returns true for a `host:port` endpoint.
///
/// The host must be an IPv4 address or a domain name; the port must lie in
/// [`PORT_RANGE`].
#[must_use]
pub fn is_valid_endpoint(value: &str) -> bool {
    let Some(captures) = ENDPOINT_PATTERN.as_ref().and_then(|regex| regex.captures(value)) else {
        return false;
    };
    let (Some(host), Some(port)) = (captures.get(1), captures.get(2)) else {
        return false;
    };
    is_valid_port(port.as_str()) && (is_valid_ipv4(host.as_str()) || is_valid_domain(host.as_str()))
}

/// Returns true for a domain name made of 1–63 character labels.
#[must_use]
pub fn is_valid_domain(value: &str) -> bool {
    matches(DOMAIN_PATTERN.as_ref(), value)
}

/// Returns true for a port number in [`PORT_RANGE`].
#[must_use]
pub fn is_valid_port(value: &str) -> bool {
    parse_in_range(value, PORT_RANGE).is_some()
}

/// Parses a base-10 integer and returns it only when it lies in `range`.
///
/// Surrounding whitespace is ignored; anything else that is not part of the
/// integer makes the parse fail.
#[must_use]
pub fn parse_in_range(value: &str, range: NumericRange) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|number| range.contains(*number))
}

/// Returns true when `value` parses to an integer inside `range`.
#[must_use]
pub fn is_in_range(value: &str, range: NumericRange) -> bool {
    parse_in_range(value, range).is_some()
}

/// Splits a comma-separated list and returns the trimmed entries that fail
/// `predicate`, in input order.
#[must_use]
pub fn invalid_entries(list: &str, predicate: fn(&str) -> bool) -> Vec<&str> {
    list.split(',').map(str::trim).filter(|entry| !predicate(entry)).collect()
}
