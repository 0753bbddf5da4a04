// crates/tunnelcheck-core/src/sections.rs
// ============================================================================
// Module: Section Parser
// Description: Splits tunnel config text into Interface and Peer key/value maps.
// Purpose: Isolate the lossy INI-style parse from semantic validation.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! The parser is intentionally lossy: lines outside a recognized section,
//! lines without `=`, and unknown headers are dropped without diagnostics.
//! Semantic problems are reported later by the validators.
//!
//! ## Invariants
//! - Only `[Interface]` and `[Peer]` (exact, case-sensitive) select a section.
//! - A single leading byte-order mark is ignored.
//! - Keys and values are trimmed; nothing else is normalized.
//! - The last occurrence of a duplicate key wins.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Header line selecting the interface section.
pub const INTERFACE_HEADER: &str = "[Interface]";
/// Header line selecting the peer section.
pub const PEER_HEADER: &str = "[Peer]";
/// Prefix marking a comment line.
const COMMENT_PREFIX: char = '#';
/// UTF-8 byte-order mark some editors write at the start of a file.
const BYTE_ORDER_MARK: char = '\u{feff}';

// ============================================================================
// SECTION: Types
// ============================================================================

/// Key/value settings of a single section.
pub type SectionMap = BTreeMap<String, String>;

/// Parsed two-section view of a tunnel config.
///
/// `Debug` prints field names only so values (private keys in particular)
/// cannot leak through diagnostics.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConfigSections {
    /// Settings found under `[Interface]`.
    pub interface: SectionMap,
    /// Settings found under `[Peer]`.
    pub peer: SectionMap,
}

impl fmt::Debug for ConfigSections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigSections")
            .field("interface", &self.interface.keys().collect::<Vec<_>>())
            .field("peer", &self.peer.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Section currently receiving key/value lines.
#[derive(Clone, Copy)]
enum Section {
    /// `[Interface]`
    Interface,
    /// `[Peer]`
    Peer,
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses raw config text into its `Interface` and `Peer` maps.
#[must_use]
pub fn parse_sections(text: &str) -> ConfigSections {
    let mut sections = ConfigSections::default();
    let mut current: Option<Section> = None;

    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }
        match line {
            INTERFACE_HEADER => {
                current = Some(Section::Interface);
                continue;
            }
            PEER_HEADER => {
                current = Some(Section::Peer);
                continue;
            }
            _ if line.starts_with('[') && line.ends_with(']') => continue,
            _ => {}
        }
        let Some(section) = current else {
            continue;
        };
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let target = match section {
            Section::Interface => &mut sections.interface,
            Section::Peer => &mut sections.peer,
        };
        target.insert(key.trim().to_string(), value.trim().to_string());
    }

    sections
}
