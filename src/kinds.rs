//! Object and part kind identifiers.
//!
//! GeneXus tags every exported object and every object part with an opaque
//! GUID. The three part kinds the extractor reads are fixed constants; object
//! kinds are mapped to human-readable categories through [`KindRegistry`].

use crate::model::ObjectKind;
use std::collections::HashMap;

pub const PROCEDURE: &str = "84a12160-f59b-4ad7-a683-ea4481ac23e9";

pub const PART_SOURCE: &str = "528d1c06-a9c2-420d-bd35-21dca83f12ff";
pub const PART_RULES: &str = "9b0a32a3-de6d-4be1-a4dd-1b85d3741534";
pub const PART_VARIABLES: &str = "e4c4ade7-53f0-4a56-bdfd-843735b66f47";

/// Label that marks a container kind.
const FOLDER_LABEL: &str = "Folder";

/// Kind identifiers of the metadata parts inside one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartKinds {
    pub source: String,
    pub rules: String,
    pub variables: String,
}

impl Default for PartKinds {
    fn default() -> Self {
        Self {
            source: PART_SOURCE.to_string(),
            rules: PART_RULES.to_string(),
            variables: PART_VARIABLES.to_string(),
        }
    }
}

/// Maps object kind GUIDs to categories. Unregistered GUIDs are unknown.
#[derive(Debug, Clone)]
pub struct KindRegistry {
    kinds: HashMap<String, ObjectKind>,
}

impl Default for KindRegistry {
    fn default() -> Self {
        let mut registry = Self {
            kinds: HashMap::new(),
        };
        registry.kinds.insert(
            PROCEDURE.to_string(),
            ObjectKind {
                label: "Procedure".to_string(),
                carries_source: true,
                container: false,
            },
        );
        registry
    }
}

impl KindRegistry {
    /// Register (or relabel) a kind. `Folder` registers a container kind.
    pub fn register(&mut self, guid: &str, label: &str) {
        let key = guid.trim().to_ascii_lowercase();
        let carries_source = self
            .kinds
            .get(&key)
            .is_some_and(|existing| existing.carries_source);
        self.kinds.insert(
            key,
            ObjectKind {
                label: label.trim().to_string(),
                carries_source,
                container: label.trim().eq_ignore_ascii_case(FOLDER_LABEL),
            },
        );
    }

    /// Look up a kind GUID (case-insensitive).
    pub fn lookup(&self, guid: &str) -> Option<&ObjectKind> {
        self.kinds.get(&guid.trim().to_ascii_lowercase())
    }
}

/// Parse a `GUID=Label` mapping (command-line `--kind`).
pub fn parse_mapping(s: &str) -> Result<(String, String), String> {
    let (guid, label) = s
        .split_once('=')
        .ok_or_else(|| format!("expected GUID=LABEL, got '{}'", s))?;
    let (guid, label) = (guid.trim(), label.trim());
    if guid.is_empty() || label.is_empty() {
        return Err(format!("expected GUID=LABEL, got '{}'", s));
    }
    Ok((guid.to_string(), label.to_string()))
}
