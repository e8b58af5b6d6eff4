//! Data model for extracted documentation: format-agnostic.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Parameter passing direction as declared in a `parm(...)` rule or a `@param` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "OUT")]
    Out,
    #[serde(rename = "INOUT")]
    InOut,
}

impl Direction {
    /// Upper-case form used in documentation tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::In => "IN",
            Direction::Out => "OUT",
            Direction::InOut => "INOUT",
        }
    }

    /// Lower-case form used in canonical call text (`in:&Name`).
    pub fn keyword(self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::InOut => "inout",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ();

    /// Case-insensitive: `in`, `Out`, `INOUT`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("in") {
            Ok(Direction::In)
        } else if s.eq_ignore_ascii_case("out") {
            Ok(Direction::Out)
        } else if s.eq_ignore_ascii_case("inout") {
            Ok(Direction::InOut)
        } else {
            Err(())
        }
    }
}

/// A single documented parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParameterDoc {
    pub name: String,
    pub direction: Direction,
    /// Empty until enrichment supplies it
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: String,
}

impl ParameterDoc {
    pub fn new(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
            ..Default::default()
        }
    }
}

/// Which source supplied a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExtractionMode {
    /// `parm(...)` declaration in the rules part
    ParmRule,
    /// Legacy `IsParm` flags on variables
    IsParm,
    /// Neither was present
    None,
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExtractionMode::ParmRule => "ParmRule",
            ExtractionMode::IsParm => "IsParm",
            ExtractionMode::None => "None",
        })
    }
}

/// Resolved parameter list and canonical call text of an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    pub parameters: Vec<ParameterDoc>,
    /// Always `Name();` or `Name(...);`
    pub raw_signature: String,
    pub mode: ExtractionMode,
}

impl Signature {
    /// Zero-parameter signature.
    pub fn empty(name: &str, mode: ExtractionMode) -> Self {
        Self {
            parameters: Vec::new(),
            raw_signature: format!("{}();", name),
            mode,
        }
    }
}

/// Parsed `/** ... */` annotation block, or a record synthesized from metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocComment {
    /// @package
    pub package: Option<String>,
    /// @summary
    pub summary: Option<String>,
    /// @description
    pub description: Option<String>,
    /// @author
    pub author: Option<String>,
    /// @created
    pub created: Option<String>,
    /// @return (raw remainder of the line)
    #[serde(rename = "return")]
    pub return_doc: Option<String>,
    /// @tag entries, in order
    pub tags: Vec<String>,
    /// @deprecated
    pub deprecated: bool,
    pub deprecation_note: Option<String>,
    /// @param entries, in order
    pub parameters: Vec<ParameterDoc>,
    /// No annotation block was present; built from metadata only
    pub is_auto_generated: bool,
}

/// Human-readable category of an exported object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectKind {
    pub label: String,
    /// Objects of this kind have a source part worth parsing for annotations
    #[serde(skip)]
    pub carries_source: bool,
    /// Folder-like kinds are never documented
    #[serde(skip)]
    pub container: bool,
}

/// One exported object with its merged documentation.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedObject {
    /// Display name (XML description, falling back to the identifier)
    pub name: String,
    pub kind: ObjectKind,
    /// Object identifier inside the knowledge base
    pub path: String,
    pub source_text: String,
    pub signature: Signature,
    pub xml_description: String,
    pub documentation: Option<DocComment>,
}

/// A non-fatal problem encountered while extracting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    /// Object identifier or input unit name
    pub subject: String,
    pub message: String,
}

/// Result of one extraction run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Extraction {
    pub kb_name: String,
    pub objects: Vec<ResolvedObject>,
    pub advisories: Vec<Advisory>,
}
