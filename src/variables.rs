//! Variable metadata scan over an object's variables part.
//!
//! Shared by the `IsParm` signature strategy and the metadata enricher.

use crate::error::Result;
use crate::kinds::PartKinds;
use crate::parser::types::{clean_type, ATTRIBUTE_PREFIX, UNKNOWN_TYPE};
use crate::xml::{self, Node};

/// Properties of one `<Variable>` relevant to documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableMeta {
    pub name: String,
    pub is_parm: bool,
    /// Normalized type; `-` for attribute-derived variables
    pub type_name: String,
    pub description: String,
}

/// Scan every variable of `object`.
///
/// `Ok(None)` when the object has no variables part at all.
pub fn scan(object: Node<'_>, parts: &PartKinds) -> Result<Option<Vec<VariableMeta>>> {
    let path = format!(".//Part[@type='{}']", parts.variables);
    let Some(part) = xml::find_first(object, &path)? else {
        return Ok(None);
    };

    let mut variables = Vec::new();
    for node in xml::find_all(part, ".//Variable")? {
        variables.push(read_variable(node)?);
    }
    Ok(Some(variables))
}

fn read_variable(node: Node<'_>) -> Result<VariableMeta> {
    let mut meta = VariableMeta::default();
    let mut custom_type: Option<String> = None;
    let mut attribute_based = false;

    for prop in xml::find_all(node, "Properties/Property")? {
        let value = xml::text_at(prop, "Value")?;
        match xml::text_at(prop, "Name")?.as_str() {
            "IsParm" => meta.is_parm = value.eq_ignore_ascii_case("true"),
            "Name" => meta.name = value,
            "Description" => meta.description = value,
            "ATTCUSTOMTYPE" => custom_type = Some(clean_type(&value)),
            "idBasedOn" => attribute_based = value.starts_with(ATTRIBUTE_PREFIX),
            _ => {}
        }
    }

    if meta.name.is_empty() {
        meta.name = xml::attr(node, "Name").unwrap_or_default();
    }

    meta.type_name = match custom_type {
        Some(t) if t.starts_with(ATTRIBUTE_PREFIX) => UNKNOWN_TYPE.to_string(),
        Some(t) => t,
        None if attribute_based => UNKNOWN_TYPE.to_string(),
        None => String::new(),
    };

    Ok(meta)
}
