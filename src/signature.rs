//! Signature resolution with tiered fallback.
//!
//! Export formats evolved over time, so a procedure's parameters can come
//! from two places. Strategies are tried in order and the first one that
//! produces a signature wins:
//!
//! 1. `parm(...)` in the rules part (authoritative)
//! 2. variables flagged `IsParm` (legacy exports)
//! 3. an empty `Name();` signature (always succeeds)
//!
//! A strategy that cannot read its input degrades to the next one and leaves
//! an [`Advisory`] behind.

use crate::error::Result;
use crate::kinds::PartKinds;
use crate::model::*;
use crate::parser::parm;
use crate::variables::{self, VariableMeta};
use crate::xml::{self, Node};
use std::collections::HashMap;

/// One object handed to the resolver.
pub struct ObjectContext<'a, 'd> {
    pub node: Node<'d>,
    /// Identifier used in the call text
    pub name: &'a str,
    pub parts: &'a PartKinds,
}

type Strategy = fn(&ObjectContext<'_, '_>) -> Result<Option<Signature>>;

const STRATEGIES: &[Strategy] = &[from_parm_rule, from_is_parm];

/// Resolve the signature of one object.
pub fn resolve(ctx: &ObjectContext<'_, '_>, advisories: &mut Vec<Advisory>) -> Signature {
    for strategy in STRATEGIES {
        match strategy(ctx) {
            Ok(Some(signature)) => {
                tracing::debug!(
                    object = ctx.name,
                    mode = %signature.mode,
                    parameters = signature.parameters.len(),
                    "resolved signature"
                );
                return signature;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(object = ctx.name, "signature strategy failed: {}", e);
                advisories.push(Advisory {
                    subject: ctx.name.to_string(),
                    message: e.to_string(),
                });
            }
        }
    }
    Signature::empty(ctx.name, ExtractionMode::None)
}

fn from_parm_rule(ctx: &ObjectContext<'_, '_>) -> Result<Option<Signature>> {
    let path = format!(".//Part[@type='{}']/Source", ctx.parts.rules);
    let source = xml::text_at(ctx.node, &path)?;
    if source.is_empty() {
        return Ok(None);
    }
    Ok(parm::parse(&source, ctx.name))
}

fn from_is_parm(ctx: &ObjectContext<'_, '_>) -> Result<Option<Signature>> {
    let Some(vars) = variables::scan(ctx.node, ctx.parts)? else {
        return Ok(None);
    };

    let parameters: Vec<ParameterDoc> = vars
        .into_iter()
        .filter(|v| v.is_parm && !v.name.is_empty())
        .map(|v| ParameterDoc {
            name: v.name,
            // Variables carry no direction
            direction: Direction::In,
            type_name: v.type_name,
            description: v.description,
        })
        .collect();

    if parameters.is_empty() {
        return Ok(None);
    }

    Ok(Some(Signature {
        raw_signature: build_raw_signature(ctx.name, &parameters),
        parameters,
        mode: ExtractionMode::IsParm,
    }))
}

/// `Name(in:&A, out:&B);` from a parameter list.
pub fn build_raw_signature(name: &str, parameters: &[ParameterDoc]) -> String {
    let args = parameters
        .iter()
        .map(|p| format!("{}:&{}", p.direction.keyword(), p.name))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({});", name, args)
}

/// Fill empty types and descriptions from the object's variables.
pub fn enrich(
    parameters: Vec<ParameterDoc>,
    object: Node<'_>,
    parts: &PartKinds,
) -> Result<Vec<ParameterDoc>> {
    match variables::scan(object, parts)? {
        Some(vars) => Ok(enrich_from(parameters, &vars)),
        None => Ok(parameters),
    }
}

/// Fill empty fields from `vars`, keyed by name (the last variable with a
/// given name wins). Non-empty fields are never overwritten.
pub fn enrich_from(mut parameters: Vec<ParameterDoc>, vars: &[VariableMeta]) -> Vec<ParameterDoc> {
    let lookup: HashMap<&str, &VariableMeta> = vars
        .iter()
        .filter(|v| !v.name.is_empty())
        .map(|v| (v.name.as_str(), v))
        .collect();

    for param in &mut parameters {
        let Some(meta) = lookup.get(param.name.as_str()) else {
            continue;
        };
        if param.type_name.is_empty() {
            param.type_name = meta.type_name.clone();
        }
        if param.description.is_empty() {
            param.description = meta.description.clone();
        }
    }
    parameters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlDocument;

    const RULES: &str = "9b0a32a3-de6d-4be1-a4dd-1b85d3741534";
    const VARS: &str = "e4c4ade7-53f0-4a56-bdfd-843735b66f47";

    fn resolve_xml(xml: &str, name: &str) -> (Signature, Vec<Advisory>) {
        let doc = XmlDocument::parse(xml).unwrap();
        let parts = PartKinds::default();
        let ctx = ObjectContext {
            node: doc.root(),
            name,
            parts: &parts,
        };
        let mut advisories = Vec::new();
        let sig = resolve(&ctx, &mut advisories);
        (sig, advisories)
    }

    fn variable(name: &str, is_parm: bool, custom_type: &str) -> String {
        format!(
            r#"<Variable Name="{name}"><Properties>
  <Property><Name>IsParm</Name><Value>{is_parm}</Value></Property>
  <Property><Name>Name</Name><Value>{name}</Value></Property>
  <Property><Name>ATTCUSTOMTYPE</Name><Value>{custom_type}</Value></Property>
</Properties></Variable>"#
        )
    }

    fn meta(name: &str, type_name: &str, description: &str) -> VariableMeta {
        VariableMeta {
            name: name.to_string(),
            is_parm: false,
            type_name: type_name.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn parm_rule_scenario() {
        let xml = format!(
            r#"<Object><Part type="{RULES}"><Source><![CDATA[Parm(in:&UserID, out:&UserName);]]></Source></Part></Object>"#
        );
        let (sig, advisories) = resolve_xml(&xml, "GetUser");
        assert!(advisories.is_empty());
        assert_eq!(sig.mode, ExtractionMode::ParmRule);
        assert_eq!(sig.parameters.len(), 2);
        assert_eq!(sig.parameters[0].name, "UserID");
        assert_eq!(sig.parameters[0].direction, Direction::In);
        assert_eq!(sig.parameters[1].name, "UserName");
        assert_eq!(sig.parameters[1].direction, Direction::Out);
        assert_eq!(sig.raw_signature, "GetUser(in:&UserID, out:&UserName);");
    }

    #[test]
    fn is_parm_scenario() {
        let xml = format!(
            r#"<Object><Part type="{VARS}">{}{}</Part></Object>"#,
            variable("UserID", true, "bas:Numeric"),
            variable("Scratch", false, "bas:Character"),
        );
        let (sig, _) = resolve_xml(&xml, "GetUser");
        assert_eq!(sig.mode, ExtractionMode::IsParm);
        assert_eq!(sig.parameters.len(), 1);
        let p = &sig.parameters[0];
        assert_eq!(
            (p.name.as_str(), p.direction, p.type_name.as_str()),
            ("UserID", Direction::In, "Numeric")
        );
        assert_eq!(sig.raw_signature, "GetUser(in:&UserID);");
    }

    #[test]
    fn is_parm_keeps_encounter_order() {
        let xml = format!(
            r#"<Object><Part type="{VARS}">{}{}</Part></Object>"#,
            variable("B", true, "bas:Numeric"),
            variable("A", true, "bas:Character"),
        );
        let (sig, _) = resolve_xml(&xml, "P");
        assert_eq!(sig.raw_signature, "P(in:&B, in:&A);");
    }

    #[test]
    fn none_scenario() {
        let (sig, _) = resolve_xml("<Object></Object>", "DoSomething");
        assert_eq!(sig.mode, ExtractionMode::None);
        assert!(sig.parameters.is_empty());
        assert_eq!(sig.raw_signature, "DoSomething();");
    }

    #[test]
    fn variables_without_flags_fall_through() {
        let xml = format!(
            r#"<Object><Part type="{VARS}">{}</Part></Object>"#,
            variable("Scratch", false, "bas:Character"),
        );
        let (sig, _) = resolve_xml(&xml, "P");
        assert_eq!(sig.mode, ExtractionMode::None);
    }

    #[test]
    fn parm_rule_wins_over_is_parm() {
        let xml = format!(
            r#"<Object>
  <Part type="{RULES}"><Source><![CDATA[Parm(out:&Total);]]></Source></Part>
  <Part type="{VARS}">{}</Part>
</Object>"#,
            variable("UserID", true, "bas:Numeric"),
        );
        let (sig, _) = resolve_xml(&xml, "P");
        assert_eq!(sig.mode, ExtractionMode::ParmRule);
        assert_eq!(sig.parameters[0].name, "Total");
    }

    #[test]
    fn commented_rule_falls_back() {
        let xml = format!(
            r#"<Object><Part type="{RULES}"><Source><![CDATA[// Parm(in:&X);]]></Source></Part></Object>"#
        );
        let (sig, _) = resolve_xml(&xml, "P");
        assert_eq!(sig.mode, ExtractionMode::None);

        let xml = format!(
            r#"<Object>
  <Part type="{RULES}"><Source><![CDATA[// Parm(in:&X);]]></Source></Part>
  <Part type="{VARS}">{}</Part>
</Object>"#,
            variable("Y", true, "bas:Numeric"),
        );
        let (sig, _) = resolve_xml(&xml, "P");
        assert_eq!(sig.mode, ExtractionMode::IsParm);
    }

    #[test]
    fn broken_part_kind_degrades_with_advisory() {
        let parts = PartKinds {
            rules: "bad'kind".to_string(),
            ..PartKinds::default()
        };
        let doc = XmlDocument::parse("<Object/>").unwrap();
        let ctx = ObjectContext {
            node: doc.root(),
            name: "P",
            parts: &parts,
        };
        let mut advisories = Vec::new();
        let sig = resolve(&ctx, &mut advisories);
        assert_eq!(sig.mode, ExtractionMode::None);
        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].subject, "P");
    }

    #[test]
    fn enrich_fills_empty_fields() {
        let params = vec![
            ParameterDoc::new("UserID", Direction::In),
            ParameterDoc::new("IsActive", Direction::Out),
            ParameterDoc::new("Unknown", Direction::In),
        ];
        let vars = [
            meta("UserID", "Numeric", "User identifier"),
            meta("IsActive", "Boolean", "Active status"),
        ];
        let enriched = enrich_from(params, &vars);
        assert_eq!(enriched[0].type_name, "Numeric");
        assert_eq!(enriched[0].description, "User identifier");
        assert_eq!(enriched[1].type_name, "Boolean");
        assert_eq!(enriched[2], ParameterDoc::new("Unknown", Direction::In));
    }

    #[test]
    fn enrich_never_overwrites() {
        let mut p = ParameterDoc::new("UserID", Direction::In);
        p.type_name = "sdtUser".to_string();
        p.description = "From the annotation".to_string();
        let vars = [meta("UserID", "Numeric", "From metadata")];
        let enriched = enrich_from(vec![p.clone()], &vars);
        assert_eq!(enriched, vec![p]);
    }

    #[test]
    fn enrich_is_idempotent() {
        let params = vec![ParameterDoc::new("A", Direction::In)];
        let vars = [meta("A", "Numeric", "first"), meta("A", "Character", "last")];
        let once = enrich_from(params, &vars);
        let twice = enrich_from(once.clone(), &vars);
        assert_eq!(once, twice);
        // Last duplicate wins
        assert_eq!(once[0].type_name, "Character");
    }

    #[test]
    fn enrich_from_xml() {
        let xml = format!(
            r#"<Object><Part type="{VARS}">{}</Part></Object>"#,
            variable("UserID", false, "bas:Numeric"),
        );
        let doc = XmlDocument::parse(&xml).unwrap();
        let params = vec![ParameterDoc::new("UserID", Direction::In)];
        let enriched = enrich(params, doc.root(), &PartKinds::default()).unwrap();
        assert_eq!(enriched[0].type_name, "Numeric");
    }
}
