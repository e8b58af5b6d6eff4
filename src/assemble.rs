//! Object assembly: merges the resolved signature, the annotation comment
//! and variable metadata into one documentation record per object.

use crate::model::*;
use crate::parser::annotation;
use crate::signature::{self, ObjectContext};
use crate::xml::{self, Node};
use crate::Config;
use std::collections::HashSet;

/// One `<Object>` as read from an export document.
pub struct RawObject<'d> {
    pub node: Node<'d>,
    /// Identifier (`name` attribute)
    pub name: String,
    /// Kind GUID (`type` attribute)
    pub kind: String,
    /// `description` attribute, possibly empty
    pub description: String,
}

/// Accumulates resolved objects for one run.
pub struct Assembler<'c> {
    config: &'c Config,
    seen: HashSet<(String, String)>,
    objects: Vec<ResolvedObject>,
    advisories: Vec<Advisory>,
}

impl<'c> Assembler<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self {
            config,
            seen: HashSet::new(),
            objects: Vec::new(),
            advisories: Vec::new(),
        }
    }

    /// Record a non-fatal problem that is not tied to one object.
    pub fn advise(&mut self, subject: &str, message: String) {
        tracing::warn!("{}: {}", subject, message);
        self.advisories.push(Advisory {
            subject: subject.to_string(),
            message,
        });
    }

    /// Resolve and add one object. Unknown kinds, containers and duplicates
    /// of an already-added `(name, kind)` are skipped.
    pub fn add(&mut self, raw: RawObject<'_>) {
        let Some(kind) = self.config.kinds.lookup(&raw.kind).cloned() else {
            tracing::debug!(object = %raw.name, kind = %raw.kind, "skipping unknown kind");
            return;
        };
        if kind.container {
            return;
        }
        if raw.name.is_empty() {
            self.advise("<unnamed>", format!("skipping unnamed {} object", kind.label));
            return;
        }
        let kind_key = raw.kind.trim().to_ascii_lowercase();
        if !self.seen.insert((raw.name.clone(), kind_key)) {
            tracing::debug!(object = %raw.name, "skipping duplicate object");
            return;
        }

        let object = self.resolve(raw, kind);
        self.objects.push(object);
    }

    fn resolve(&mut self, raw: RawObject<'_>, kind: ObjectKind) -> ResolvedObject {
        let config = self.config;
        let parts = &config.parts;

        let source_text = if kind.carries_source {
            let path = format!(".//Part[@type='{}']/Source", parts.source);
            xml::text_at(raw.node, &path).unwrap_or_else(|e| {
                self.advise(&raw.name, e.to_string());
                String::new()
            })
        } else {
            String::new()
        };

        let ctx = ObjectContext {
            node: raw.node,
            name: &raw.name,
            parts,
        };
        let mut signature = signature::resolve(&ctx, &mut self.advisories);

        if !signature.parameters.is_empty() {
            let parameters = std::mem::take(&mut signature.parameters);
            signature.parameters = match signature::enrich(parameters.clone(), raw.node, parts) {
                Ok(enriched) => enriched,
                Err(e) => {
                    self.advise(&raw.name, e.to_string());
                    parameters
                }
            };
        }

        let annotation = if source_text.is_empty() {
            None
        } else {
            annotation::parse(&source_text)
        };
        let documentation = merge_documentation(annotation, &signature);

        let name = if raw.description.is_empty() {
            raw.name.clone()
        } else {
            raw.description.clone()
        };

        ResolvedObject {
            name,
            kind,
            path: raw.name,
            source_text,
            signature,
            xml_description: raw.description,
            documentation,
        }
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Finish the run.
    pub fn finish(self, kb_name: String) -> Extraction {
        Extraction {
            kb_name,
            objects: self.objects,
            advisories: self.advisories,
        }
    }
}

/// Reconcile an annotation comment with the resolved (enriched) signature.
///
/// - no annotation, signature has parameters → auto-generated record
/// - annotation without `@param` tags → signature parameters grafted on
/// - otherwise the annotation is kept as written
pub fn merge_documentation(
    annotation: Option<DocComment>,
    signature: &Signature,
) -> Option<DocComment> {
    let resolved = &signature.parameters;
    match annotation {
        None if !resolved.is_empty() => Some(DocComment {
            parameters: resolved.clone(),
            is_auto_generated: true,
            ..Default::default()
        }),
        Some(mut doc) if doc.parameters.is_empty() && !resolved.is_empty() => {
            doc.parameters = resolved.clone();
            Some(doc)
        }
        other => other,
    }
}
