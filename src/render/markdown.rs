//! GitHub-flavored markdown renderer.
//!
//! Produces one page per procedure, one index page per `@package`, and a
//! knowledge-base overview page. Groupings are sorted so repeated runs over
//! the same export give identical output.

use crate::model::*;
use crate::render::{sanitize_file_name, OutputFile, Renderer};
use std::collections::BTreeMap;

pub struct MarkdownRenderer;

const AUTO_GENERATED_NOTICE: &str =
    "*Auto-generated from XML metadata. Add `/** */` annotations for detailed documentation.*";

impl Renderer for MarkdownRenderer {
    fn render(&self, extraction: &Extraction) -> Vec<OutputFile> {
        let procedures: Vec<&ResolvedObject> = extraction
            .objects
            .iter()
            .filter(|o| o.kind.carries_source)
            .collect();

        let mut files: Vec<OutputFile> = procedures
            .iter()
            .map(|proc| OutputFile {
                name: format!("{}.md", sanitize_file_name(&proc.path)),
                contents: render_procedure(proc),
            })
            .collect();

        let packages = group_by_package(&procedures);
        for (package, members) in &packages {
            files.push(OutputFile {
                name: format!("{}.md", package),
                contents: render_package(package, members),
            });
        }

        let index_name = if extraction.kb_name.is_empty() {
            "README".to_string()
        } else {
            sanitize_file_name(&extraction.kb_name)
        };
        files.push(OutputFile {
            name: format!("{}.md", index_name),
            contents: render_index(extraction, &packages),
        });

        files
    }
}

/// Package file name for a procedure (`root` when undeclared).
fn package_of(proc: &ResolvedObject) -> String {
    let declared = proc
        .documentation
        .as_ref()
        .and_then(|d| d.package.as_deref())
        .unwrap_or_default();
    sanitize_file_name(declared)
}

fn group_by_package<'a>(
    procedures: &[&'a ResolvedObject],
) -> BTreeMap<String, Vec<&'a ResolvedObject>> {
    let mut packages: BTreeMap<String, Vec<&ResolvedObject>> = BTreeMap::new();
    for &proc in procedures {
        packages.entry(package_of(proc)).or_default().push(proc);
    }
    packages
}

/// Render the page of a single procedure.
fn render_procedure(proc: &ResolvedObject) -> String {
    let doc = proc.documentation.as_ref();
    let mut lines: Vec<String> = Vec::new();

    let title = doc
        .and_then(|d| d.summary.as_deref())
        .unwrap_or(&proc.name);
    lines.push(format!("# {}\n", title));

    if let Some(package) = doc.and_then(|d| d.package.as_deref()) {
        lines.push(format!(
            "**Package:** [`{}`](./{}.md)\n",
            package,
            sanitize_file_name(package)
        ));
    }

    lines.push("## Signature\n".to_string());
    lines.push("```genexus".to_string());
    lines.push(proc.signature.raw_signature.clone());
    lines.push("```\n".to_string());

    if let Some(d) = doc.filter(|d| d.deprecated) {
        match d.deprecation_note.as_deref() {
            Some(note) => lines.push(format!("> **DEPRECATED**: {}\n", note)),
            None => lines.push("> **DEPRECATED**\n".to_string()),
        }
    }

    let description = doc
        .and_then(|d| d.description.as_deref())
        .or_else(|| Some(proc.xml_description.as_str()).filter(|s| !s.is_empty()));
    if let Some(description) = description {
        lines.push("## Description\n".to_string());
        lines.push(format!("{}\n", description));
    }

    if let Some(d) = doc.filter(|d| !d.parameters.is_empty()) {
        lines.push("## Parameters\n".to_string());
        lines.push("| Name | Direction | Type | Description |".to_string());
        lines.push("|------|-----------|------|-------------|".to_string());
        for p in &d.parameters {
            lines.push(format!(
                "| {} | {} | {} | {} |",
                cell(&p.name),
                p.direction,
                cell(&p.type_name),
                cell(&p.description)
            ));
        }
        lines.push(String::new());
    }

    if let Some(ret) = doc.and_then(|d| d.return_doc.as_deref()) {
        lines.push("## Return\n".to_string());
        lines.push(format!("{}\n", ret));
    }

    if let Some(d) = doc.filter(|d| !d.tags.is_empty()) {
        let tags: Vec<String> = d.tags.iter().map(|t| format!("`{}`", t)).collect();
        lines.push(format!("**Tags:** {}\n", tags.join(" ")));
    }

    lines.push("---\n".to_string());
    match doc {
        Some(d) if d.is_auto_generated => lines.push(format!("{}\n", AUTO_GENERATED_NOTICE)),
        Some(d) => {
            if let Some(author) = d.author.as_deref() {
                lines.push(format!("**Author:** {}  ", author));
            }
            if let Some(created) = d.created.as_deref() {
                lines.push(format!("**Created:** {}  ", created));
            }
        }
        None => {}
    }
    lines.push(footer());

    lines.join("\n")
}

/// Render the index page of one package.
fn render_package(package: &str, members: &[&ResolvedObject]) -> String {
    let mut lines = vec![
        format!("# Package: {}\n", package),
        "## Procedures\n".to_string(),
        "| Procedure | Summary |".to_string(),
        "|-----------|---------|".to_string(),
    ];
    for proc in members {
        let summary = proc
            .documentation
            .as_ref()
            .and_then(|d| d.summary.as_deref())
            .unwrap_or(&proc.name);
        lines.push(format!(
            "| [{}](./{}.md) | {} |",
            proc.path,
            sanitize_file_name(&proc.path),
            cell(summary)
        ));
    }
    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(footer());
    lines.join("\n")
}

/// Render the knowledge-base overview page.
fn render_index(
    extraction: &Extraction,
    packages: &BTreeMap<String, Vec<&ResolvedObject>>,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    if extraction.kb_name.is_empty() {
        lines.push("# GeneXus Documentation\n".to_string());
    } else {
        lines.push(format!("# {} Documentation\n", extraction.kb_name));
    }
    lines.push(format!(
        "Total Objects: **{}**\n",
        extraction.objects.len()
    ));

    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for obj in &extraction.objects {
        *kinds.entry(obj.kind.label.as_str()).or_default() += 1;
    }
    if !kinds.is_empty() {
        lines.push("## Object Statistics\n".to_string());
        lines.push("| Type | Count |".to_string());
        lines.push("|------|-------|".to_string());
        for (kind, count) in &kinds {
            lines.push(format!("| {} | {} |", kind, count));
        }
        lines.push(String::new());
    }

    if !packages.is_empty() {
        lines.push("## Packages\n".to_string());
        lines.push("| Package | Procedures |".to_string());
        lines.push("|---------|------------|".to_string());
        for (package, members) in packages {
            lines.push(format!(
                "| [{}](./{}.md) | {} |",
                package,
                package,
                members.len()
            ));
        }
        lines.push(String::new());
    }

    lines.push("## Extracted Objects\n".to_string());
    if extraction.objects.is_empty() {
        lines.push("*No objects found in the export.*".to_string());
    } else {
        lines.push("| Name | Type | Path |".to_string());
        lines.push("|------|------|------|".to_string());
        for obj in &extraction.objects {
            lines.push(format!(
                "| {} | {} | `{}` |",
                cell(&obj.name),
                obj.kind.label,
                obj.path
            ));
        }
    }

    let undocumented = extraction
        .objects
        .iter()
        .filter(|o| o.kind.carries_source && o.documentation.is_none())
        .count();
    if undocumented > 0 {
        lines.push(String::new());
        lines.push(format!(
            "*{} procedure(s) have no `/** */` documentation comments.*",
            undocumented
        ));
    }

    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(footer());
    lines.join("\n")
}

fn footer() -> String {
    format!("*Generated by gxdoc v{}*\n", env!("CARGO_PKG_VERSION"))
}

/// Table cell text: `-` for empty, pipes escaped.
fn cell(text: &str) -> String {
    if text.is_empty() {
        "-".to_string()
    } else {
        text.replace('|', "\\|")
    }
}
