//! Path-based lookup over a parsed XML document.
//!
//! Wraps `sxd-document` / `sxd-xpath` so the rest of the crate never touches
//! raw markup. Paths are XPath 1.0 expressions evaluated relative to the node
//! they are given, so `.//Part` stays inside the object subtree it was asked
//! about. "Not found" is `None` or an empty `Vec`, never an error.

use crate::error::{ExtractError, Result};
use sxd_document::{parser, Package};
use sxd_xpath::{Context, Factory, Value};

pub use sxd_xpath::nodeset::Node;

/// An owned, parsed XML document.
pub struct XmlDocument {
    package: Package,
}

impl XmlDocument {
    /// Parse XML text. A leading byte-order mark is ignored.
    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        parser::parse(text)
            .map(|package| Self { package })
            .map_err(|e| format!("{:?}", e))
    }

    /// The document root (parent of the document element).
    pub fn root(&self) -> Node<'_> {
        self.package.as_document().root().into()
    }
}

/// All nodes matching `path` under `node`, in document order.
pub fn find_all<'d>(node: Node<'d>, path: &str) -> Result<Vec<Node<'d>>> {
    let query_error = |message: String| ExtractError::Query {
        path: path.to_string(),
        message,
    };

    let xpath = Factory::new()
        .build(path)
        .map_err(|e| query_error(e.to_string()))?
        .ok_or_else(|| query_error("empty expression".to_string()))?;
    let context = Context::new();
    let value = xpath
        .evaluate(&context, node)
        .map_err(|e| query_error(e.to_string()))?;

    match value {
        Value::Nodeset(nodes) => Ok(nodes.document_order()),
        // Boolean/number/string results select no nodes
        _ => Ok(Vec::new()),
    }
}

/// First node (in document order) matching `path` under `node`.
pub fn find_first<'d>(node: Node<'d>, path: &str) -> Result<Option<Node<'d>>> {
    Ok(find_all(node, path)?.into_iter().next())
}

/// Trimmed value of attribute `name` on `node`.
pub fn attr(node: Node<'_>, name: &str) -> Option<String> {
    find_first(node, &format!("@{}", name))
        .ok()
        .flatten()
        .map(|a| a.string_value().trim().to_string())
}

/// Trimmed text content of `node` (all descendant text, CDATA included).
pub fn text(node: Node<'_>) -> String {
    node.string_value().trim().to_string()
}

/// Trimmed text of the first match of `path`, or an empty string.
pub fn text_at(node: Node<'_>, path: &str) -> Result<String> {
    Ok(find_first(node, path)?.map(text).unwrap_or_default())
}
