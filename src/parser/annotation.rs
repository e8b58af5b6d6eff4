//! `/** ... */` annotation comment parser.
//!
//! Only the first block in the source is read. Inside it, every line that
//! starts with `@` is a tag; free text between tags is ignored.
//!
//! ```text
//! /**
//!  * @package users
//!  * @summary Get user by id
//!  * @param UserID IN Numeric - The user identifier
//!  */
//! ```

use crate::model::*;
use regex::Regex;
use std::sync::LazyLock;

static RE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*\*\s*(.*?)\s*\*/").unwrap());

/// Parse the first annotation block in `source`.
///
/// Returns `None` when the source has no `/** ... */` block; that is the
/// common case, not an error.
pub fn parse(source: &str) -> Option<DocComment> {
    let caps = RE_BLOCK.captures(source)?;
    let mut doc = DocComment::default();

    for line in caps[1].lines().map(clean_line) {
        if line.starts_with('@') {
            apply_tag(&mut doc, line);
        }
    }

    Some(doc)
}

/// Strip surrounding whitespace and one leading `*`.
fn clean_line(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix('*').unwrap_or(line).trim()
}

fn apply_tag(doc: &mut DocComment, line: &str) {
    let (tag, value) = match line.split_once(char::is_whitespace) {
        Some((tag, value)) => (tag, value.trim()),
        None => (line, ""),
    };
    let text = || Some(value.to_string());

    match tag {
        "@package" => doc.package = text(),
        "@summary" => doc.summary = text(),
        "@description" => doc.description = text(),
        "@author" => doc.author = text(),
        "@created" => doc.created = text(),
        "@return" => doc.return_doc = text(),
        "@tag" => doc.tags.push(value.to_string()),
        "@deprecated" => {
            doc.deprecated = true;
            doc.deprecation_note = (!value.is_empty()).then(|| value.to_string());
        }
        "@param" => {
            if let Some(param) = parse_param(value) {
                doc.parameters.push(param);
            }
        }
        // Unknown tags are tolerated
        _ => {}
    }
}

/// Parse the remainder of a `@param` tag.
///
/// Format: `Name [IN|OUT|INOUT] [Type] [- Description]`. When the second
/// token is not a direction it is the type and the direction defaults to IN.
/// Fewer than two tokens drops the tag.
fn parse_param(value: &str) -> Option<ParameterDoc> {
    let (head, description) = match value.split_once(" - ") {
        Some((head, description)) => (head, description.trim()),
        None => (value, ""),
    };

    let tokens: Vec<&str> = head.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }

    let (direction, type_name) = match tokens[1].parse::<Direction>() {
        Ok(direction) => (direction, tokens.get(2).copied().unwrap_or_default()),
        Err(()) => (Direction::In, tokens[1]),
    };

    Some(ParameterDoc {
        name: tokens[0].to_string(),
        direction,
        type_name: type_name.to_string(),
        description: description.to_string(),
    })
}
