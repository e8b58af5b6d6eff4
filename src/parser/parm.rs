//! `parm(...)` rule parser.
//!
//! Reads the rules-part source of an object and turns its `parm` declaration
//! into a parameter list plus canonical call text:
//!
//! ```text
//! Parm(IN: &UserID,OUT:&UserName);   →   GetUser(in:&UserID, out:&UserName);
//! ```

use crate::model::*;
use regex::Regex;
use std::sync::LazyLock;

// The argument list may span several lines.
static RE_PARM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bparm\s*\(([^)]*)\)").unwrap());

static RE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(in|out|inout)\s*:\s*&(.+)$").unwrap());

static RE_DIRECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(in|out|inout)\s*:").unwrap());

static RE_COLON_AMP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":\s+&").unwrap());

static RE_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s*").unwrap());

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Parse the `parm(...)` declaration in `source` for the object `name`.
///
/// Returns `None` when no (uncommented) `parm` call exists. Segments that do
/// not look like `<direction>:&<name>` are dropped; they never fail the parse.
pub fn parse(source: &str, name: &str) -> Option<Signature> {
    let active = strip_line_comments(source);
    let caps = RE_PARM.captures(&active)?;
    let args = &caps[1];

    if args.trim().is_empty() {
        return Some(Signature::empty(name, ExtractionMode::ParmRule));
    }

    let parameters = args
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(parse_segment)
        .collect();

    Some(Signature {
        parameters,
        raw_signature: format!("{}({});", name, normalize_args(args)),
        mode: ExtractionMode::ParmRule,
    })
}

/// Drop every line whose trimmed content starts with `//`.
fn strip_line_comments(source: &str) -> String {
    source
        .lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `out : &Name` → `ParameterDoc { name: "Name", direction: Out }`.
fn parse_segment(segment: &str) -> Option<ParameterDoc> {
    let caps = RE_SEGMENT.captures(segment)?;
    let direction = caps[1].parse().ok()?;
    let name = caps[2].trim();
    if name.is_empty() {
        return None;
    }
    Some(ParameterDoc::new(name, direction))
}

/// Canonical spelling of an argument list: lower-case directions, no space
/// between `:` and `&`, exactly one space after each comma.
fn normalize_args(args: &str) -> String {
    let text = RE_WHITESPACE.replace_all(args, " ");
    let text = RE_DIRECTION.replace_all(&text, |caps: &regex::Captures| {
        format!("{}:", caps[1].to_lowercase())
    });
    let text = RE_COLON_AMP.replace_all(&text, ":&");
    let text = RE_COMMA.replace_all(&text, ", ");
    text.trim().to_string()
}
