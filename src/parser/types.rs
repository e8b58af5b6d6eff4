//! Type-name normalization for `ATTCUSTOMTYPE` values.

/// Marker prefix for types derived from an attribute reference.
pub const ATTRIBUTE_PREFIX: &str = "Attribute:";

/// Placeholder type for attribute-derived variables (real type not exported).
pub const UNKNOWN_TYPE: &str = "-";

/// Strip namespace qualifiers from a raw type name.
///
/// `bas:Boolean` → `Boolean`, `sdt:Messages, GeneXus.Common` → `Messages`.
/// `Attribute:...` is returned unchanged; mapping it to [`UNKNOWN_TYPE`] is
/// the caller's job.
///
/// Nested qualifiers (`a:b:c`) are stripped until none is left, so the result
/// is always a fixed point: `clean_type(&clean_type(x)) == clean_type(x)`.
pub fn clean_type(raw: &str) -> String {
    let mut current = raw.trim();
    while let Some(next) = strip_qualifier(current) {
        current = next;
    }
    current.to_string()
}

/// One normalization step; `None` when `raw` is already bare.
fn strip_qualifier(raw: &str) -> Option<&str> {
    if raw.starts_with(ATTRIBUTE_PREFIX) {
        return None;
    }
    let (_, rest) = raw.split_once(':')?;
    let name = match rest.split_once(',') {
        Some((name, _)) => name,
        None => rest,
    };
    Some(name.trim())
}
