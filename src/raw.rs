//! Lenient readers over raw automaton documents.
//!
//! Oracle output is untrusted: any field may be missing, `null`, or of the
//! wrong type. These readers never fail; a mistyped field reads as absent.

use indexmap::IndexSet;
use serde_json::{Map, Value};

/// Reads a scalar as a trimmed, non-empty name.
///
/// Numbers are accepted and read as their textual form, so `0` names the
/// same state as `"0"`.
pub fn name(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Reads `raw[key]` as a name.
pub fn string(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(name)
}

/// Reads `raw[key]` as free text, keeping it verbatim.
pub fn text(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Reads `raw[key]` as a list of names, deduplicated in first-seen order.
///
/// Returns `None` when the key is absent or not a list. Entries that are not
/// names are skipped.
pub fn string_list(raw: &Value, key: &str) -> Option<Vec<String>> {
    let items = raw.get(key)?.as_array()?;
    Some(dedup(items.iter().filter_map(name)))
}

/// Reads `raw[key]` as a list of names, a single name standing for a
/// one-element list.
///
/// Returns `None` only when the key is absent or `null`. Any other mistyped
/// value reads as the empty list.
pub fn name_list(raw: &Value, key: &str) -> Option<Vec<String>> {
    match raw.get(key)? {
        Value::Null => None,
        Value::Array(_) => string_list(raw, key),
        scalar => Some(name(scalar).into_iter().collect()),
    }
}

/// Reads `raw[key]` as an object.
pub fn object<'a>(raw: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    raw.get(key).and_then(Value::as_object)
}

/// Removes duplicates, keeping the first occurrence of each name.
pub fn dedup(names: impl IntoIterator<Item = String>) -> Vec<String> {
    names.into_iter().collect::<IndexSet<_>>().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_string_list_dedup_preserves_order() {
        let raw = json!({ "states": ["q1", "q0", "q1", "", 7, null, "q0"] });
        assert_eq!(string_list(&raw, "states"), Some(vec!["q1".to_string(), "q0".to_string(), "7".to_string()]));
    }

    #[test]
    fn test_mistyped_fields_read_as_absent() {
        let raw = json!({ "states": "q0", "start_state": ["q0"], "transitions": [] });
        assert_eq!(string_list(&raw, "states"), None);
        assert_eq!(string(&raw, "start_state"), None);
        assert!(object(&raw, "transitions").is_none());
        assert_eq!(string(&raw, "missing"), None);
    }

    #[test]
    fn test_name_list_promotes_scalars() {
        let raw = json!({ "a": "q1", "b": 3, "c": ["q1", "q1"], "d": { "q1": true }, "e": null, "f": "  " });
        assert_eq!(name_list(&raw, "a"), Some(vec!["q1".to_string()]));
        assert_eq!(name_list(&raw, "b"), Some(vec!["3".to_string()]));
        assert_eq!(name_list(&raw, "c"), Some(vec!["q1".to_string()]));
        assert_eq!(name_list(&raw, "d"), Some(vec![]));
        assert_eq!(name_list(&raw, "e"), None);
        assert_eq!(name_list(&raw, "f"), Some(vec![]));
        assert_eq!(name_list(&raw, "missing"), None);
    }

    #[test]
    fn test_text_is_verbatim() {
        let raw = json!({ "explanation": "  even length  " });
        assert_eq!(text(&raw, "explanation").as_deref(), Some("  even length  "));
        assert_eq!(text(&raw, "logic"), None);
    }
}
