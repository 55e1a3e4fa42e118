//! Epsilon handling for transition symbols.
//!
//! Generated automata spell "no symbol" in many ways. All of them collapse to
//! the single canonical sentinel [`EPSILON`], the empty string.

use serde_json::Value;

/// The canonical epsilon sentinel.
pub const EPSILON: &str = "";

/// Symbol used when displaying an epsilon-move in a trace.
pub const EPSILON_DISPLAY: &str = "ε";

/// Spellings that are read as epsilon, after trimming.
pub const EPSILON_SPELLINGS: [&str; 4] = ["", "ε", "eps", "epsilon"];

/// Returns `true` if the symbol is the canonical epsilon sentinel.
pub fn is_epsilon(symbol: &str) -> bool {
    symbol == EPSILON
}

/// Canonicalizes a `read` or `pop` field.
///
/// Absent, `null`, and every spelling in [`EPSILON_SPELLINGS`] yield [`EPSILON`].
/// Numbers and booleans are read as their textual form. Arrays and objects
/// are mistyped and read as absent.
pub fn normalize_symbol(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => canonical(s),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => EPSILON.to_string(),
    }
}

/// Canonicalizes a `push` field into a list of stack symbols, as written.
/// The first symbol of the list ends on top of the stack.
///
/// A string is exploded into one symbol per character (spaces and `ε`
/// dropped). A list keeps its non-epsilon entries in order.
pub fn normalize_push(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| normalize_symbol(Some(item)))
            .filter(|s| !is_epsilon(s))
            .collect(),
        Some(Value::String(s)) => {
            let s = canonical(s);
            s.chars()
                .filter(|&c| c != ' ' && c != 'ε')
                .map(String::from)
                .collect()
        }
        _ => Vec::new(),
    }
}

fn canonical(s: &str) -> String {
    let s = s.trim();
    if EPSILON_SPELLINGS.contains(&s) {
        EPSILON.to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_log::test;

    use super::*;

    #[test]
    fn test_epsilon_spellings_are_equivalent() {
        let spellings = [json!(null), json!(""), json!("ε"), json!("eps"), json!("epsilon"), json!("  ε ")];
        for value in &spellings {
            assert_eq!(normalize_symbol(Some(value)), EPSILON, "spelling {value}");
        }
        assert_eq!(normalize_symbol(None), EPSILON);
    }

    #[test]
    fn test_plain_symbols_survive() {
        assert_eq!(normalize_symbol(Some(&json!("a"))), "a");
        assert_eq!(normalize_symbol(Some(&json!(" Z "))), "Z");
        assert_eq!(normalize_symbol(Some(&json!(0))), "0");
        assert_eq!(normalize_symbol(Some(&json!(["a"]))), EPSILON);
    }

    #[test]
    fn test_push_string_is_exploded() {
        assert_eq!(normalize_push(Some(&json!("AZ"))), vec!["A", "Z"]);
        assert_eq!(normalize_push(Some(&json!("A Z"))), vec!["A", "Z"]);
        assert!(normalize_push(Some(&json!("ε"))).is_empty());
        assert!(normalize_push(Some(&json!("epsilon"))).is_empty());
    }

    #[test]
    fn test_push_list_drops_epsilon_entries() {
        assert_eq!(normalize_push(Some(&json!(["A", "", "ε", "Z"]))), vec!["A", "Z"]);
        assert!(normalize_push(Some(&json!([]))).is_empty());
        assert!(normalize_push(None).is_empty());
        assert!(normalize_push(Some(&json!(42))).is_empty());
    }
}
