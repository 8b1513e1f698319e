use indexmap::IndexMap;
use serde_json::Value;

use crate::color::Color;

/// Ordered key-value bag of one persisted object, as the host stores it.
pub type PropertyBag = IndexMap<String, Value>;

const NUMBER_TOLERANCE: f64 = 1e-6;

/// Whether a stored value already equals a computed one.
///
/// Numbers compare within a small tolerance (the host round-trips them
/// through doubles) and `#`-prefixed colour strings compare by parsed value.
pub fn values_match(stored: &Value, computed: &Value) -> bool {
    match (stored, computed) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => (a - b).abs() <= NUMBER_TOLERANCE,
            _ => a == b,
        },
        (Value::String(a), Value::String(b))
            if a != b && a.starts_with('#') && b.starts_with('#') =>
        {
            match (Color::parse(a), Color::parse(b)) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            }
        }
        _ => stored == computed,
    }
}

pub fn get_str<'a>(bag: &'a PropertyBag, key: &str) -> Option<&'a str> {
    bag.get(key).and_then(Value::as_str)
}

pub fn get_f64(bag: &PropertyBag, key: &str) -> Option<f64> {
    bag.get(key).and_then(Value::as_f64)
}

pub fn get_bool(bag: &PropertyBag, key: &str) -> bool {
    bag.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Host values rendered as tile text; `null` means absent.
pub fn value_to_text(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_match_within_tolerance() {
        assert!(values_match(&json!(0.1 + 0.2), &json!(0.3)));
        assert!(values_match(&json!(2), &json!(2.0)));
        assert!(!values_match(&json!(2), &json!(2.01)));
    }

    #[test]
    fn colours_match_by_value() {
        assert!(values_match(&json!("#fff"), &json!("#FFFFFF")));
        assert!(!values_match(&json!("#fff"), &json!("#FFFFFE")));
        assert!(!values_match(&json!("left"), &json!("right")));
        assert!(!values_match(&json!(true), &json!("true")));
    }

    #[test]
    fn plain_text_compares_exactly() {
        assert!(!values_match(&json!("Bad"), &json!("BAD")));
        assert!(!values_match(&json!("fed"), &json!("#FFEEDD")));
        assert!(values_match(&json!("Bad"), &json!("Bad")));
    }

    #[test]
    fn text_values_skip_null() {
        assert_eq!(value_to_text(&Value::Null), None);
        assert_eq!(value_to_text(&json!("A")).as_deref(), Some("A"));
        assert_eq!(value_to_text(&json!(12)).as_deref(), Some("12"));
    }
}
