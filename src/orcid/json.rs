//! Safe navigation over loosely typed registry JSON.
//!
//! Registry records are sparsely and inconsistently populated. Every step
//! here yields `None` for a missing key, `null`, or a value of the wrong
//! shape instead of failing.

use serde_json::Value;

/// Follows `keys` through nested objects.
///
/// Returns `None` as soon as a step is not an object or lacks the key.
/// A `null` leaf is reported as `None`.
#[must_use]
pub fn lookup<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in keys {
        current = current.as_object()?.get(*key)?;
    }
    if current.is_null() { None } else { Some(current) }
}

/// Returns the array at `keys`, or an empty slice when absent or not an array.
#[must_use]
pub fn array_at<'a>(value: &'a Value, keys: &[&str]) -> &'a [Value] {
    lookup(value, keys)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Renders a scalar leaf as text.
///
/// Strings are returned as-is; numbers and booleans use their JSON text.
/// `null`, arrays and objects are absent.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Convenience for `lookup` followed by `scalar_text`.
#[must_use]
pub fn text_at(value: &Value, keys: &[&str]) -> Option<String> {
    lookup(value, keys).and_then(scalar_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested_present() {
        let doc = json!({"a": {"b": {"c": 1}}});
        assert_eq!(lookup(&doc, &["a", "b", "c"]), Some(&json!(1)));
    }

    #[test]
    fn test_lookup_missing_key_is_none() {
        let doc = json!({"a": {}});
        assert_eq!(lookup(&doc, &["a", "b"]), None);
    }

    #[test]
    fn test_lookup_through_null_is_none() {
        let doc = json!({"a": null});
        assert_eq!(lookup(&doc, &["a", "b"]), None);
        assert_eq!(lookup(&doc, &["a"]), None);
    }

    #[test]
    fn test_lookup_through_wrong_type_is_none() {
        let doc = json!({"a": "string", "b": [1, 2]});
        assert_eq!(lookup(&doc, &["a", "x"]), None);
        assert_eq!(lookup(&doc, &["b", "0"]), None);
    }

    #[test]
    fn test_lookup_empty_path_returns_root() {
        let doc = json!({"a": 1});
        assert_eq!(lookup(&doc, &[]), Some(&doc));
    }

    #[test]
    fn test_array_at_non_array_is_empty() {
        let doc = json!({"list": {"not": "array"}, "gone": null});
        assert!(array_at(&doc, &["list"]).is_empty());
        assert!(array_at(&doc, &["gone"]).is_empty());
        assert!(array_at(&doc, &["missing"]).is_empty());
    }

    #[test]
    fn test_array_at_returns_elements_in_order() {
        let doc = json!({"list": [1, 2, 3]});
        assert_eq!(array_at(&doc, &["list"]), &[json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_scalar_text_variants() {
        assert_eq!(scalar_text(&json!("2020")), Some("2020".to_string()));
        assert_eq!(scalar_text(&json!(2020)), Some("2020".to_string()));
        assert_eq!(scalar_text(&json!(true)), Some("true".to_string()));
        assert_eq!(scalar_text(&json!(null)), None);
        assert_eq!(scalar_text(&json!(["x"])), None);
        assert_eq!(scalar_text(&json!({"value": "x"})), None);
    }

    #[test]
    fn test_text_at_keeps_empty_string() {
        let doc = json!({"v": ""});
        assert_eq!(text_at(&doc, &["v"]), Some(String::new()));
    }
}
