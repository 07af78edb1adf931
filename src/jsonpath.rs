// Dotted-path lookup over parsed JSON values
//
// Upstream documents are parsed with serde_json; this is the one place the
// rest of the crate goes through when a response shape is too loose for a
// typed struct.

use serde_json::Value;

/// Walk a dotted path ("metadata.current") through nested objects.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for key in path.split('.') {
        current = current.get(key)?;
    }
    Some(current)
}

/// Scalar at `path` rendered as a string; empty when the path is absent or
/// points at an object/array/null. Absent and empty are indistinguishable
/// by contract.
pub fn lookup_str(value: &Value, path: &str) -> String {
    match lookup(value, path) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_flat() {
        let doc = json!({"name": "Example", "build": 42});
        assert_eq!(lookup_str(&doc, "name"), "Example");
        assert_eq!(lookup_str(&doc, "build"), "42");
    }

    #[test]
    fn test_lookup_nested() {
        let doc = json!({"metadata": {"current": "1.21.4"}});
        assert_eq!(lookup_str(&doc, "metadata.current"), "1.21.4");
    }

    #[test]
    fn test_missing_path_is_empty() {
        let doc = json!({"metadata": {"current": "1.21.4"}});
        assert_eq!(lookup_str(&doc, "metadata.previous"), "");
        assert_eq!(lookup_str(&doc, "nothing.here"), "");
    }

    #[test]
    fn test_non_scalar_is_empty() {
        let doc = json!({"metadata": {"current": "1.21.4"}});
        assert_eq!(lookup_str(&doc, "metadata"), "");
    }

    #[test]
    fn test_empty_string_matches_missing() {
        let doc = json!({"name": ""});
        assert_eq!(lookup_str(&doc, "name"), lookup_str(&doc, "absent"));
    }
}
