//! Structural validation of DTCG documents.
//!
//! Validation runs against the parsed JSON value before any flattening.
//! Diagnostics accumulate — a malformed token never stops the walk — and
//! the caller decides whether a non-empty diagnostic list is fatal.

use serde_json::{Map, Value};

/// `$type` values a document may declare.
pub const ALLOWED_TYPES: [&str; 9] = [
    "color",
    "dimension",
    "fontFamily",
    "fontSize",
    "fontWeight",
    "lineHeight",
    "letterSpacing",
    "borderRadius",
    "shadow",
];

/// Outcome of validating one document.
#[derive(Debug, Clone, Default)]
pub struct DtcgValidation {
    /// Whether the document passed with no diagnostics.
    pub valid: bool,
    /// Structural problems, in document order.
    pub errors: Vec<String>,
}

/// Validate a parsed DTCG document.
pub fn validate_document(document: &Value) -> DtcgValidation {
    let mut errors = Vec::new();

    let Some(root) = document.as_object() else {
        errors.push("DTCG file must be an object".to_string());
        return DtcgValidation {
            valid: false,
            errors,
        };
    };

    if let Some(schema) = root.get("$schema") {
        if !schema.is_string() {
            errors.push("$schema must be a string".to_string());
        }
    }

    for (key, value) in root {
        if key.starts_with('$') {
            continue;
        }
        if let Some(node) = value.as_object() {
            validate_node(key, node, &mut errors);
        }
    }

    DtcgValidation {
        valid: errors.is_empty(),
        errors,
    }
}

/// Validate a group or token node. Paths are dot-joined from the root key
/// inwards.
fn validate_node(path: &str, node: &Map<String, Value>, errors: &mut Vec<String>) {
    if node.contains_key("$type") {
        validate_token(path, node, errors);
        return;
    }

    for (key, value) in node {
        if key.starts_with('$') {
            continue;
        }
        if let Some(child) = value.as_object() {
            validate_node(&format!("{path}.{key}"), child, errors);
        }
    }
}

fn validate_token(path: &str, node: &Map<String, Value>, errors: &mut Vec<String>) {
    let type_name = match node.get("$type") {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            errors.push(format!("Token \"{path}\" has a non-string $type"));
            None
        }
        None => None,
    };

    if let Some(ty) = type_name {
        if !ALLOWED_TYPES.contains(&ty) {
            errors.push(format!("Token \"{path}\" has unsupported $type \"{ty}\""));
        }
    }

    let Some(value) = node.get("$value") else {
        errors.push(format!("Token \"{path}\" is missing $value"));
        return;
    };

    if let Some(ty) = type_name {
        if !value_shape_permitted(ty, value) {
            errors.push(format!(
                "Token \"{path}\" has an invalid $value for $type \"{ty}\""
            ));
        }
    }
}

/// Coarse shape check; final numeric parsing is deferred to the normalizer.
fn value_shape_permitted(type_name: &str, value: &Value) -> bool {
    match type_name {
        "color" | "dimension" | "fontFamily" | "fontSize" | "letterSpacing" | "borderRadius" => {
            value.is_string()
        }
        "fontWeight" | "lineHeight" => value.is_number() || value.is_string(),
        "shadow" => value.is_object() || value.is_array() || value.is_string(),
        // Unknown $type is already diagnosed; don't pile on.
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_must_be_an_object() {
        let result = validate_document(&json!([1, 2, 3]));
        assert!(!result.valid);
        assert_eq!(result.errors, vec!["DTCG file must be an object"]);
    }

    #[test]
    fn accepts_a_minimal_document() {
        let result = validate_document(&json!({
            "color": {
                "primary": { "$type": "color", "$value": "#FF5733" }
            }
        }));
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn schema_must_be_a_string() {
        let result = validate_document(&json!({
            "$schema": 42,
            "color": { "primary": { "$type": "color", "$value": "#FFF" } }
        }));
        assert!(!result.valid);
        assert_eq!(result.errors, vec!["$schema must be a string"]);
    }

    #[test]
    fn string_schema_is_fine() {
        let result = validate_document(&json!({
            "$schema": "https://design-tokens.org/schema.json"
        }));
        assert!(result.valid);
    }

    #[test]
    fn unknown_type_is_diagnosed_with_path() {
        let result = validate_document(&json!({
            "misc": {
                "cursor": { "$type": "cursor", "$value": "pointer" }
            }
        }));
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec!["Token \"misc.cursor\" has unsupported $type \"cursor\""]
        );
    }

    #[test]
    fn missing_value_is_diagnosed_with_path() {
        let result = validate_document(&json!({
            "color": {
                "primary": { "$type": "color" }
            }
        }));
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec!["Token \"color.primary\" is missing $value"]
        );
    }

    #[test]
    fn value_shape_is_checked_per_type() {
        let result = validate_document(&json!({
            "color": { "bad": { "$type": "color", "$value": 7 } },
            "weight": { "ok": { "$type": "fontWeight", "$value": 400 } },
            "shadow": { "ok": { "$type": "shadow", "$value": { "color": "#000" } } }
        }));
        assert_eq!(
            result.errors,
            vec!["Token \"color.bad\" has an invalid $value for $type \"color\""]
        );
    }

    #[test]
    fn diagnostics_accumulate_instead_of_failing_fast() {
        let result = validate_document(&json!({
            "a": { "$type": "color" },
            "b": { "$type": 12, "$value": "#FFF" },
            "c": { "$type": "gradient", "$value": "x" }
        }));
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 3);
    }

    #[test]
    fn non_object_children_are_skipped() {
        let result = validate_document(&json!({
            "note": "not a token",
            "count": 3
        }));
        assert!(result.valid);
    }
}
