//! Shadow value parsing.

use serde_json::Value;

use super::parse_color;
use crate::token::ShadowValue;

/// Parse a structured shadow value.
///
/// Accepts an object, or an array whose first element is processed and
/// whose remaining elements are ignored (multi-shadow values are truncated
/// to the first layer). String shadow syntax is not supported. The `color`
/// field must parse as a color literal; `offsetX`, `offsetY`, and `blur`
/// default to `0` when absent or non-numeric; `spread` and `inset` are
/// preserved only when they have the right primitive kind.
pub fn parse_shadow(value: &Value) -> Option<ShadowValue> {
    match value {
        Value::String(_) => {
            tracing::debug!(target: "tokenforge_core", "string shadow values are not supported");
            None
        }
        Value::Array(items) => items.first().and_then(parse_shadow_object),
        Value::Object(_) => parse_shadow_object(value),
        _ => None,
    }
}

fn parse_shadow_object(value: &Value) -> Option<ShadowValue> {
    let object = value.as_object()?;

    let color = object
        .get("color")
        .and_then(Value::as_str)
        .and_then(parse_color)?;

    let length = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_f64)
            .map(|v| v as f32)
            .unwrap_or(0.0)
    };

    Some(ShadowValue {
        color,
        offset_x: length("offsetX"),
        offset_y: length("offsetY"),
        blur: length("blur"),
        spread: object.get("spread").and_then(Value::as_f64).map(|v| v as f32),
        inset: object.get("inset").and_then(Value::as_bool),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_object() {
        let shadow = parse_shadow(&json!({
            "color": "#00000080",
            "offsetX": 0,
            "offsetY": 4,
            "blur": 8,
            "spread": 2,
            "inset": true
        }))
        .unwrap();

        assert_eq!(shadow.offset_x, 0.0);
        assert_eq!(shadow.offset_y, 4.0);
        assert_eq!(shadow.blur, 8.0);
        assert_eq!(shadow.spread, Some(2.0));
        assert_eq!(shadow.inset, Some(true));
        assert!((shadow.color.alpha() - 0.5020).abs() < 1e-3);
    }

    #[test]
    fn missing_offsets_default_to_zero() {
        let shadow = parse_shadow(&json!({ "color": "#000" })).unwrap();
        assert_eq!(shadow.offset_x, 0.0);
        assert_eq!(shadow.offset_y, 0.0);
        assert_eq!(shadow.blur, 0.0);
        assert_eq!(shadow.spread, None);
        assert_eq!(shadow.inset, None);
    }

    #[test]
    fn non_numeric_offsets_default_to_zero() {
        let shadow = parse_shadow(&json!({
            "color": "#000",
            "offsetX": "4px",
            "blur": null
        }))
        .unwrap();
        assert_eq!(shadow.offset_x, 0.0);
        assert_eq!(shadow.blur, 0.0);
    }

    #[test]
    fn wrongly_typed_extras_are_dropped() {
        let shadow = parse_shadow(&json!({
            "color": "#000",
            "spread": "wide",
            "inset": "yes"
        }))
        .unwrap();
        assert_eq!(shadow.spread, None);
        assert_eq!(shadow.inset, None);
    }

    #[test]
    fn array_takes_first_element_only() {
        let shadow = parse_shadow(&json!([
            { "color": "#FF0000", "blur": 1 },
            { "color": "#00FF00", "blur": 9 }
        ]))
        .unwrap();
        assert_eq!(shadow.blur, 1.0);
        assert!((shadow.color.r - 1.0).abs() < 1e-4);
    }

    #[test]
    fn string_form_is_unsupported() {
        assert!(parse_shadow(&json!("0 4px 8px #000")).is_none());
    }

    #[test]
    fn unparseable_color_fails_the_shadow() {
        assert!(parse_shadow(&json!({ "color": "not-a-color" })).is_none());
        assert!(parse_shadow(&json!({ "offsetX": 1 })).is_none());
        assert!(parse_shadow(&json!({ "color": 7 })).is_none());
    }

    #[test]
    fn empty_array_yields_nothing() {
        assert!(parse_shadow(&json!([])).is_none());
    }
}
