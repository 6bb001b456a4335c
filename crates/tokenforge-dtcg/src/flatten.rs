//! Flattening of a DTCG tree into a path-keyed token list.
//!
//! The walk recurses through object-valued, non-`$` keys and records every
//! `$type`-bearing node at its full dotted path. Typography is the one
//! composite: DTCG expresses it as sibling single-property tokens
//! (`fontFamily`, `fontSize`, ...), while the normalized model wants a
//! single value. Groups that structurally qualify are composed here, so
//! the normalizer only ever sees one synthetic `typography` node.

use serde_json::{Map, Value};
use std::collections::HashSet;

use tokenforge_core::parse::parse_dimension;
use tokenforge_core::token::{normalize_name, FontWeight, LineHeight, TypographyValue};

/// Child keys that make up a typography group.
pub const TYPOGRAPHY_PROPERTIES: [&str; 5] = [
    "fontFamily",
    "fontSize",
    "fontWeight",
    "lineHeight",
    "letterSpacing",
];

/// `$type`s acceptable on a typography group member.
const TYPOGRAPHY_MEMBER_TYPES: [&str; 6] = [
    "fontFamily",
    "fontSize",
    "fontWeight",
    "lineHeight",
    "letterSpacing",
    "dimension",
];

/// The value carried by a flattened token.
#[derive(Debug, Clone)]
pub enum FlatValue {
    /// The raw `$value` of a source token.
    Raw(Value),
    /// A typography value composed from a group of sibling tokens.
    Typography(TypographyValue),
}

/// One token at its full dotted path.
#[derive(Debug, Clone)]
pub struct FlatToken {
    /// Dotted path from the root key inwards, original casing preserved.
    pub path: String,
    /// The raw `$type` (`"typography"` for synthetic composed tokens).
    pub token_type: String,
    /// The token's value.
    pub value: FlatValue,
    /// `$description`, when present and a string.
    pub description: Option<String>,
    /// Non-`$` children of the token node, kept for mode extraction.
    /// Empty for synthetic typography tokens.
    pub children: Map<String, Value>,
}

/// The flattener's output: tokens in document order, plus the set of
/// normalized names it knows about (used to vet alias targets).
#[derive(Debug, Default)]
pub struct FlatDocument {
    /// Flattened tokens in document order.
    pub tokens: Vec<FlatToken>,
    known: HashSet<String>,
}

impl FlatDocument {
    /// Whether a normalized name refers to a token this document defines.
    pub fn is_known(&self, normalized: &str) -> bool {
        self.known.contains(normalized)
    }

    fn push(&mut self, token: FlatToken) {
        self.known.insert(normalize_name(&token.path));
        self.tokens.push(token);
    }
}

/// Flatten a parsed DTCG document.
pub fn flatten_document(document: &Value) -> FlatDocument {
    let mut out = FlatDocument::default();
    if let Some(root) = document.as_object() {
        for (key, value) in root {
            if key.starts_with('$') {
                continue;
            }
            if let Some(node) = value.as_object() {
                flatten_node(key.clone(), node, &mut out);
            }
        }
    }
    out
}

fn flatten_node(path: String, node: &Map<String, Value>, out: &mut FlatDocument) {
    if let Some(Value::String(type_name)) = node.get("$type") {
        out.push(flat_token(path, type_name.clone(), node));
        return;
    }

    if is_typography_group(node) {
        // Member tokens are consumed by composition and never surface on
        // their own, even when composition fails; the caller detects the
        // absence of the synthetic token.
        if let Some(typography) = compose_typography(node) {
            out.push(FlatToken {
                path,
                token_type: "typography".to_string(),
                value: FlatValue::Typography(typography),
                description: description_of(node),
                children: Map::new(),
            });
        }
        return;
    }

    for (key, value) in node {
        if key.starts_with('$') {
            continue;
        }
        if let Some(child) = value.as_object() {
            flatten_node(format!("{path}.{key}"), child, out);
        }
    }
}

fn flat_token(path: String, token_type: String, node: &Map<String, Value>) -> FlatToken {
    let children = node
        .iter()
        .filter(|(key, _)| !key.starts_with('$'))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    FlatToken {
        path,
        token_type,
        value: FlatValue::Raw(node.get("$value").cloned().unwrap_or(Value::Null)),
        description: description_of(node),
        children,
    }
}

fn description_of(node: &Map<String, Value>) -> Option<String> {
    node.get("$description")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// A group is a typography group iff every non-`$` child key belongs to
/// the typography property set AND both `fontFamily` and `fontSize` are
/// present as `$type`-bearing tokens of an acceptable member type.
fn is_typography_group(node: &Map<String, Value>) -> bool {
    let mut saw_child = false;
    for (key, _) in node.iter().filter(|(key, _)| !key.starts_with('$')) {
        if !TYPOGRAPHY_PROPERTIES.contains(&key.as_str()) {
            return false;
        }
        saw_child = true;
    }
    saw_child && member_type_ok(node, "fontFamily") && member_type_ok(node, "fontSize")
}

fn member_type_ok(node: &Map<String, Value>, key: &str) -> bool {
    node.get(key)
        .and_then(Value::as_object)
        .and_then(|member| member.get("$type"))
        .and_then(Value::as_str)
        .map(|ty| TYPOGRAPHY_MEMBER_TYPES.contains(&ty))
        .unwrap_or(false)
}

/// Compose a [`TypographyValue`] from a qualifying group.
///
/// `fontFamily` must be a string and `fontSize` must parse as a dimension;
/// failing either, the whole composition is skipped. The optional
/// properties degrade individually.
fn compose_typography(node: &Map<String, Value>) -> Option<TypographyValue> {
    let member_value = |key: &str| {
        node.get(key)
            .and_then(Value::as_object)
            .and_then(|member| member.get("$value"))
    };

    let font_family = member_value("fontFamily")?.as_str()?.to_string();
    let font_size = member_value("fontSize")?
        .as_str()
        .and_then(parse_dimension)?;

    let font_weight = member_value("fontWeight").and_then(|value| match value {
        Value::Number(n) => n.as_f64().map(FontWeight::Numeric),
        // Numeric strings like "400" are weights too; anything else is a
        // named weight kept verbatim.
        Value::String(s) => Some(
            s.trim()
                .parse::<f64>()
                .map(FontWeight::Numeric)
                .unwrap_or_else(|_| FontWeight::Named(s.clone())),
        ),
        _ => None,
    });

    let line_height = member_value("lineHeight").and_then(|value| match value {
        Value::Number(n) => n.as_f64().map(LineHeight::Multiplier),
        Value::String(s) => parse_dimension(s).map(LineHeight::Length),
        _ => None,
    });

    let letter_spacing = member_value("letterSpacing")
        .and_then(Value::as_str)
        .and_then(parse_dimension);

    Some(TypographyValue {
        font_family,
        font_size,
        font_weight,
        line_height,
        letter_spacing,
        text_case: None,
        text_decoration: None,
    })
}
