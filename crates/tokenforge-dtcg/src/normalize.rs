//! Normalization of flattened DTCG tokens into the shared model.

use serde_json::Value;

use tokenforge_core::parse::{parse_color, parse_dimension, parse_radius, parse_shadow};
use tokenforge_core::token::{
    normalize_name, NormalizedToken, TokenSource, TokenType, TokenValue, TokenValueOrAlias,
};

use crate::flatten::{FlatDocument, FlatToken, FlatValue, TYPOGRAPHY_PROPERTIES};

/// Output of normalizing one flattened document.
#[derive(Debug, Default)]
pub struct DtcgNormalized {
    /// Normalized tokens, in document order.
    pub tokens: Vec<NormalizedToken>,
    /// Soft failures, in the order they were encountered.
    pub warnings: Vec<String>,
}

/// Normalize every flattened token.
///
/// Per-token failures (unsupported `$type`, unparseable values, unknown
/// alias targets) are recorded as warnings and the token is skipped; they
/// never abort the pass.
pub fn normalize_document(flat: &FlatDocument) -> DtcgNormalized {
    let mut out = DtcgNormalized::default();
    for token in &flat.tokens {
        if let Some(normalized) = normalize_token(token, flat, &mut out.warnings) {
            out.tokens.push(normalized);
        }
    }
    out
}

fn normalize_token(
    token: &FlatToken,
    flat: &FlatDocument,
    warnings: &mut Vec<String>,
) -> Option<NormalizedToken> {
    let name = normalize_name(&token.path);

    let Some(token_type) = map_token_type(&token.token_type, &name) else {
        push_warning(
            warnings,
            format!(
                "Unsupported token type \"{}\" for token \"{name}\". Skipping.",
                token.token_type
            ),
        );
        return None;
    };

    let value = match &token.value {
        FlatValue::Typography(typography) => {
            TokenValueOrAlias::value(TokenValue::Typography(typography.clone()))
        }
        FlatValue::Raw(raw) => normalize_value(raw, token_type, &name, flat, warnings)?,
    };

    let mut normalized = match NormalizedToken::new(&token.path, token_type, value) {
        Ok(normalized) => normalized.with_source(TokenSource::Dtcg),
        Err(err) => {
            push_warning(warnings, format!("{err}. Skipping."));
            return None;
        }
    };

    if let Some(description) = &token.description {
        normalized = normalized.with_description(description.clone());
    }

    let modes = extract_modes(token, token_type, &name, flat, warnings);
    Some(normalized.with_modes(modes))
}

/// Map a raw `$type` to the normalized [`TokenType`].
///
/// `dimension` splits on the path: anything mentioning "spacing" becomes a
/// spacing token. Standalone typography-property tokens (outside a
/// composed group) have no normalized counterpart.
fn map_token_type(raw: &str, normalized_name: &str) -> Option<TokenType> {
    match raw {
        "color" => Some(TokenType::Color),
        "dimension" => {
            if normalized_name.contains("spacing") {
                Some(TokenType::Spacing)
            } else {
                Some(TokenType::Dimension)
            }
        }
        "borderRadius" => Some(TokenType::BorderRadius),
        "shadow" => Some(TokenType::Shadow),
        "typography" => Some(TokenType::Typography),
        _ => None,
    }
}

/// Normalize one raw `$value` under a token type.
fn normalize_value(
    raw: &Value,
    token_type: TokenType,
    name: &str,
    flat: &FlatDocument,
    warnings: &mut Vec<String>,
) -> Option<TokenValueOrAlias> {
    if let Value::String(s) = raw {
        if let Some(inner) = alias_reference(s) {
            let reference = normalize_name(inner);
            if flat.is_known(&reference) {
                return Some(TokenValueOrAlias::alias(reference));
            }
            push_warning(
                warnings,
                format!(
                    "Unknown alias target \"{inner}\" referenced by token \"{name}\". Skipping."
                ),
            );
            return None;
        }
    }

    let payload = match token_type {
        TokenType::Color => raw.as_str().and_then(parse_color).map(TokenValue::Color),
        TokenType::Dimension | TokenType::Spacing => raw
            .as_str()
            .and_then(parse_dimension)
            .map(TokenValue::Dimension),
        TokenType::BorderRadius => raw
            .as_str()
            .and_then(parse_radius)
            .map(TokenValue::BorderRadius),
        TokenType::Shadow => parse_shadow(raw).map(TokenValue::Shadow),
        // Composed upstream; a raw $value cannot produce one.
        TokenType::Typography => None,
        TokenType::Number => raw.as_f64().filter(|n| n.is_finite()).map(TokenValue::Number),
        TokenType::String => raw.as_str().map(|s| TokenValue::String(s.to_string())),
        TokenType::Boolean => raw.as_bool().map(TokenValue::Boolean),
    };

    match payload {
        Some(payload) => Some(TokenValueOrAlias::value(payload)),
        None => {
            push_warning(
                warnings,
                format!(
                    "Failed to parse {token_type} value for token \"{name}\". Skipping."
                ),
            );
            None
        }
    }
}

/// The inner name of a `{dotted.path}` alias, if the string is one.
fn alias_reference(s: &str) -> Option<&str> {
    let inner = s.strip_prefix('{')?.strip_suffix('}')?;
    if inner.is_empty() || inner.contains('}') {
        return None;
    }
    Some(inner)
}

/// Extract per-mode values from the token node's children.
///
/// A mode is any sibling object carrying a `$value` whose own `$type` is
/// not a typography property. The mode value normalizes under the parent
/// token's type. This heuristic is structural; non-mode metadata objects
/// that happen to carry a `$value` will be picked up as modes.
fn extract_modes(
    token: &FlatToken,
    token_type: TokenType,
    name: &str,
    flat: &FlatDocument,
    warnings: &mut Vec<String>,
) -> std::collections::BTreeMap<String, TokenValueOrAlias> {
    let mut modes = std::collections::BTreeMap::new();

    for (key, child) in &token.children {
        let Some(child_object) = child.as_object() else {
            continue;
        };
        let Some(mode_value) = child_object.get("$value") else {
            continue;
        };
        let is_typography_property = child_object
            .get("$type")
            .and_then(Value::as_str)
            .map(|ty| TYPOGRAPHY_PROPERTIES.contains(&ty))
            .unwrap_or(false);
        if is_typography_property {
            continue;
        }

        let qualified = format!("{name} (mode: {key})");
        if let Some(value) = normalize_value(mode_value, token_type, &qualified, flat, warnings) {
            modes.insert(key.clone(), value);
        }
    }

    modes
}

fn push_warning(warnings: &mut Vec<String>, message: String) {
    tracing::warn!(target: "tokenforge_dtcg", "{message}");
    warnings.push(message);
}
