//! Normalization of service variables into the shared token model.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use tokenforge_core::parse::parse_color;
use tokenforge_core::token::{
    normalize_name, NormalizedToken, TokenSource, TokenType, TokenValue, TokenValueOrAlias,
};

use crate::api::{FigmaVariable, ModeValue, VariableCollection};

/// Lookup tables built once per ingest and consulted during
/// normalization. All read-only after construction.
#[derive(Debug, Default)]
pub struct VariablesContext {
    /// Variable id → normalized token name, for alias resolution.
    names: HashMap<String, String>,
    /// Mode id → human-readable mode name.
    mode_names: HashMap<String, String>,
    /// Collection id → its default mode id.
    default_modes: HashMap<String, String>,
}

impl VariablesContext {
    /// Build the tables from the fetched records. `collections` is absent
    /// when the collections fetch failed; mode ids are then used verbatim.
    pub fn new(variables: &[FigmaVariable], collections: Option<&[VariableCollection]>) -> Self {
        let mut context = Self::default();

        for variable in variables {
            context
                .names
                .insert(variable.id.clone(), normalize_name(&variable.name));
        }
        if let Some(collections) = collections {
            for collection in collections {
                context
                    .default_modes
                    .insert(collection.id.clone(), collection.default_mode_id.clone());
                for mode in &collection.modes {
                    context
                        .mode_names
                        .insert(mode.mode_id.clone(), mode.name.clone());
                }
            }
        }
        context
    }

    fn token_name(&self, variable_id: &str) -> Option<&str> {
        self.names.get(variable_id).map(String::as_str)
    }

    /// Human mode name, falling back to the raw mode id when the
    /// collection lookup failed.
    fn mode_name<'a>(&'a self, mode_id: &'a str) -> &'a str {
        self.mode_names
            .get(mode_id)
            .map(String::as_str)
            .unwrap_or(mode_id)
    }

    fn default_mode_id(&self, collection_id: &str) -> Option<&str> {
        self.default_modes.get(collection_id).map(String::as_str)
    }
}

/// Output of normalizing one batch of variables.
#[derive(Debug, Default)]
pub struct VariablesNormalized {
    /// Normalized tokens, in input order. Name collisions are already
    /// resolved: the later variable wins.
    pub tokens: Vec<NormalizedToken>,
    /// Soft failures, in the order they were encountered.
    pub warnings: Vec<String>,
}

/// Normalize every variable against its collection.
pub fn normalize_variables(
    variables: &[FigmaVariable],
    collections: Option<&[VariableCollection]>,
) -> VariablesNormalized {
    let context = VariablesContext::new(variables, collections);
    let mut out = VariablesNormalized::default();
    // Token name → (index in out.tokens, source variable id); used to
    // resolve collisions deterministically in input order.
    let mut emitted: HashMap<String, (usize, String)> = HashMap::new();

    for variable in variables {
        let Some(token) = normalize_variable(variable, &context, &mut out.warnings) else {
            continue;
        };

        let earlier = emitted
            .get(&token.name)
            .map(|(index, id)| (*index, id.clone()));
        match earlier {
            Some((index, earlier_id)) => {
                push_warning(
                    &mut out.warnings,
                    format!(
                        "Variable \"{}\" collides with variable \"{earlier_id}\": both normalize to \"{}\". Keeping the later definition.",
                        variable.id, token.name
                    ),
                );
                emitted.insert(token.name.clone(), (index, variable.id.clone()));
                out.tokens[index] = token;
            }
            None => {
                emitted.insert(token.name.clone(), (out.tokens.len(), variable.id.clone()));
                out.tokens.push(token);
            }
        }
    }

    out
}

fn normalize_variable(
    variable: &FigmaVariable,
    context: &VariablesContext,
    warnings: &mut Vec<String>,
) -> Option<NormalizedToken> {
    let Some(token_type) = map_resolved_type(&variable.resolved_type) else {
        push_warning(
            warnings,
            format!(
                "Unsupported variable type \"{}\" for variable \"{}\" ({}). Skipping.",
                variable.resolved_type, variable.name, variable.id
            ),
        );
        return None;
    };

    if variable.values_by_mode.is_empty() {
        push_warning(
            warnings,
            format!(
                "Variable \"{}\" ({}) has no values. Skipping.",
                variable.name, variable.id
            ),
        );
        return None;
    }

    let default_mode_id = select_default_mode(variable, context);

    let default_value = variable
        .values_by_mode
        .get(&default_mode_id)
        .and_then(|raw| normalize_mode_value(raw, token_type, variable, context, warnings));
    let Some(value) = default_value else {
        push_warning(
            warnings,
            format!(
                "Variable \"{}\" ({}) has no usable default value. Skipping.",
                variable.name, variable.id
            ),
        );
        return None;
    };

    let mut modes = BTreeMap::new();
    for (mode_id, raw) in &variable.values_by_mode {
        if *mode_id == default_mode_id {
            continue;
        }
        if let Some(mode_value) =
            normalize_mode_value(raw, token_type, variable, context, warnings)
        {
            modes.insert(context.mode_name(mode_id).to_string(), mode_value);
        }
    }

    let mut token = match NormalizedToken::new(&variable.name, token_type, value) {
        Ok(token) => token.with_source(TokenSource::Figma).with_modes(modes),
        Err(err) => {
            push_warning(warnings, format!("{err}. Skipping."));
            return None;
        }
    };

    if let Some(description) = variable.description.as_deref().filter(|d| !d.is_empty()) {
        token = token.with_description(description);
    }
    Some(token)
}

/// Map the service's `resolvedType` onto a normalized token type.
fn map_resolved_type(resolved: &str) -> Option<TokenType> {
    match resolved {
        "COLOR" => Some(TokenType::Color),
        "FLOAT" => Some(TokenType::Number),
        "STRING" => Some(TokenType::String),
        "BOOLEAN" => Some(TokenType::Boolean),
        _ => None,
    }
}

/// The collection's default mode when the variable carries a value for it,
/// else the first mode in insertion order.
fn select_default_mode(variable: &FigmaVariable, context: &VariablesContext) -> String {
    if let Some(default_id) = context.default_mode_id(&variable.variable_collection_id) {
        if variable.values_by_mode.contains_key(default_id) {
            return default_id.to_string();
        }
    }
    variable
        .values_by_mode
        .keys()
        .next()
        .cloned()
        .unwrap_or_default()
}

/// Normalize one `values_by_mode` entry.
fn normalize_mode_value(
    raw: &Value,
    token_type: TokenType,
    variable: &FigmaVariable,
    context: &VariablesContext,
    warnings: &mut Vec<String>,
) -> Option<TokenValueOrAlias> {
    let mode_value: ModeValue = match serde_json::from_value(raw.clone()) {
        Ok(mode_value) => mode_value,
        Err(_) => {
            push_warning(
                warnings,
                format!(
                    "Malformed mode value on variable \"{}\" ({}). Skipping value.",
                    variable.name, variable.id
                ),
            );
            return None;
        }
    };

    match mode_value {
        ModeValue::Alias(target_id) => match context.token_name(&target_id) {
            Some(reference) => Some(TokenValueOrAlias::alias(reference)),
            None => {
                push_warning(
                    warnings,
                    format!(
                        "Unknown alias target \"{target_id}\" on variable \"{}\" ({}). Skipping value.",
                        variable.name, variable.id
                    ),
                );
                None
            }
        },
        ModeValue::Value(value) => cast_value(&value, token_type).map(TokenValueOrAlias::value),
    }
}

/// Cast a concrete primitive under the variable's resolved type.
fn cast_value(value: &Value, token_type: TokenType) -> Option<TokenValue> {
    match token_type {
        TokenType::Color => value.as_str().and_then(parse_color).map(TokenValue::Color),
        TokenType::Number => value
            .as_f64()
            .filter(|n| n.is_finite())
            .map(TokenValue::Number),
        TokenType::String => value.as_str().map(|s| TokenValue::String(s.to_string())),
        TokenType::Boolean => value.as_bool().map(TokenValue::Boolean),
        // Variables never resolve to the composite types.
        _ => None,
    }
}

fn push_warning(warnings: &mut Vec<String>, message: String) {
    tracing::warn!(target: "tokenforge_figma", "{message}");
    warnings.push(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn variable(id: &str, name: &str, resolved_type: &str, values: Value) -> FigmaVariable {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "variableCollectionId": "C1",
            "resolvedType": resolved_type,
            "valuesByMode": values,
        }))
        .unwrap()
    }

    fn collection(default_mode: &str, modes: Value) -> VariableCollection {
        serde_json::from_value(json!({
            "id": "C1",
            "defaultModeId": default_mode,
            "modes": modes,
        }))
        .unwrap()
    }

    #[test]
    fn color_variable_normalizes() {
        let vars = vec![variable(
            "V1",
            "color/primary",
            "COLOR",
            json!({ "M1": { "type": "VALUE", "value": "#FF5733" } }),
        )];
        let cols = vec![collection("M1", json!([{ "modeId": "M1", "name": "Light" }]))];

        let result = normalize_variables(&vars, Some(&cols));
        assert!(result.warnings.is_empty());
        assert_eq!(result.tokens.len(), 1);
        let token = &result.tokens[0];
        assert_eq!(token.name, "color.primary");
        assert_eq!(token.token_type, TokenType::Color);
        assert!(token.modes.is_none());
    }

    #[test]
    fn alias_resolves_through_id_table() {
        let vars = vec![
            variable(
                "V1",
                "color/primary",
                "COLOR",
                json!({ "M1": { "type": "VALUE", "value": "#FF5733" } }),
            ),
            variable(
                "V2",
                "color/primary-hover",
                "COLOR",
                json!({ "M1": { "type": "ALIAS", "value": "V1" } }),
            ),
        ];
        let cols = vec![collection("M1", json!([{ "modeId": "M1", "name": "Light" }]))];

        let result = normalize_variables(&vars, Some(&cols));
        assert!(result.warnings.is_empty());
        assert_eq!(
            result.tokens[1].value.as_alias(),
            Some("color.primary")
        );
    }

    #[test]
    fn unknown_alias_target_warns_and_skips_token() {
        let vars = vec![variable(
            "V2",
            "color/hover",
            "COLOR",
            json!({ "M1": { "type": "ALIAS", "value": "V404" } }),
        )];

        let result = normalize_variables(&vars, None);
        assert!(result.tokens.is_empty());
        assert!(result.warnings.iter().any(|w| w.contains("V404")));
    }

    #[test]
    fn unsupported_type_warning_is_canonical() {
        let vars = vec![variable("V9", "exotic/thing", "GRADIENT", json!({}))];
        let result = normalize_variables(&vars, None);
        assert!(result.tokens.is_empty());
        assert_eq!(
            result.warnings,
            vec!["Unsupported variable type \"GRADIENT\" for variable \"exotic/thing\" (V9). Skipping."]
        );
    }

    #[test]
    fn default_mode_follows_the_collection() {
        let vars = vec![variable(
            "V1",
            "number/scale",
            "FLOAT",
            json!({
                "M1": { "type": "VALUE", "value": 1.0 },
                "M2": { "type": "VALUE", "value": 2.0 }
            }),
        )];
        let cols = vec![collection(
            "M2",
            json!([
                { "modeId": "M1", "name": "Compact" },
                { "modeId": "M2", "name": "Comfortable" }
            ]),
        )];

        let result = normalize_variables(&vars, Some(&cols));
        let token = &result.tokens[0];
        assert!(matches!(
            &token.value,
            TokenValueOrAlias::Value(TokenValue::Number(n)) if *n == 2.0
        ));
        let modes = token.modes.as_ref().unwrap();
        assert!(matches!(
            modes.get("Compact"),
            Some(TokenValueOrAlias::Value(TokenValue::Number(n))) if *n == 1.0
        ));
    }

    #[test]
    fn first_mode_wins_when_default_is_absent() {
        let vars = vec![variable(
            "V1",
            "number/scale",
            "FLOAT",
            json!({
                "M7": { "type": "VALUE", "value": 7.0 },
                "M8": { "type": "VALUE", "value": 8.0 }
            }),
        )];
        // The collection's default mode M1 has no value on this variable.
        let cols = vec![collection("M1", json!([{ "modeId": "M1", "name": "Light" }]))];

        let result = normalize_variables(&vars, Some(&cols));
        assert!(matches!(
            &result.tokens[0].value,
            TokenValueOrAlias::Value(TokenValue::Number(n)) if *n == 7.0
        ));
    }

    #[test]
    fn mode_ids_are_used_when_collections_are_absent() {
        let vars = vec![variable(
            "V1",
            "number/scale",
            "FLOAT",
            json!({
                "M1": { "type": "VALUE", "value": 1.0 },
                "M2": { "type": "VALUE", "value": 2.0 }
            }),
        )];

        let result = normalize_variables(&vars, None);
        let modes = result.tokens[0].modes.as_ref().unwrap();
        assert!(modes.contains_key("M2"));
    }

    #[test]
    fn name_collision_keeps_later_and_warns_once() {
        let vars = vec![
            variable(
                "V1",
                "Color/Primary",
                "COLOR",
                json!({ "M1": { "type": "VALUE", "value": "#111111" } }),
            ),
            variable(
                "V2",
                "color/primary",
                "COLOR",
                json!({ "M1": { "type": "VALUE", "value": "#222222" } }),
            ),
        ];

        let result = normalize_variables(&vars, None);
        assert_eq!(result.tokens.len(), 1);
        let collision_warnings: Vec<&String> = result
            .warnings
            .iter()
            .filter(|w| w.contains("collides"))
            .collect();
        assert_eq!(collision_warnings.len(), 1);
        assert!(collision_warnings[0].contains("V1"));
        assert!(collision_warnings[0].contains("V2"));
        assert!(matches!(
            &result.tokens[0].value,
            TokenValueOrAlias::Value(TokenValue::Color(c)) if (c.r - (0x22 as f32 / 255.0)).abs() < 1e-4
        ));
    }

    #[test]
    fn boolean_and_string_variables() {
        let vars = vec![
            variable(
                "V1",
                "feature/rounded",
                "BOOLEAN",
                json!({ "M1": { "type": "VALUE", "value": true } }),
            ),
            variable(
                "V2",
                "brand/family",
                "STRING",
                json!({ "M1": { "type": "VALUE", "value": "Inter" } }),
            ),
        ];

        let result = normalize_variables(&vars, None);
        assert_eq!(result.tokens.len(), 2);
        assert_eq!(result.tokens[0].token_type, TokenType::Boolean);
        assert_eq!(result.tokens[1].token_type, TokenType::String);
    }

    #[test]
    fn wrongly_typed_primitive_skips_the_token() {
        let vars = vec![variable(
            "V1",
            "number/scale",
            "FLOAT",
            json!({ "M1": { "type": "VALUE", "value": "not a number" } }),
        )];

        let result = normalize_variables(&vars, None);
        assert!(result.tokens.is_empty());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("no usable default value")));
    }
}
