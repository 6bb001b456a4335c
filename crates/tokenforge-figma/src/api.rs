//! Wire types for the variables service.
//!
//! Only the fields the normalizer consumes are modeled; everything else in
//! the response is ignored. The service sends camelCase field names.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One variable record from `GET /v1/files/<key>/variables/local`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaVariable {
    /// Opaque variable id, referenced by aliases.
    pub id: String,
    /// Slash-separated human name, e.g. `"color/primary"`.
    pub name: String,
    /// Id of the collection this variable belongs to.
    #[serde(default)]
    pub variable_collection_id: String,
    /// One of `BOOLEAN`, `FLOAT`, `STRING`, `COLOR`. Kept as a string so
    /// unknown types surface as per-variable warnings instead of failing
    /// the whole response.
    pub resolved_type: String,
    /// Optional human description.
    #[serde(default)]
    pub description: Option<String>,
    /// Value per mode id, in response order.
    #[serde(default)]
    pub values_by_mode: Map<String, Value>,
}

/// A value entry in `values_by_mode`: either a concrete primitive or an
/// alias to another variable by id.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ModeValue {
    /// A concrete primitive value.
    #[serde(rename = "VALUE")]
    Value(Value),
    /// A reference to another variable.
    #[serde(rename = "ALIAS")]
    Alias(String),
}

/// One mode of a collection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableMode {
    /// Opaque mode id.
    pub mode_id: String,
    /// Human-readable mode name, e.g. `"Light"`.
    pub name: String,
}

/// One collection record from `GET /v1/files/<key>/variable-collections`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableCollection {
    /// Opaque collection id.
    pub id: String,
    /// The collection's modes.
    #[serde(default)]
    pub modes: Vec<VariableMode>,
    /// Id of the mode whose value is a variable's default.
    pub default_mode_id: String,
}

/// Envelope of the variables endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct VariablesEnvelope {
    pub meta: VariablesMeta,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VariablesMeta {
    #[serde(default)]
    pub variables: Map<String, Value>,
}

/// Envelope of the collections endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct CollectionsEnvelope {
    pub meta: CollectionsMeta,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionsMeta {
    #[serde(rename = "variableCollections", default)]
    pub variable_collections: Map<String, Value>,
}
