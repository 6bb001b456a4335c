//! The Figma variables importer.

use async_trait::async_trait;
use serde_json::{Map, Value};

use tokenforge_core::token::{TokenSet, TokenSetMetadata, TokenSource};
use tokenforge_figma::{
    normalize_variables, FigmaClient, FigmaClientConfig, FigmaVariable, VariableCollection,
};

use crate::error::ImportError;
use crate::result::ImportResult;
use crate::Importer;

const FAIL_PREFIX: &str = "Figma import failed";

/// Imports the local variables of one Figma file.
#[derive(Debug, Clone)]
pub struct FigmaImporter {
    client: FigmaClient,
    file_key: String,
}

impl FigmaImporter {
    /// Create an importer against the default service URL.
    pub fn new(
        api_key: impl Into<String>,
        file_key: impl Into<String>,
    ) -> Result<Self, ImportError> {
        Self::with_config(api_key, file_key, FigmaClientConfig::default())
    }

    /// Create an importer with an explicit client configuration (base URL
    /// override, timeouts).
    pub fn with_config(
        api_key: impl Into<String>,
        file_key: impl Into<String>,
        config: FigmaClientConfig,
    ) -> Result<Self, ImportError> {
        let client = FigmaClient::with_config(api_key, config)
            .map_err(|e| ImportError::Fatal(format!("{FAIL_PREFIX}: {e}")))?;
        Ok(Self {
            client,
            file_key: file_key.into(),
        })
    }

    /// The file key this importer ingests.
    pub fn file_key(&self) -> &str {
        &self.file_key
    }
}

#[async_trait]
impl Importer for FigmaImporter {
    async fn ingest(&self) -> Result<ImportResult, ImportError> {
        tracing::debug!(target: "tokenforge_import", "ingesting Figma file {}", self.file_key);

        // Both retrievals run concurrently with settled semantics: a
        // collections failure must not cancel the variables fetch.
        let (variables_result, collections_result) = tokio::join!(
            self.client.local_variables(&self.file_key),
            self.client.variable_collections(&self.file_key),
        );

        let raw_variables = variables_result
            .map_err(|e| ImportError::Fatal(format!("{FAIL_PREFIX}: {e}")))?;

        let mut warnings = Vec::new();
        let raw_collections = match collections_result {
            Ok(raw) => Some(raw),
            Err(e) => {
                let message = format!(
                    "Failed to fetch variable collections: {e}. Continuing with mode IDs instead of names."
                );
                tracing::warn!(target: "tokenforge_import", "{message}");
                warnings.push(message);
                None
            }
        };

        let variables = convert_records::<FigmaVariable>(&raw_variables, "variable", &mut warnings);
        let collections = raw_collections
            .map(|raw| convert_records::<VariableCollection>(&raw, "collection", &mut warnings));

        let normalized = normalize_variables(&variables, collections.as_deref());
        warnings.extend(normalized.warnings);

        let mut token_set = TokenSet::new(TokenSetMetadata::named(
            TokenSource::Figma,
            format!("Figma Variables - {}", self.file_key),
        ));
        // Collisions were already resolved (and warned about) by the
        // normalizer, which names both source variable ids.
        for token in normalized.tokens {
            token_set.insert(token);
        }

        Ok(ImportResult {
            token_set,
            warnings,
            errors: Vec::new(),
        })
    }
}

/// Convert the id-keyed raw records of a response, in response order.
/// Records that fail to deserialize become warnings, not fatal errors.
fn convert_records<T: serde::de::DeserializeOwned>(
    raw: &Map<String, Value>,
    kind: &str,
    warnings: &mut Vec<String>,
) -> Vec<T> {
    let mut records = Vec::with_capacity(raw.len());
    for (id, value) in raw {
        match serde_json::from_value(value.clone()) {
            Ok(record) => records.push(record),
            Err(e) => {
                let message = format!("Malformed {kind} record \"{id}\": {e}. Skipping.");
                tracing::warn!(target: "tokenforge_import", "{message}");
                warnings.push(message);
            }
        }
    }
    records
}
