//! The DTCG importer.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;

use tokenforge_core::token::{TokenSet, TokenSetMetadata, TokenSource};
use tokenforge_dtcg::{flatten_document, normalize_document, validate_document};

use crate::error::ImportError;
use crate::result::ImportResult;
use crate::Importer;

const FAIL_PREFIX: &str = "DTCG import failed";

/// Where a DTCG document lives. Exactly one locator per importer.
#[derive(Debug, Clone)]
pub enum DtcgLocator {
    /// A file on the local file system.
    File(PathBuf),
    /// An HTTP(S) URL.
    Url(String),
}

impl fmt::Display for DtcgLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Imports one DTCG document from a file or URL.
#[derive(Debug, Clone)]
pub struct DtcgImporter {
    locator: DtcgLocator,
}

impl DtcgImporter {
    /// Import from a local file.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            locator: DtcgLocator::File(path.into()),
        }
    }

    /// Import from a URL.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            locator: DtcgLocator::Url(url.into()),
        }
    }

    /// Build from optional locators, enforcing that exactly one is given.
    pub fn new(
        file: Option<PathBuf>,
        url: Option<String>,
    ) -> Result<Self, ImportError> {
        match (file, url) {
            (Some(path), None) => Ok(Self::from_file(path)),
            (None, Some(url)) => Ok(Self::from_url(url)),
            (Some(_), Some(_)) => Err(ImportError::Configuration(
                "DTCG source requires either a file path or a URL, not both".to_string(),
            )),
            (None, None) => Err(ImportError::Configuration(
                "DTCG source requires a file path or a URL".to_string(),
            )),
        }
    }

    /// The configured locator.
    pub fn locator(&self) -> &DtcgLocator {
        &self.locator
    }

    async fn load_bytes(&self) -> Result<String, ImportError> {
        match &self.locator {
            DtcgLocator::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                fatal(format!("failed to read {}: {e}", path.display()))
            }),
            DtcgLocator::Url(url) => {
                let response = reqwest::get(url)
                    .await
                    .map_err(|e| fatal(format!("failed to fetch {url}: {e}")))?;
                let status = response.status();
                if !status.is_success() {
                    return Err(fatal(format!(
                        "failed to fetch {url}: HTTP {}",
                        status.as_u16()
                    )));
                }
                response
                    .text()
                    .await
                    .map_err(|e| fatal(format!("failed to read response from {url}: {e}")))
            }
        }
    }
}

fn fatal(message: String) -> ImportError {
    ImportError::Fatal(format!("{FAIL_PREFIX}: {message}"))
}

#[async_trait]
impl Importer for DtcgImporter {
    async fn ingest(&self) -> Result<ImportResult, ImportError> {
        tracing::debug!(target: "tokenforge_import", "ingesting DTCG source {}", self.locator);

        let text = self.load_bytes().await?;
        let document: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| fatal(format!("invalid JSON: {e}")))?;

        let validation = validate_document(&document);
        if !validation.valid {
            return Err(fatal(validation.errors.join("; ")));
        }

        let flat = flatten_document(&document);
        let normalized = normalize_document(&flat);
        let mut warnings = normalized.warnings;

        let mut token_set = TokenSet::new(TokenSetMetadata::named(
            TokenSource::Dtcg,
            format!("DTCG Tokens - {}", self.locator),
        ));
        for token in normalized.tokens {
            let name = token.name.clone();
            if token_set.insert(token).is_some() {
                let message = format!(
                    "Duplicate token name \"{name}\": a later definition overrides an earlier one."
                );
                tracing::warn!(target: "tokenforge_import", "{message}");
                warnings.push(message);
            }
        }

        Ok(ImportResult {
            token_set,
            warnings,
            errors: Vec::new(),
        })
    }
}
