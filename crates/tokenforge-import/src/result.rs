//! The shared result shape of every importer.

use tokenforge_core::token::TokenSet;

/// Outcome of a successful ingest.
#[derive(Debug)]
pub struct ImportResult {
    /// The normalized tokens.
    pub token_set: TokenSet,
    /// Soft failures, in the order they were produced.
    pub warnings: Vec<String>,
    /// Non-fatal errors, in the order they were produced.
    pub errors: Vec<String>,
}

impl ImportResult {
    /// A result with no diagnostics.
    pub fn new(token_set: TokenSet) -> Self {
        Self {
            token_set,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }
}
