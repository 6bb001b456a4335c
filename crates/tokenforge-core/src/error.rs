//! Error types for the token model.

use crate::token::TokenType;

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing model values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The payload variant of a value does not match the declared token type.
    #[error("token '{name}': a {token_type} token cannot carry a {payload} payload")]
    PayloadMismatch {
        /// Normalized token name.
        name: String,
        /// The declared token type.
        token_type: TokenType,
        /// Name of the offending payload variant.
        payload: &'static str,
    },

    /// The token name normalized to an empty string.
    #[error("token name '{raw}' normalizes to an empty name")]
    EmptyName {
        /// The raw name as supplied by the source.
        raw: String,
    },
}
