//! Design-token ingestion for code generation.
//!
//! tokenforge ingests design tokens from two heterogeneous sources — a
//! Figma-style variables service and DTCG-format JSON documents — and
//! produces a single normalized [`token::TokenSet`] suitable for
//! downstream code generation.
//!
//! The pipeline per source:
//!
//! - **DTCG**: structural validation → flattening (with typography
//!   composition) → normalization
//! - **Figma**: concurrent fetch of variables and collections →
//!   per-variable normalization with default-mode selection
//!
//! Aliases stay symbolic throughout; [`validate`] checks that they resolve
//! and that the alias graph is acyclic, without ever resolving them.
//!
//! # Example
//!
//! ```no_run
//! use tokenforge::prelude::*;
//!
//! # async fn run() -> Result<(), tokenforge::ImportError> {
//! let result = DtcgImporter::from_file("tokens.json").ingest().await?;
//! for warning in &result.warnings {
//!     eprintln!("warn: {warning}");
//! }
//!
//! let report = validate(&result.token_set);
//! if !report.is_valid() {
//!     eprintln!("{report}");
//! }
//! # Ok(())
//! # }
//! ```

pub use tokenforge_core::parse;
pub use tokenforge_core::token;
pub use tokenforge_core::validate as validation;
pub use tokenforge_core::validate::validate;

pub use tokenforge_dtcg as dtcg;
pub use tokenforge_figma as figma;

pub use tokenforge_import::{
    DtcgImporter, DtcgLocator, ExitClass, FigmaImporter, ImportError, ImportResult, Importer,
};

/// Commonly used types, in one import.
pub mod prelude {
    pub use tokenforge_core::token::{
        ColorValue, DimensionValue, NormalizedToken, TokenSet, TokenSource, TokenType,
        TokenValue, TokenValueOrAlias, TypographyValue,
    };
    pub use tokenforge_core::validate::{validate, ValidationReport};
    pub use tokenforge_import::{
        DtcgImporter, FigmaImporter, ImportError, ImportResult, Importer,
    };
}
