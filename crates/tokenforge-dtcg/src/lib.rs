//! DTCG document processing.
//!
//! A DTCG (Design Tokens Community Group) document is a nested JSON tree
//! of groups and tokens, where a token is any node carrying a `$type`.
//! This crate turns such a document into normalized tokens in three
//! sequential passes:
//!
//! 1. [`validate::validate_document`] — structural validation; accumulates
//!    diagnostics instead of failing fast
//! 2. [`flatten::flatten_document`] — walks the tree into a path-keyed
//!    token list, composing typography groups into single synthetic tokens
//! 3. [`normalize::normalize_document`] — maps each flattened token into
//!    the shared model, resolving `{dotted.path}` alias syntax and
//!    extracting per-mode values
//!
//! The passes are separate so the normalizer never needs to know that
//! individual typography-property tokens ever existed: composition is the
//! flattener's concern.

pub mod flatten;
pub mod normalize;
pub mod validate;

pub use flatten::{flatten_document, FlatDocument, FlatToken, FlatValue};
pub use normalize::{normalize_document, DtcgNormalized};
pub use validate::{validate_document, DtcgValidation};
