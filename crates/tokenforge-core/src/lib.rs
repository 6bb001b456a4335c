//! Core model for normalized design tokens.
//!
//! This crate provides the shared foundation of the tokenforge pipeline:
//!
//! - **Token Model**: the normalized, source-agnostic token representation
//!   ([`token::NormalizedToken`], [`token::TokenSet`]) that every importer
//!   produces and every downstream generator consumes
//! - **Value Parsers**: decoding of color, dimension, and shadow literals
//!   into typed values ([`parse`])
//! - **Validation**: post-normalization checks over a whole token set —
//!   required-type coverage, alias-target existence, and circular-reference
//!   detection ([`validate`])
//!
//! Aliases stay symbolic throughout: a token whose value is
//! `Alias { reference }` is emitted as-is, and resolving the reference to a
//! concrete value is a downstream concern.
//!
//! # Example
//!
//! ```
//! use tokenforge_core::parse::parse_color;
//! use tokenforge_core::token::{NormalizedToken, TokenType, TokenValue, TokenValueOrAlias};
//!
//! let color = parse_color("#FF5733").expect("valid hex literal");
//! let token = NormalizedToken::new(
//!     "Color/Primary",
//!     TokenType::Color,
//!     TokenValueOrAlias::value(TokenValue::Color(color)),
//! )
//! .expect("payload matches type");
//!
//! assert_eq!(token.name, "color.primary");
//! assert_eq!(token.id, "color-primary");
//! ```

pub mod parse;
pub mod token;
pub mod validate;

mod error;

pub use error::{Error, Result};
