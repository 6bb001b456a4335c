//! Figma variables ingestion.
//!
//! This crate talks to a Figma-style variables service and maps its typed
//! variables into the shared token model:
//!
//! - [`api`] — wire types for the two REST endpoints consumed
//! - [`client`] — a thin `reqwest`-backed client with the canonical error
//!   mapping for authentication, missing files, and rate limiting
//! - [`normalize`] — per-variable normalization: type mapping, default-mode
//!   selection, alias resolution through the id→name table, and
//!   human-readable mode naming

pub mod api;
pub mod client;
pub mod normalize;

pub use api::{FigmaVariable, ModeValue, VariableCollection, VariableMode};
pub use client::{ApiError, FigmaClient, FigmaClientConfig};
pub use normalize::{normalize_variables, VariablesNormalized};
