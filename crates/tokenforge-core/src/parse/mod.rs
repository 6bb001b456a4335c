//! Parsers for source-side value literals.
//!
//! Each parser turns a loosely-typed source value into a typed model value,
//! returning `None` for anything it cannot decode. Parse failures are soft:
//! callers record a warning and skip the token rather than aborting the
//! ingest.

mod color;
mod dimension;
mod shadow;

pub use color::parse_color;
pub use dimension::{parse_dimension, parse_radius};
pub use shadow::parse_shadow;
