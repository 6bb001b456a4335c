//! Importer orchestration.
//!
//! An importer is a single capability: ingest one source into an
//! [`ImportResult`]. Two implementations exist:
//!
//! - [`DtcgImporter`] — loads a DTCG document from a file path or URL and
//!   runs it through validation, flattening, and normalization
//! - [`FigmaImporter`] — fetches variables and collections concurrently
//!   from the variables service and normalizes them
//!
//! Each `ingest` call is an independent unit of work: the lookup tables it
//! builds are call-scoped, two concurrent ingests never share state, and
//! dropping the future abandons any in-flight retrievals.
//!
//! Failure policy: per-token problems accumulate as warnings and never
//! abort an ingest; load, parse, and validation failures abort the current
//! source with an [`ImportError`] the caller can inspect, so a multi-source
//! driver may continue with its other sources.

mod dtcg;
mod error;
mod figma;
mod result;

pub use dtcg::{DtcgImporter, DtcgLocator};
pub use error::{ExitClass, ImportError};
pub use figma::FigmaImporter;
pub use result::ImportResult;

use async_trait::async_trait;

/// The importer capability: ingest one source into a token set.
#[async_trait]
pub trait Importer {
    /// Run the ingest. Soft failures are reported inside the result;
    /// fatal ones abort with an error.
    async fn ingest(&self) -> Result<ImportResult, ImportError>;
}
