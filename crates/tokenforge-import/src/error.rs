//! Error taxonomy at the importer boundary.

/// How a failed ingest should map onto a process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitClass {
    /// The caller's configuration is inconsistent.
    Validation,
    /// The source could not be ingested.
    Fatal,
}

/// A failed ingest.
///
/// Per-token soft failures never produce one of these; they accumulate in
/// [`crate::ImportResult::warnings`]. An `ImportError` means the current
/// source produced no token set at all.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ImportError {
    /// Inconsistent caller-supplied configuration, e.g. both a file path
    /// and a URL for the same DTCG source.
    #[error("{0}")]
    Configuration(String),

    /// Load, parse, validation, or required-fetch failure. Messages are
    /// prefixed with the failing source (`DTCG import failed:` /
    /// `Figma import failed:`).
    #[error("{0}")]
    Fatal(String),
}

impl ImportError {
    /// The exit-code class this error maps to.
    pub fn exit_class(&self) -> ExitClass {
        match self {
            Self::Configuration(_) => ExitClass::Validation,
            Self::Fatal(_) => ExitClass::Fatal,
        }
    }
}
