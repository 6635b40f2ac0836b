//! Typed failures for both pipelines.
//!
//! Functions return `crate::Result` (anyhow) and raise these variants through
//! `bail!` / `?`, so callers that care can `downcast_ref::<BenchError>()`.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// Malformed delimited input.
    #[error("parse error at {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("not found: {0}")]
    NotFound(PathBuf),

    /// A column the mapping expects is absent, or the mapping would produce a
    /// clashing header.
    #[error("schema error: {0}")]
    Schema(String),

    /// A required pattern is absent from an artifact.
    #[error("cannot extract {field} from {path}")]
    Extraction { field: &'static str, path: PathBuf },

    /// A trace file with no header line.
    #[error("cannot count iterations in {0}: file is empty")]
    Count(PathBuf),

    #[error("run '{run}' is missing artifacts: {missing}")]
    MissingArtifact { run: String, missing: String },

    #[error("run '{run}' has more than one {kind} artifact: {first} and {second}")]
    DuplicateArtifact {
        run: String,
        kind: &'static str,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("invalid column mapping: {0}")]
    Mapping(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}
