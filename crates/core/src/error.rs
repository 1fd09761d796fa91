//! Error type shared by every stage of the generation pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across `genese-core`.
pub type GeneseResult<T> = Result<T, GeneseError>;

/// Failures that abort a generation run before any file is written.
#[derive(Debug, Error)]
pub enum GeneseError {
    /// `package.json` (or the configuration layered on top of it) is missing or unreadable.
    #[error("Error while loading project context: {0}")]
    PackageContext(String),

    /// The project depends on neither Angular nor React.
    #[error("This is not an Angular or React application, aborting.")]
    UnknownProjectType,

    /// The configured OpenAPI document does not exist.
    #[error("OpenApi file not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    /// The OpenAPI document exists but is not valid JSON (or not an object tree we can read).
    #[error("Invalid OpenApi file: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// A template failed to compile or render.
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// Reading the document or writing an output file failed.
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl GeneseError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
