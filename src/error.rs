//! Error types for compose-testgen

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading inputs or rendering output.
///
/// The analysis core itself never fails: unresolved references, untagged
/// elements and unsupported types degrade the affected function's output and
/// are reported through [`crate::AnalysisDiagnostics`] instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Source model parse error: {0}")]
    SourceParse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<minijinja::Error> for Error {
    fn from(e: minijinja::Error) -> Self {
        Error::Render(e.to_string())
    }
}
