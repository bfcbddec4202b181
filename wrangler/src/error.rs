//! Error types for loading and wrangling listings.
//!
//! Only access and schema problems are errors. Rows that fail a validity
//! rule are dropped by the pipeline and never surface here.

use std::path::PathBuf;

use polars::prelude::PolarsError;

/// Result type for wrangling operations
pub type WrangleResult<T> = Result<T, WrangleError>;

#[derive(Debug, thiserror::Error)]
pub enum WrangleError {
    /// Input path missing or unreadable
    #[error("Failed to access {}: {}", .path.display(), .source)]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A column the pipeline depends on is absent from the table
    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data frame error: {0}")]
    Polars(#[from] PolarsError),
}

impl WrangleError {
    pub fn access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Access {
            path: path.into(),
            source,
        }
    }

    pub fn missing_column(name: impl Into<String>) -> Self {
        Self::MissingColumn(name.into())
    }
}
