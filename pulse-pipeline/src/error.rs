//! Pipeline error types.
//!
//! Every failure mode has a named variant. Per-SKU decode failures are
//! not errors at all — they surface as sentinel fields in the decoded
//! records.

use pulse_decoder::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in the header row: {0}")]
    Header(csv::Error),

    #[error("CSV parse error at line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("column '{column}' not found in {table} data")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Result type alias for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;
