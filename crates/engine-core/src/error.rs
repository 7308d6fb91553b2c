use connectors::sql::base::error::{ConnectorError, DbError};
use engine_config::error::ConfigError;
use thiserror::Error;

/// Errors surfaced by a source connector through its lifecycle operations.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Malformed or incomplete configuration. Fatal to `init`.
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    /// The database could not be reached or released.
    #[error("{kind} connection error: {source}")]
    Connection {
        kind: String,
        #[source]
        source: ConnectorError,
    },

    /// A poll's query failed or was cancelled. The source stays usable.
    #[error("query failed: {0}")]
    Query(#[source] DbError),

    /// A row could not be encoded. The source stays usable.
    #[error("conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    /// The host cancelled while the source was waiting for its next tick.
    #[error("end of stream")]
    EndOfStream,

    #[error("cannot {operation} a source that is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },
}

impl SourceError {
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, SourceError::EndOfStream)
    }

    /// Whether the source is still usable after this error, so the host may
    /// simply call `read_batch` again.
    pub fn is_transient(&self) -> bool {
        matches!(self, SourceError::Query(_) | SourceError::Conversion(_))
    }
}

/// Errors raised while encoding a row into a record payload.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("column '{column}' holds a non-finite float ({value}) that cannot be encoded")]
    NonFiniteFloat { column: String, value: f64 },

    #[error("failed to serialize row: {0}")]
    Serialize(#[from] serde_json::Error),
}
