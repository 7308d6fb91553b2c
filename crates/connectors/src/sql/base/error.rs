use std::time::Duration;
use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Any MySQL driver error, including failures while scanning rows.
    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    /// The statement was abandoned because the caller cancelled.
    #[error("query cancelled")]
    Cancelled,

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Errors happening while establishing or verifying a connection.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The connection string could not be parsed.
    #[error("invalid connection string: {0}")]
    InvalidUrl(#[from] mysql_async::UrlError),

    /// The liveness check reached the server but failed.
    #[error("ping failed: {0}")]
    Ping(#[source] DbError),

    /// The liveness check did not complete in time.
    #[error("ping timed out after {0:?}")]
    Timeout(Duration),

    /// Releasing the connection pool failed.
    #[error("disconnect failed: {0}")]
    Disconnect(#[source] DbError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
