use thiserror::Error;

/// Errors raised while parsing or validating a source configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The raw configuration is not a valid JSON document of the expected shape.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required property is absent or blank.
    #[error("{0} is required")]
    MissingProperty(&'static str),

    /// The custom query cannot be paginated as a plain SELECT.
    #[error("query must be a SELECT statement: {0}")]
    InvalidQuery(String),

    /// The table name is not a usable `table` or `schema.table` identifier.
    #[error("invalid table name: {0:?}")]
    InvalidTable(String),
}
