use crate::sql::base::{
    dialect::Dialect,
    error::{ConnectorError, DbError},
};
use async_trait::async_trait;
use model::records::row::RowData;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    MySql,
}

impl DatabaseKind {
    /// Short name used as the `source` tag on emitted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseKind::MySql => "mysql",
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection-owning handle to a SQL database.
///
/// `connect` only builds the handle; no round trip to the server is made
/// until [`SqlAdapter::ping`] or a query runs.
#[async_trait]
pub trait SqlAdapter: Send + Sync {
    async fn connect(url: &str) -> Result<Self, ConnectorError>
    where
        Self: Sized;

    /// Round-trips to the server to prove it is reachable.
    async fn ping(&self) -> Result<(), DbError>;

    /// Runs `sql` and decodes every row, tagging them with `entity`.
    async fn query_rows(&self, sql: &str, entity: &str) -> Result<Vec<RowData>, DbError>;

    /// Closes every pooled connection. The handle is unusable afterwards.
    async fn disconnect(self) -> Result<(), DbError>
    where
        Self: Sized;

    fn kind(&self) -> DatabaseKind;

    fn dialect(&self) -> &dyn Dialect;
}
