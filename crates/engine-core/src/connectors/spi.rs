use crate::{connectors::source::MySqlTableSource, error::SourceError};
use async_trait::async_trait;
use model::records::batch::Batch;
use tokio_util::sync::CancellationToken;

/// Lifecycle contract between a host and a polling source.
///
/// The host calls `init` once, then `read_batch` repeatedly with at most one
/// call in flight, then `close` once. An empty batch means there was nothing
/// new this poll; [`SourceError::EndOfStream`] means the host cancelled.
#[async_trait]
pub trait SourceConnector: Send {
    async fn init(&mut self, config: &[u8]) -> Result<(), SourceError>;

    async fn read_batch(&mut self, cancel: &CancellationToken) -> Result<Batch, SourceError>;

    async fn close(&mut self) -> Result<(), SourceError>;
}

/// A fresh, uninitialized MySQL table source.
pub fn new_mysql_source() -> Box<dyn SourceConnector> {
    Box::new(MySqlTableSource::new())
}
