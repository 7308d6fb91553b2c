use crate::{
    connectors::spi::SourceConnector,
    convert::RowConverter,
    error::SourceError,
    metrics::SourceMetrics,
    scheduler::{PollScheduler, Wake},
};
use async_trait::async_trait;
use connectors::sql::{
    base::{
        adapter::SqlAdapter,
        error::{ConnectorError, DbError},
        query::generator::QueryGenerator,
    },
    mysql::adapter::MySqlAdapter,
};
use engine_config::settings::{SourceConfig, SourceQuery, parse_source_config};
use model::{
    pagination::offset::{Paginator, ScanProgress},
    records::{batch::Batch, record::META_TABLE},
};
use std::mem;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub type MySqlTableSource = TableSource<MySqlAdapter>;

/// Everything a ready source owns. Exists only between `init` and `close`.
struct Session<A: SqlAdapter> {
    adapter: A,
    scheduler: PollScheduler,
    paginator: Paginator,
    base_query: String,
    converter: RowConverter,
    config: SourceConfig,
}

enum SourceState<A: SqlAdapter> {
    Uninitialized,
    Ready(Box<Session<A>>),
    Closed,
}

impl<A: SqlAdapter> SourceState<A> {
    fn name(&self) -> &'static str {
        match self {
            SourceState::Uninitialized => "uninitialized",
            SourceState::Ready(_) => "ready",
            SourceState::Closed => "closed",
        }
    }
}

/// Polls one table (or one custom SELECT) page by page on a fixed interval.
///
/// Each tick fetches the next `batch_size` rows after the current offset.
/// When a page comes back empty the scan starts over from the first row, so
/// rows are re-emitted on every full pass. Without an `ORDER BY` in a custom
/// query the row order, and therefore page boundaries, are whatever the
/// server's natural order happens to be.
pub struct TableSource<A: SqlAdapter> {
    state: SourceState<A>,
    metrics: SourceMetrics,
}

impl<A: SqlAdapter> TableSource<A> {
    pub fn new() -> Self {
        Self {
            state: SourceState::Uninitialized,
            metrics: SourceMetrics::new(),
        }
    }

    pub fn metrics(&self) -> SourceMetrics {
        self.metrics.clone()
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, SourceState::Ready(_))
    }

    /// Scan position of the next poll, if the source is ready.
    pub fn offset(&self) -> Option<u64> {
        match &self.state {
            SourceState::Ready(session) => Some(session.paginator.offset()),
            _ => None,
        }
    }

    fn invalid_state(&self, operation: &'static str) -> SourceError {
        SourceError::InvalidState {
            operation,
            state: self.state.name(),
        }
    }

    async fn open_session(config: SourceConfig) -> Result<Session<A>, SourceError> {
        let adapter = A::connect(&config.connection_string)
            .await
            .map_err(|source| SourceError::Connection {
                kind: scheme_of(&config.connection_string),
                source,
            })?;

        let timeout = config.connect_timeout();
        let ping = match time::timeout(timeout, adapter.ping()).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(ConnectorError::Ping(e)),
            Err(_) => Err(ConnectorError::Timeout(timeout)),
        };

        if let Err(source) = ping {
            let kind = adapter.kind().to_string();
            if let Err(e) = adapter.disconnect().await {
                warn!(error = %e, "Failed to release connection after failed ping");
            }
            return Err(SourceError::Connection { kind, source });
        }

        let generator = QueryGenerator::new(adapter.dialect());
        let base_query = match &config.query {
            SourceQuery::Table(table) => generator.select_all(table),
            SourceQuery::Custom(sql) => sql.clone(),
        };

        let converter = RowConverter::new(adapter.kind().as_str(), config.table());

        Ok(Session {
            scheduler: PollScheduler::new(config.poll_interval()),
            paginator: Paginator::new(config.batch_size()),
            adapter,
            base_query,
            converter,
            config,
        })
    }
}

impl<A: SqlAdapter> Default for TableSource<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: SqlAdapter> Session<A> {
    async fn poll(
        &mut self,
        cancel: &CancellationToken,
        metrics: &SourceMetrics,
    ) -> Result<Batch, SourceError> {
        if self.scheduler.wait(cancel).await == Wake::Cancelled {
            return Err(SourceError::EndOfStream);
        }

        let window = self.paginator.window();
        let sql = QueryGenerator::new(self.adapter.dialect()).paginate(&self.base_query, window);

        let rows = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DbError::Cancelled),
            rows = self.adapter.query_rows(&sql, self.config.table()) => rows,
        }
        .map_err(SourceError::Query)?;

        let records = self.converter.convert_all(&rows)?;

        match self.paginator.record_page(records.len()) {
            ScanProgress::Restarted => {
                debug!(
                    table = self.config.table(),
                    offset = window.offset,
                    "No rows returned, restarting scan"
                );
                metrics.record_poll(0, 0);
                Ok(Batch::empty())
            }
            ScanProgress::Advanced { offset } => {
                let batch = Batch::new(records).with_context(META_TABLE, self.config.table());
                debug!(
                    table = self.config.table(),
                    records = batch.len(),
                    offset,
                    "Read batch"
                );
                metrics.record_poll(batch.len() as u64, batch.size_bytes() as u64);
                Ok(batch)
            }
        }
    }
}

#[async_trait]
impl<A: SqlAdapter + 'static> SourceConnector for TableSource<A> {
    async fn init(&mut self, config: &[u8]) -> Result<(), SourceError> {
        if !matches!(self.state, SourceState::Uninitialized) {
            return Err(self.invalid_state("init"));
        }

        let config = parse_source_config(config)?;
        debug!(config = ?config, "Parsed source config");

        let session = Self::open_session(config).await?;
        info!(
            table = session.config.table(),
            batch_size = session.config.batch_size(),
            poll_interval = ?session.config.poll_interval(),
            "Source initialized"
        );

        self.state = SourceState::Ready(Box::new(session));
        Ok(())
    }

    async fn read_batch(&mut self, cancel: &CancellationToken) -> Result<Batch, SourceError> {
        let state = self.state.name();
        let SourceState::Ready(session) = &mut self.state else {
            return Err(SourceError::InvalidState {
                operation: "read_batch",
                state,
            });
        };

        let result = session.poll(cancel, &self.metrics).await;
        if matches!(&result, Err(e) if e.is_transient()) {
            self.metrics.increment_failures(1);
        }
        result
    }

    async fn close(&mut self) -> Result<(), SourceError> {
        let SourceState::Ready(session) = mem::replace(&mut self.state, SourceState::Closed) else {
            return Ok(());
        };

        let Session {
            adapter, scheduler, ..
        } = *session;
        drop(scheduler);

        let kind = adapter.kind().to_string();
        adapter
            .disconnect()
            .await
            .map_err(|e| SourceError::Connection {
                kind,
                source: ConnectorError::Disconnect(e),
            })?;

        info!("Source closed");
        Ok(())
    }
}

fn scheme_of(connection_string: &str) -> String {
    connection_string
        .split_once("://")
        .map(|(scheme, _)| scheme.to_string())
        .unwrap_or_else(|| "database".to_string())
}
