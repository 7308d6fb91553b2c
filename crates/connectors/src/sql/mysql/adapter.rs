use crate::sql::base::{
    adapter::{DatabaseKind, SqlAdapter},
    dialect::{self, Dialect},
    error::{ConnectorError, DbError},
    row::DbRow,
};
use async_trait::async_trait;
use model::records::row::RowData;
use mysql_async::{Opts, OptsBuilder, Pool, Row, prelude::Queryable};
use tracing::{debug, trace};

#[derive(Clone)]
pub struct MySqlAdapter {
    pool: Pool,
    dialect: dialect::MySql,
}

#[async_trait]
impl SqlAdapter for MySqlAdapter {
    async fn connect(url: &str) -> Result<Self, ConnectorError> {
        // Every poll renders a new LIMIT/OFFSET statement, so caching the
        // prepared statements would only churn the server-side cache.
        let opts = OptsBuilder::from_opts(Opts::from_url(url)?).stmt_cache_size(0);
        let pool = Pool::new(opts);
        Ok(MySqlAdapter {
            pool,
            dialect: dialect::MySql,
        })
    }

    async fn ping(&self) -> Result<(), DbError> {
        let mut conn = self.pool.get_conn().await?;
        conn.ping().await?;
        trace!("MySQL ping succeeded");
        Ok(())
    }

    async fn query_rows(&self, sql: &str, entity: &str) -> Result<Vec<RowData>, DbError> {
        debug!(sql, "Executing MySQL query");

        let mut conn = self.pool.get_conn().await?;
        // binary protocol, so numeric columns arrive typed
        let rows: Vec<Row> = conn.exec(sql, ()).await?;

        Ok(rows
            .iter()
            .map(|row| DbRow::MySqlRow(row).to_row_data(entity))
            .collect())
    }

    async fn disconnect(self) -> Result<(), DbError> {
        self.pool.disconnect().await?;
        Ok(())
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::MySql
    }

    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }
}
