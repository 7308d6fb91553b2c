#![allow(dead_code)]

use crate::mysql_url;
use engine_core::{
    connectors::{source::MySqlTableSource, spi::SourceConnector},
    error::SourceError,
};
use model::records::batch::Batch;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// DDL for a small table covering the column types a poll has to decode.
pub const POLL_TYPES_TABLE_DDL: &str = r#"CREATE TABLE poll_types (
  id INT PRIMARY KEY,
  born DATE,
  updated_at DATETIME(6),
  shift TIME,
  price DECIMAL(10, 2),
  ratio FLOAT,
  avatar BLOB,
  note VARCHAR(64)
);"#;

pub const POLL_USERS_TABLE_DDL: &str = r#"CREATE TABLE poll_users (
  id INT PRIMARY KEY,
  name VARCHAR(45) NOT NULL
);"#;

pub const POLL_USERS_INSERT: &str = r#"INSERT INTO poll_users (id, name) VALUES
  (1, 'ada'), (2, 'grace'), (3, 'edsger'), (4, 'barbara'), (5, 'ken');"#;

/// Config bytes for a MySQL source against the test database, merged with
/// `extra`.
pub fn source_config(extra: Value) -> Vec<u8> {
    let mut config = json!({
        "connection_string": mysql_url(),
        "poll_interval": "50ms",
        "connect_timeout": "5s",
    });
    if let (Some(config), Some(extra)) = (config.as_object_mut(), extra.as_object()) {
        config.extend(extra.clone());
    }
    serde_json::to_vec(&config).expect("serialize config")
}

pub async fn init_source(extra: Value) -> MySqlTableSource {
    let mut source = MySqlTableSource::new();
    source
        .init(&source_config(extra))
        .await
        .expect("init source");
    source
}

pub async fn read(source: &mut MySqlTableSource) -> Result<Batch, SourceError> {
    source.read_batch(&CancellationToken::new()).await
}

/// Decodes every payload of `batch` back into JSON.
pub fn payloads(batch: &Batch) -> Vec<Value> {
    batch
        .records
        .iter()
        .map(|r| serde_json::from_slice(&r.payload).expect("payload is JSON"))
        .collect()
}
