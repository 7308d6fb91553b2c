use crate::error::ConfigError;
use std::time::Duration;

pub mod interval;
pub mod source;
pub mod validator;

pub use source::{RawSourceConfig, SourceConfig, SourceQuery};
pub use validator::SourceConfigValidator;

pub const DEFAULT_BATCH_SIZE: usize = 100;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Parses and validates a raw JSON configuration blob.
pub fn parse_source_config(raw: &[u8]) -> Result<SourceConfig, ConfigError> {
    let raw: RawSourceConfig = serde_json::from_slice(raw)?;
    SourceConfigValidator::new().validate(raw)
}
