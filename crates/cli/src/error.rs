use engine_core::error::SourceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the configuration file {path}: {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Giving up after {count} consecutive failed polls: {last}")]
    TooManyFailures {
        count: u32,
        #[source]
        last: SourceError,
    },

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
