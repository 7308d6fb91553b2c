use crate::{error::CliError, output, shutdown::ShutdownCoordinator};
use engine_core::connectors::spi::SourceConnector;
use std::io::Write;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub max_batches: Option<u64>,
    pub max_failures: u32,
}

/// Why a run stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stopped {
    /// The host cancelled, usually on a shutdown signal.
    EndOfStream,
    /// `max_batches` non-empty batches were written.
    BatchLimit,
}

/// Drives one source through its whole lifecycle: init, poll until stopped,
/// close. `close` runs whatever happened before it; its error is reported
/// only when the run itself succeeded.
pub async fn run_source(
    source: &mut dyn SourceConnector,
    config: &[u8],
    options: RunOptions,
    shutdown: &ShutdownCoordinator,
    out: &mut impl Write,
) -> Result<Stopped, CliError> {
    let result = match source.init(config).await {
        Ok(()) => poll_loop(source, options, shutdown, out).await,
        Err(e) => Err(e.into()),
    };

    let closed = source.close().await;
    let stopped = result?;
    closed?;

    info!(?stopped, "Source stopped");
    Ok(stopped)
}

async fn poll_loop(
    source: &mut dyn SourceConnector,
    options: RunOptions,
    shutdown: &ShutdownCoordinator,
    out: &mut impl Write,
) -> Result<Stopped, CliError> {
    let cancel = shutdown.cancel_token();
    let mut written = 0u64;
    let mut failures = 0u32;

    loop {
        match source.read_batch(&cancel).await {
            Ok(batch) => {
                failures = 0;
                if batch.is_empty() {
                    debug!("No new rows");
                    continue;
                }

                output::write_batch(out, &batch)?;
                written += 1;

                if options.max_batches.is_some_and(|max| written >= max) {
                    return Ok(Stopped::BatchLimit);
                }
            }
            Err(e) if e.is_end_of_stream() => return Ok(Stopped::EndOfStream),
            Err(e) if e.is_transient() => {
                failures += 1;
                warn!(error = %e, failures, "Poll failed");
                if failures >= options.max_failures {
                    return Err(CliError::TooManyFailures {
                        count: failures,
                        last: e,
                    });
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}
