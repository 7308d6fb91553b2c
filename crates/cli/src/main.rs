use crate::{
    error::CliError,
    poll::{RunOptions, Stopped},
    shutdown::{ExitCode, ShutdownCoordinator},
};
use clap::Parser;
use commands::Commands;
use engine_core::connectors::spi::{SourceConnector, new_mysql_source};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;
mod poll;
mod shutdown;

#[derive(Parser)]
#[command(
    name = "tablepoll",
    version = "0.1.0",
    about = "Polls a MySQL table and prints its rows as JSON batches"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Log at debug level (RUST_LOG takes precedence)")]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let code = match execute(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "tablepoll failed");
            ExitCode::GeneralError
        }
    };

    std::process::exit(code.as_i32());
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn execute(command: Commands) -> Result<ExitCode, CliError> {
    match command {
        Commands::Run {
            config,
            max_batches,
            max_failures,
        } => {
            let raw = read_config(&config).await?;

            let shutdown = ShutdownCoordinator::new(CancellationToken::new());
            shutdown.register_handlers();

            let options = RunOptions {
                max_batches,
                max_failures,
            };

            let mut source = new_mysql_source();
            let mut stdout = std::io::stdout().lock();
            let stopped =
                poll::run_source(source.as_mut(), &raw, options, &shutdown, &mut stdout).await?;

            if stopped == Stopped::EndOfStream && shutdown.is_shutdown_requested() {
                Ok(ExitCode::ShutdownRequested)
            } else {
                Ok(ExitCode::Success)
            }
        }
        Commands::Check { config } => {
            let raw = read_config(&config).await?;

            let mut source = new_mysql_source();
            let result = source.init(&raw).await;
            let closed = source.close().await;
            result?;
            closed?;

            info!(config = %config, "Source config is valid and the database is reachable");
            Ok(ExitCode::Success)
        }
    }
}

async fn read_config(path: &str) -> Result<Vec<u8>, CliError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| CliError::ConfigFileRead {
            path: path.to_string(),
            source,
        })
}
