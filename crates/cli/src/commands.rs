use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Poll the configured table and print every non-empty batch as a JSON line
    Run {
        #[arg(long, help = "Source config file path (JSON)")]
        config: String,

        #[arg(long, help = "Stop after this many non-empty batches")]
        max_batches: Option<u64>,

        #[arg(
            long,
            default_value_t = 5,
            help = "Give up after this many consecutive failed polls"
        )]
        max_failures: u32,
    },
    /// Validate the config and check that the database is reachable
    Check {
        #[arg(long, help = "Source config file path (JSON)")]
        config: String,
    },
}
