use clap::Parser;
use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotbook_cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables before clap reads its env fallbacks
    dotenv().ok();

    // Logs go to stderr so command output stays clean
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    slotbook_cli::run(Cli::parse()).await
}
