use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotbook_api::config::ApiConfig;
use slotbook_db::connect_store;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    slotbook_api::init_tracing(config.log_level)?;

    // Connect the configured slot store
    let store = connect_store(&config.store).await?;

    // Start API server
    slotbook_api::start_server(config, store).await?;

    Ok(())
}
