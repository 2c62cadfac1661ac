use storefront_server::{AppState, Config, Server, utils::init_logger};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_logger(config.log_dir.as_deref());

    tracing::info!(
        environment = %config.environment,
        spreadsheet = %config.sheets.spreadsheet_name,
        "Starting storefront-server"
    );

    let state = AppState::initialize(&config)?;
    Server::with_state(config, state).run().await?;

    Ok(())
}
