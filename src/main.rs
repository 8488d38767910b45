use std::sync::Arc;
use supplier_desk::{
    api::{self, AppState},
    config::{self, database},
    errors::Result,
    llm::{OpenAiSummarizer, SupplierSummarizer},
    seed,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal: env vars can be set externally
    dotenvy::dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;

    // 4. Connect and create tables
    let db = database::create_connection()
        .await
        .inspect(|_| info!("Connected to {}", database::get_database_url()))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed an empty database from config
    seed::seed_initial_data(&db, &app_config)
        .await
        .inspect_err(|e| error!("Failed to seed initial data: {}", e))?;

    // 6. LLM summarizer; the key is read here, not stored in AppConfig
    let api_key = std::env::var("OPENAI_API_KEY").ok();
    let summarizer = OpenAiSummarizer::from_config(&app_config.llm, api_key)?
        .map(|s| Arc::new(s) as Arc<dyn SupplierSummarizer>);

    // 7. Serve
    let state = Arc::new(AppState {
        db,
        expose_error_details: app_config.server.expose_error_details,
        summarizer,
    });
    let listener = tokio::net::TcpListener::bind(app_config.server.bind_address.as_str())
        .await
        .inspect_err(|e| {
            error!(
                "Failed to bind to {}: {} - is another instance running?",
                app_config.server.bind_address, e
            );
        })?;
    info!("HTTP server listening on {}", app_config.server.bind_address);

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received.");
}
