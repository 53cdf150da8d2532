use std::sync::Arc;
use tokio::net::TcpListener;
use url_summarizer::{
    api::routes::create_router,
    config::Config,
    db,
    store::SummaryStore,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;

    // Connect to the database and initialize the schema
    let pool = db::connect(&config.database_url).await?;

    // Create application state
    let app_state = AppState {
        config: Arc::new(config),
        store: SummaryStore::new(pool),
    };

    // Build the router with routes
    let app = create_router(app_state);

    // Create the listener
    let listener = TcpListener::bind(server_addr).await?;

    // Start the server
    tracing::info!("listening on {}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
