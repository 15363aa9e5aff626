use std::env;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tracing::info;

use campus_api::api::create_router;
use campus_api::app::AppState;
use campus_api::infra::{MongoStore, init_metrics_handle, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    // Read required environment variables
    let mongodb_uri = env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    let database = env::var("MONGODB_DATABASE").unwrap_or_else(|_| "campus".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5000);

    // Connect the store client; the driver's pool is shared for the
    // process lifetime and never explicitly released.
    let store = Arc::new(MongoStore::connect(&mongodb_uri, &database).await?);

    // Create shared application state
    let mut app_state = AppState::new(store);
    if let Some(metrics) = init_metrics_handle() {
        app_state = app_state.with_metrics(metrics);
    }

    // Create the router with all routes configured
    let router = create_router(Arc::new(app_state));

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server listening on http://{addr}");

    axum::serve(listener, router).await?;

    Ok(())
}
