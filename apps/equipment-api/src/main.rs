//! Equipment API - REST server for the equipment stock service

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    let state = AppState {
        config: config.clone(),
        mongo_client,
        db,
    };

    // Initialize indexes
    api::init_indexes(&state).await?;

    // Build REST router
    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router.merge(health_router(config.app));

    info!("Starting Equipment API on port {}", config.server.port);

    // Run server with graceful shutdown
    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing MongoDB connections");
        drop(state);
        info!("MongoDB connection closed");
    })
    .await?;

    info!("Equipment API shutdown complete");
    Ok(())
}
