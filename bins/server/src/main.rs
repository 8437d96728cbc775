//! Immobook API Server
//!
//! Main entry point for the booking schedule service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use immobook_api::{AppState, create_router};
use immobook_core::SystemClock;
use immobook_core::schedule::ScheduleService;
use immobook_db::connect_with;
use immobook_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "immobook=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    let db = connect_with(&config.database).await?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    let schedule = ScheduleService::from_config(config.schedule);
    info!(
        horizon_months = schedule.horizon_months(),
        "Schedule generator configured"
    );

    let state = AppState {
        db: Arc::new(db),
        clock: Arc::new(SystemClock),
        schedule,
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
