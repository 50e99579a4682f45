//! Submission Desk API - Main Entry Point

use submission_api::{build_router, ApiConfig, ApiState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Submission Desk API v{}", env!("CARGO_PKG_VERSION"));

    let config = ApiConfig::from_env();
    let bind_addr = config.bind_addr.clone();

    let state = ApiState::from_config(config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("Swagger UI at http://{}/docs", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
