//! Agency inquiry API server

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agency_api::{build_router, ApiConfig, ApiState, RestInquiryStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    let mut state = ApiState::new();
    match &config.store {
        Some(settings) => {
            let store = RestInquiryStore::new(&settings.url, &settings.key)?;
            state = state.with_store(Arc::new(store));
            tracing::info!(url = %settings.url, "inquiries will be stored");
        }
        None => tracing::warn!("no datastore configured; inquiries will only be logged"),
    }

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("🚀 Inquiry API listening on http://{}", config.bind_addr);
    tracing::info!("📖 API docs at http://{}/docs", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
