//! Qreel server binary entry point.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qreel_engine::SpinEngine;
use qreel_server::{AppState, ServerConfig, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "qreel_server=info,qreel_engine=info,qreel_adapter_ibm=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Create configuration
    let mut config = ServerConfig::default();
    if let Ok(bind) = std::env::var("QREEL_BIND") {
        config.bind_address = bind
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid QREEL_BIND address '{bind}': {e}"))?;
    }
    let bind_addr = config.bind_address;

    // Build the engine; this resolves and connects the hardware backend
    // when a token is configured.
    let engine = SpinEngine::from_env().await;
    let state = Arc::new(AppState::new(engine));

    // Create the router
    let app = create_router(state);

    // Start the server
    tracing::info!("Starting qreel server at http://{}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
