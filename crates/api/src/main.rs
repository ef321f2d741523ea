use std::sync::Arc;

use anyhow::Context;

use coffeetek_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before logging init: RUST_LOG / LOG_FORMAT may live in `.env`.
    dotenvy::dotenv().ok();
    coffeetek_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let services = coffeetek_api::app::services::build_services(&config)
        .await
        .context("failed to initialise catalog store")?;
    let app = coffeetek_api::app::build_app(Arc::new(services));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("CoffeeTek POS API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
