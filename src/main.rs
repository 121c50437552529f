use anyhow::Context;
use seller_tiers::engine::{Clock, SystemClock};
use seller_tiers::{api, config::Config, HttpOrderSource, OrderSource, SessionCaches, TierService};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("Configuration error")?;
    let port = config.port;

    let orders: Arc<dyn OrderSource> = Arc::new(HttpOrderSource::new(
        config.orders_api_url.clone(),
        config.orders_api_timeout,
    ));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let caches = Arc::new(SessionCaches::new(config.tier_cache_ttl, clock));
    let tiers = TierService::new(orders, caches);

    let app = api::create_router(api::AppState::new(config, tiers));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
