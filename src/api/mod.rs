pub mod health;
pub mod progress;
pub mod tiers;

use crate::config::Config;
use crate::orchestration::TierService;
use axum::http::HeaderMap;
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

/// Header carrying the caller's session id; scopes the tier cache.
pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub tiers: TierService,
}

impl AppState {
    pub fn new(config: Config, tiers: TierService) -> Self {
        Self { config, tiers }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/tiers", get(tiers::get_tier_table))
        .route("/v1/sellers/tiers", get(tiers::get_seller_tiers))
        .route("/v1/sellers/:seller/tier", get(tiers::get_seller_tier))
        .route("/v1/sellers/:seller/credits", get(progress::get_credits))
        .route("/v1/progress", get(progress::get_progress))
        .layer(cors)
        .with_state(state)
}

fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
