use axum::extract::State;
use axum::Json;

use crate::api::AppState;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
    let ttl_ms = u64::try_from(state.config.tier_cache_ttl.as_millis()).unwrap_or(u64::MAX);
    Json(serde_json::json!({
        "status": "ready",
        "tierCacheTtlMs": ttl_ms,
        "sessions": state.tiers.caches().session_count(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_returns_ok() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }
}
