use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use crate::api::{session_id, AppState};
use crate::domain::{Decimal, SellerId, TierDefinition, TierName, TIERS};
use crate::engine::{next_tier, SellerStats, TierProgress};
use crate::error::AppError;
use crate::orchestration::SellerStanding;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierView {
    pub name: TierName,
    pub rank: usize,
    pub min_sales: u32,
    pub min_revenue: Decimal,
    pub credit_rate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<&'static str>,
    pub color: &'static str,
}

impl From<&TierDefinition> for TierView {
    fn from(def: &TierDefinition) -> Self {
        Self {
            name: def.name,
            rank: def.name.rank(),
            min_sales: def.min_sales,
            min_revenue: def.min_revenue(),
            credit_rate: def.credit_rate(),
            badge: def.badge_ref,
            color: def.color,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerTierResponse {
    pub seller: String,
    pub tier: TierView,
    pub stats: SellerStats,
    pub progress: TierProgress,
    /// Absent at the top tier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_tier: Option<TierView>,
}

impl From<SellerStanding> for SellerTierResponse {
    fn from(standing: SellerStanding) -> Self {
        let next = next_tier(standing.tier);
        Self {
            seller: standing.seller.as_str().to_string(),
            tier: standing.tier.definition().into(),
            stats: standing.stats,
            progress: standing.progress,
            next_tier: (next != standing.tier).then(|| next.definition().into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SellerTiersQuery {
    pub sellers: Option<String>,
}

pub async fn get_tier_table() -> Json<Vec<TierView>> {
    Json(TIERS.iter().map(TierView::from).collect())
}

pub async fn get_seller_tier(
    Path(seller): Path<String>,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Json<SellerTierResponse>, AppError> {
    let seller = SellerId::parse(&seller)
        .ok_or_else(|| AppError::BadRequest("seller must not be empty".to_string()))?;
    let session = session_id(&headers);

    let standing = state.tiers.standing(session.as_deref(), &seller).await?;
    Ok(Json(standing.into()))
}

pub async fn get_seller_tiers(
    Query(params): Query<SellerTiersQuery>,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Json<Vec<SellerTierResponse>>, AppError> {
    let raw = params
        .sellers
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("sellers is required".to_string()))?;
    let sellers = parse_sellers(raw);
    if sellers.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let session = session_id(&headers);

    // Fetch all sellers concurrently
    let lookups = sellers.iter().map(|seller| {
        let state = state.clone();
        let session = session.clone();
        async move {
            state
                .tiers
                .standing(session.as_deref(), seller)
                .await
                .map_err(|e| {
                    tracing::error!(seller = %seller, error = %e, "Tier lookup failed");
                    AppError::from(e)
                })
        }
    });

    let standings = try_join_all(lookups).await?;
    Ok(Json(standings.into_iter().map(Into::into).collect()))
}

/// Comma-separated ids, normalized, sorted and deduplicated.
fn parse_sellers(raw: &str) -> Vec<SellerId> {
    let mut sellers: Vec<SellerId> = raw.split(',').filter_map(SellerId::parse).collect();
    sellers.sort_unstable();
    sellers.dedup();
    sellers
}
