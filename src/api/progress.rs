use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::{session_id, AppState};
use crate::domain::{Decimal, SellerId, TierName};
use crate::engine::{bonus_credits, compute_progress, SellerStats, TierProgress};
use crate::error::AppError;

/// All fields arrive as raw strings; bad numbers are coerced to zero.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressQuery {
    pub tier: Option<String>,
    pub total_sales: Option<String>,
    pub total_revenue: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub tier: TierName,
    pub next_tier: TierName,
    #[serde(flatten)]
    pub progress: TierProgress,
}

#[derive(Debug, Deserialize)]
pub struct CreditsQuery {
    pub earnings: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditsResponse {
    pub seller: String,
    pub tier: TierName,
    pub credit_rate: Decimal,
    pub earnings: Decimal,
    pub bonus_credits: Decimal,
}

pub async fn get_progress(Query(params): Query<ProgressQuery>) -> Json<ProgressResponse> {
    let tier = TierName::parse_or_default(params.tier.as_deref().unwrap_or(""));
    let stats = SellerStats::new(
        params
            .total_sales
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(0),
        params
            .total_revenue
            .as_deref()
            .and_then(|s| Decimal::from_str_canonical(s).ok())
            .unwrap_or_default(),
    );

    Json(ProgressResponse {
        tier,
        next_tier: tier.next(),
        progress: compute_progress(tier, &stats),
    })
}

pub async fn get_credits(
    Path(seller): Path<String>,
    Query(params): Query<CreditsQuery>,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Json<CreditsResponse>, AppError> {
    let seller = SellerId::parse(&seller)
        .ok_or_else(|| AppError::BadRequest("seller must not be empty".to_string()))?;
    let earnings = params
        .earnings
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("earnings is required".to_string()))
        .and_then(|s| {
            Decimal::from_str_canonical(s)
                .map_err(|_| AppError::BadRequest("Invalid earnings".to_string()))
        })?;
    if earnings.is_negative() {
        return Err(AppError::BadRequest("earnings must be >= 0".to_string()));
    }

    let session = session_id(&headers);
    let standing = state.tiers.standing(session.as_deref(), &seller).await?;
    let tier = standing.tier;

    Ok(Json(CreditsResponse {
        seller: seller.as_str().to_string(),
        tier,
        credit_rate: tier.definition().credit_rate(),
        earnings,
        bonus_credits: bonus_credits(tier, earnings),
    }))
}
