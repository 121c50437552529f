use crate::datasource::{DataSourceError, OrderSource};
use crate::domain::{SellerId, TierName};
use crate::engine::{compute_progress, compute_stats, SellerStats, TierProgress};
use crate::orchestration::sessions::SessionCaches;
use std::sync::Arc;

/// Everything the API reports about one seller's standing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerStanding {
    pub seller: SellerId,
    pub tier: TierName,
    pub stats: SellerStats,
    pub progress: TierProgress,
}

/// Fetches an order snapshot and runs it through the session cache and the
/// progress calculator.
#[derive(Clone)]
pub struct TierService {
    orders: Arc<dyn OrderSource>,
    caches: Arc<SessionCaches>,
}

impl TierService {
    pub fn new(orders: Arc<dyn OrderSource>, caches: Arc<SessionCaches>) -> Self {
        Self { orders, caches }
    }

    pub async fn standing(
        &self,
        session: Option<&str>,
        seller: &SellerId,
    ) -> Result<SellerStanding, DataSourceError> {
        let orders = self.orders.fetch_orders(seller).await?;

        let stats = compute_stats(seller, &orders);
        let tier = self.caches.resolve(session, seller, &orders);
        let progress = compute_progress(tier, &stats);

        tracing::debug!(
            seller = %seller,
            tier = %tier,
            total_sales = stats.total_sales,
            "Resolved seller standing"
        );

        Ok(SellerStanding {
            seller: seller.clone(),
            tier,
            stats,
            progress,
        })
    }

    pub fn caches(&self) -> &SessionCaches {
        &self.caches
    }
}
