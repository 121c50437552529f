//! Tier resolution over an order snapshot.

use crate::domain::{Decimal, Order, SellerId, TierName};
use serde::{Deserialize, Serialize};

/// Aggregated sales figures for one seller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerStats {
    pub total_sales: i64,
    pub total_revenue: Decimal,
}

impl SellerStats {
    pub fn new(total_sales: i64, total_revenue: Decimal) -> Self {
        Self {
            total_sales,
            total_revenue,
        }
    }
}

/// Count and sum the orders belonging to `seller`.
///
/// Matching is exact; ids are expected to be normalized already.
pub fn compute_stats(seller: &SellerId, orders: &[Order]) -> SellerStats {
    let mut total_sales: i64 = 0;
    let mut total_revenue = Decimal::zero();

    for order in orders.iter().filter(|o| &o.seller == seller) {
        total_sales = total_sales.saturating_add(1);
        let contribution = order.revenue_contribution();
        total_revenue = total_revenue
            .checked_add(contribution)
            .unwrap_or(Decimal::new(rust_decimal::Decimal::MAX));
    }

    SellerStats::new(total_sales, total_revenue)
}

/// Highest tier whose sales or revenue threshold is met. Never below `Tease`.
pub fn tier_for_stats(stats: &SellerStats) -> TierName {
    let sales = u64::try_from(stats.total_sales).unwrap_or(0);

    TierName::ALL
        .iter()
        .rev()
        .filter(|t| **t != TierName::None)
        .copied()
        .find(|t| t.definition().is_met_by(sales, stats.total_revenue))
        .unwrap_or(TierName::Tease)
}

/// Resolve a seller's tier from an order snapshot.
///
/// A missing seller short-circuits to `TierName::None` without looking at
/// the orders.
pub fn resolve_tier(seller: Option<&SellerId>, orders: &[Order]) -> TierName {
    match seller {
        Some(seller) => tier_for_stats(&compute_stats(seller, orders)),
        None => TierName::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seller(s: &str) -> SellerId {
        SellerId::parse(s).unwrap()
    }

    fn orders_for(s: &str, count: usize, each: &str) -> Vec<Order> {
        (0..count)
            .map(|_| Order::new(seller(s), Some(Decimal::from_str_canonical(each).unwrap())))
            .collect()
    }

    #[test]
    fn test_missing_seller_is_none_tier() {
        let orders = orders_for("alice", 2_000, "1000");
        assert_eq!(resolve_tier(None, &orders), TierName::None);
    }

    #[test]
    fn test_no_matching_orders_is_tease() {
        let orders = orders_for("carol", 50, "100");
        assert_eq!(resolve_tier(Some(&seller("alice")), &orders), TierName::Tease);
        assert_eq!(resolve_tier(Some(&seller("alice")), &[]), TierName::Tease);
    }

    #[test]
    fn test_sales_branch_alone_qualifies() {
        // 15 orders totaling 4000 minor units: sales meet Flirt, revenue does not.
        let mut orders = orders_for("alice", 15, "266.66");
        orders.extend(orders_for("bob", 3, "10"));
        let stats = compute_stats(&seller("alice"), &orders);
        assert_eq!(stats.total_sales, 15);
        assert!(stats.total_revenue < Decimal::from(5_000i64));
        assert_eq!(resolve_tier(Some(&seller("alice")), &orders), TierName::Flirt);
    }

    #[test]
    fn test_revenue_branch_alone_qualifies() {
        let orders = orders_for("bob", 5, "16000");
        let stats = compute_stats(&seller("bob"), &orders);
        assert_eq!(stats.total_sales, 5);
        assert_eq!(stats.total_revenue, Decimal::from(80_000i64));
        assert_eq!(resolve_tier(Some(&seller("bob")), &orders), TierName::Obsession);
    }

    #[test]
    fn test_top_tier_via_revenue() {
        let orders = orders_for("dana", 2, "250000");
        assert_eq!(resolve_tier(Some(&seller("dana")), &orders), TierName::Goddess);
    }

    #[test]
    fn test_invalid_prices_contribute_zero() {
        let mut orders = orders_for("alice", 2, "100");
        orders.push(Order::new(seller("alice"), None));
        orders.push(Order::new(
            seller("alice"),
            Some(Decimal::from_str_canonical("-500").unwrap()),
        ));
        let stats = compute_stats(&seller("alice"), &orders);
        assert_eq!(stats.total_sales, 4);
        assert_eq!(stats.total_revenue, Decimal::from(200i64));
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let exact = SellerStats::new(1_001, Decimal::zero());
        assert_eq!(tier_for_stats(&exact), TierName::Goddess);
        let below = SellerStats::new(1_000, Decimal::from(499_999i64));
        assert_eq!(tier_for_stats(&below), TierName::Desire);
        let revenue_exact = SellerStats::new(0, Decimal::from(500_000i64));
        assert_eq!(tier_for_stats(&revenue_exact), TierName::Goddess);
    }

    #[test]
    fn test_negative_sales_count_treated_as_zero() {
        let stats = SellerStats::new(-40, Decimal::zero());
        assert_eq!(tier_for_stats(&stats), TierName::Tease);
    }

    #[test]
    fn test_monotonic_in_sales_and_revenue() {
        let revenues = [0i64, 4_999, 5_000, 12_500, 100_000, 500_000, 1_000_000];
        let sales = [0i64, 9, 10, 100, 101, 251, 1_001, 5_000];

        for &revenue in &revenues {
            let mut prev = TierName::None;
            for &s in &sales {
                let tier = tier_for_stats(&SellerStats::new(s, Decimal::from(revenue)));
                assert!(tier >= prev, "sales {} revenue {}", s, revenue);
                prev = tier;
            }
        }

        for &s in &sales {
            let mut prev = TierName::None;
            for &revenue in &revenues {
                let tier = tier_for_stats(&SellerStats::new(s, Decimal::from(revenue)));
                assert!(tier >= prev, "sales {} revenue {}", s, revenue);
                prev = tier;
            }
        }
    }
}
