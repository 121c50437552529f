//! Progress toward the next tier.

use super::resolver::SellerStats;
use crate::domain::{Decimal, TierName};
use serde::{Deserialize, Serialize};

/// Independent sales and revenue progress percentages, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierProgress {
    pub sales_progress: u8,
    pub revenue_progress: u8,
}

impl TierProgress {
    pub const COMPLETE: TierProgress = TierProgress {
        sales_progress: 100,
        revenue_progress: 100,
    };
}

/// The tier one rank above `tier`; the top tier maps to itself.
pub fn next_tier(tier: TierName) -> TierName {
    tier.next()
}

/// Percent progress from `tier` toward the next tier on each threshold.
///
/// The two numbers are reported separately; whether both must reach 100 is
/// up to the caller.
pub fn compute_progress(tier: TierName, stats: &SellerStats) -> TierProgress {
    if tier.is_top() {
        return TierProgress::COMPLETE;
    }

    let current = tier.definition();
    let next = next_tier(tier).definition();

    TierProgress {
        sales_progress: percent_between(
            Decimal::from(stats.total_sales),
            Decimal::from(current.min_sales),
            Decimal::from(next.min_sales),
        ),
        revenue_progress: percent_between(
            stats.total_revenue,
            current.min_revenue(),
            next.min_revenue(),
        ),
    }
}

/// `floor((value - from) / (to - from) * 100)` clamped to `0..=100`.
/// An empty or inverted span reports 0.
fn percent_between(value: Decimal, from: Decimal, to: Decimal) -> u8 {
    let span = to - from;
    if span <= Decimal::zero() {
        return 0;
    }

    // Overflow only happens at the extremes of the decimal range, where the
    // sign of `value` already decides the clamp.
    let Some(delta) = value.checked_sub(from) else {
        return if value.is_negative() { 0 } else { 100 };
    };
    if delta <= Decimal::zero() {
        return 0;
    }
    if delta >= span {
        return 100;
    }

    delta
        .checked_mul(Decimal::hundred())
        .and_then(|scaled| scaled.checked_div(span))
        .and_then(|pct| pct.floor().to_u8())
        .map(|pct| pct.min(100))
        .unwrap_or(100)
}
