//! Tier bonus credits.

use crate::domain::{Decimal, TierName};

/// Bonus credited on top of `earnings` at the tier's credit rate.
///
/// Rounded down to whole minor units. Negative earnings earn nothing.
pub fn bonus_credits(tier: TierName, earnings: Decimal) -> Decimal {
    if earnings.is_negative() || earnings.is_zero() {
        return Decimal::zero();
    }

    earnings
        .checked_mul(tier.definition().credit_rate())
        .map(|bonus| bonus.floor())
        .unwrap_or_else(|| {
            tracing::warn!(tier = %tier, "bonus credit overflow, crediting nothing");
            Decimal::zero()
        })
}
