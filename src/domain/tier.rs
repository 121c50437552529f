//! Seller tier table.
//!
//! Tiers are ranked `None < Tease < Flirt < Obsession < Desire < Goddess`.
//! `None` means "no seller context"; every identified seller sits at
//! `Tease` or above. Thresholds are inclusive and either one qualifies.

use crate::domain::Decimal;
use rust_decimal::Decimal as RustDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of tier names, declared in rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierName {
    None,
    Tease,
    Flirt,
    Obsession,
    Desire,
    Goddess,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tier name: {0}")]
pub struct TierParseError(pub String);

impl TierName {
    /// All tiers, lowest rank first.
    pub const ALL: [TierName; 6] = [
        TierName::None,
        TierName::Tease,
        TierName::Flirt,
        TierName::Obsession,
        TierName::Desire,
        TierName::Goddess,
    ];

    pub const TOP: TierName = TierName::Goddess;

    pub fn rank(self) -> usize {
        self as usize
    }

    pub fn definition(self) -> &'static TierDefinition {
        &TIERS[self.rank()]
    }

    /// The tier one rank above, clamped at the top.
    pub fn next(self) -> TierName {
        Self::ALL
            .get(self.rank() + 1)
            .copied()
            .unwrap_or(Self::TOP)
    }

    pub fn is_top(self) -> bool {
        self == Self::TOP
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TierName::None => "none",
            TierName::Tease => "tease",
            TierName::Flirt => "flirt",
            TierName::Obsession => "obsession",
            TierName::Desire => "desire",
            TierName::Goddess => "goddess",
        }
    }

    /// Lenient parse for untrusted input: unknown names become `Tease`.
    pub fn parse_or_default(raw: &str) -> TierName {
        raw.parse().unwrap_or_else(|e: TierParseError| {
            tracing::warn!(error = %e, "falling back to tease tier");
            TierName::Tease
        })
    }
}

impl FromStr for TierName {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(TierName::None),
            "tease" => Ok(TierName::Tease),
            "flirt" => Ok(TierName::Flirt),
            "obsession" => Ok(TierName::Obsession),
            "desire" => Ok(TierName::Desire),
            "goddess" => Ok(TierName::Goddess),
            _ => Err(TierParseError(s.to_string())),
        }
    }
}

impl fmt::Display for TierName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static thresholds and perks for one tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierDefinition {
    pub name: TierName,
    pub min_sales: u32,
    /// Cumulative revenue threshold in minor units.
    pub min_revenue_minor: u32,
    /// Bonus credit rate in basis points.
    pub credit_rate_bps: u32,
    pub badge_ref: Option<&'static str>,
    pub color: &'static str,
}

impl TierDefinition {
    pub fn min_revenue(&self) -> Decimal {
        Decimal::from(self.min_revenue_minor)
    }

    /// Credit rate as a fraction in [0, 1].
    pub fn credit_rate(&self) -> Decimal {
        Decimal::new(RustDecimal::new(i64::from(self.credit_rate_bps), 4))
    }

    /// Inclusive OR: either threshold unlocks the tier.
    pub fn is_met_by(&self, total_sales: u64, total_revenue: Decimal) -> bool {
        total_sales >= u64::from(self.min_sales) || total_revenue >= self.min_revenue()
    }
}

/// The tier table, indexed by rank.
pub static TIERS: [TierDefinition; 6] = [
    TierDefinition {
        name: TierName::None,
        min_sales: 0,
        min_revenue_minor: 0,
        credit_rate_bps: 0,
        badge_ref: None,
        color: "#9CA3AF",
    },
    TierDefinition {
        name: TierName::Tease,
        min_sales: 0,
        min_revenue_minor: 0,
        credit_rate_bps: 100,
        badge_ref: Some("/badges/tease.png"),
        color: "#F9A8D4",
    },
    TierDefinition {
        name: TierName::Flirt,
        min_sales: 10,
        min_revenue_minor: 5_000,
        credit_rate_bps: 200,
        badge_ref: Some("/badges/flirt.png"),
        color: "#F472B6",
    },
    TierDefinition {
        name: TierName::Obsession,
        min_sales: 101,
        min_revenue_minor: 12_500,
        credit_rate_bps: 300,
        badge_ref: Some("/badges/obsession.png"),
        color: "#DB2777",
    },
    TierDefinition {
        name: TierName::Desire,
        min_sales: 251,
        min_revenue_minor: 100_000,
        credit_rate_bps: 400,
        badge_ref: Some("/badges/desire.png"),
        color: "#9D174D",
    },
    TierDefinition {
        name: TierName::Goddess,
        min_sales: 1_001,
        min_revenue_minor: 500_000,
        credit_rate_bps: 500,
        badge_ref: Some("/badges/goddess.png"),
        color: "#FBBF24",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_rank() {
        for tier in TierName::ALL {
            assert_eq!(tier.definition().name, tier);
        }
    }

    #[test]
    fn test_thresholds_and_rates_non_decreasing() {
        for pair in TIERS.windows(2) {
            assert!(pair[0].min_sales <= pair[1].min_sales);
            assert!(pair[0].min_revenue_minor <= pair[1].min_revenue_minor);
            assert!(pair[0].credit_rate_bps <= pair[1].credit_rate_bps);
        }
    }

    #[test]
    fn test_credit_rate_within_unit_interval() {
        for def in TIERS.iter() {
            let rate = def.credit_rate();
            assert!(!rate.is_negative());
            assert!(rate <= Decimal::from(1i64));
        }
        assert_eq!(TierName::Flirt.definition().credit_rate().to_string(), "0.02");
    }

    #[test]
    fn test_next_clamps_at_top() {
        assert_eq!(TierName::None.next(), TierName::Tease);
        assert_eq!(TierName::Flirt.next(), TierName::Obsession);
        assert_eq!(TierName::Goddess.next(), TierName::Goddess);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Flirt".parse::<TierName>().unwrap(), TierName::Flirt);
        assert_eq!(" GODDESS ".parse::<TierName>().unwrap(), TierName::Goddess);
        assert!("queen".parse::<TierName>().is_err());
    }

    #[test]
    fn test_parse_or_default_falls_back_to_tease() {
        assert_eq!(TierName::parse_or_default("queen"), TierName::Tease);
        assert_eq!(TierName::parse_or_default(""), TierName::Tease);
        assert_eq!(TierName::parse_or_default("desire"), TierName::Desire);
    }

    #[test]
    fn test_is_met_by_either_threshold() {
        let flirt = TierName::Flirt.definition();
        assert!(flirt.is_met_by(10, Decimal::zero()));
        assert!(flirt.is_met_by(0, Decimal::from(5_000i64)));
        assert!(!flirt.is_met_by(9, Decimal::from(4_999i64)));
    }

    #[test]
    fn test_serialization_lowercase() {
        let json = serde_json::to_string(&TierName::Obsession).unwrap();
        assert_eq!(json, "\"obsession\"");
    }
}
