//! Order snapshot entries consumed by the tier resolver.

use crate::domain::{Decimal, SellerId};

/// A completed sale, as reported by the order/wallet backend.
///
/// Read-only here. `price` is in currency minor units; `None` means the
/// backend sent nothing usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: Option<String>,
    pub seller: SellerId,
    pub price: Option<Decimal>,
}

impl Order {
    pub fn new(seller: SellerId, price: Option<Decimal>) -> Self {
        Self {
            id: None,
            seller,
            price,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Revenue this order contributes. Missing or negative prices count as zero.
    pub fn revenue_contribution(&self) -> Decimal {
        match self.price {
            Some(p) if !p.is_negative() => p,
            _ => Decimal::zero(),
        }
    }
}
