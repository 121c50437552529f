//! In-memory order source for tests.

use super::{DataSourceError, OrderSource};
use crate::domain::{Order, SellerId};
use async_trait::async_trait;

/// Returns predefined orders, or a predefined error.
#[derive(Debug, Clone, Default)]
pub struct MockOrderSource {
    orders: Vec<Order>,
    failure: Option<DataSourceError>,
}

impl MockOrderSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    pub fn with_orders(mut self, orders: Vec<Order>) -> Self {
        self.orders.extend(orders);
        self
    }

    /// Make every fetch fail with `error`.
    pub fn failing(mut self, error: DataSourceError) -> Self {
        self.failure = Some(error);
        self
    }
}

#[async_trait]
impl OrderSource for MockOrderSource {
    async fn fetch_orders(&self, seller: &SellerId) -> Result<Vec<Order>, DataSourceError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        Ok(self
            .orders
            .iter()
            .filter(|o| &o.seller == seller)
            .cloned()
            .collect())
    }
}
