//! Order snapshot sources.

use crate::domain::{Order, SellerId};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub mod http;
pub mod mock;

pub use http::HttpOrderSource;
pub use mock::MockOrderSource;

/// Read-only access to the order/wallet backend.
///
/// Implementations handle retry/backoff themselves.
#[async_trait]
pub trait OrderSource: Send + Sync + fmt::Debug {
    /// Fetch the order history for a seller.
    ///
    /// The result may contain orders of other sellers; the resolver filters.
    async fn fetch_orders(&self, seller: &SellerId) -> Result<Vec<Order>, DataSourceError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataSourceError {
    /// Connection failure, timeout, DNS.
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("HTTP error {status}: {message}")]
    HttpError { status: u16, message: String },
    /// Body was not the expected JSON shape.
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Rate limited")]
    RateLimited,
}
