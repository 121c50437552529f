//! Order backend client over the REST API.

use super::{DataSourceError, OrderSource};
use crate::domain::{Decimal, Order, SellerId};
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Fetches orders from `GET {base_url}/api/orders?seller=<id>`.
#[derive(Debug, Clone)]
pub struct HttpOrderSource {
    client: Client,
    base_url: String,
    max_elapsed: Duration,
}

impl HttpOrderSource {
    pub fn new(base_url: String, max_elapsed: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            max_elapsed,
        }
    }

    async fn get_orders_json(
        &self,
        seller: &SellerId,
    ) -> Result<serde_json::Value, DataSourceError> {
        let url = format!("{}/api/orders", self.base_url);
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(self.max_elapsed),
            ..Default::default()
        };

        retry(backoff, || async {
            let response = self
                .client
                .get(&url)
                .query(&[("seller", seller.as_str())])
                .send()
                .await
                .map_err(|e| {
                    backoff::Error::transient(DataSourceError::NetworkError(e.to_string()))
                })?;

            let status = response.status();
            if status == 429 {
                return Err(backoff::Error::transient(DataSourceError::RateLimited));
            }
            if status.is_server_error() {
                return Err(backoff::Error::transient(DataSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Server error".to_string(),
                }));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(DataSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Client error".to_string(),
                }));
            }

            response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| backoff::Error::permanent(DataSourceError::ParseError(e.to_string())))
        })
        .await
    }
}

#[async_trait]
impl OrderSource for HttpOrderSource {
    async fn fetch_orders(&self, seller: &SellerId) -> Result<Vec<Order>, DataSourceError> {
        debug!(seller = %seller, "Fetching orders");
        let body = self.get_orders_json(seller).await?;
        let orders = parse_orders(&body)?;
        debug!(seller = %seller, count = orders.len(), "Fetched orders");
        Ok(orders)
    }
}

/// Accepts a bare array or `{"orders": [...]}`. Entries without a usable
/// seller are skipped.
fn parse_orders(body: &serde_json::Value) -> Result<Vec<Order>, DataSourceError> {
    let entries = body
        .as_array()
        .or_else(|| body.get("orders").and_then(|v| v.as_array()))
        .ok_or_else(|| DataSourceError::ParseError("Expected array of orders".to_string()))?;

    let mut orders = Vec::with_capacity(entries.len());
    for entry in entries {
        match parse_order(entry) {
            Ok(order) => orders.push(order),
            Err(e) => warn!("Skipping order: {}", e),
        }
    }
    Ok(orders)
}

fn parse_order(order_json: &serde_json::Value) -> Result<Order, DataSourceError> {
    let seller = order_json
        .get("seller")
        .and_then(|v| v.as_str())
        .and_then(SellerId::parse)
        .ok_or_else(|| DataSourceError::ParseError("Missing seller field".to_string()))?;

    let id = order_json.get("id").and_then(|v| match v {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    });

    Ok(Order {
        id,
        seller,
        price: order_json.get("price").and_then(parse_price),
    })
}

/// Numbers and numeric strings are accepted; anything else is no price.
fn parse_price(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        // serde_json prints the shortest round-trip form, so 4999.7 stays 4999.7.
        serde_json::Value::Number(n) => Decimal::from_str_canonical(&n.to_string()).ok(),
        serde_json::Value::String(s) => Decimal::from_str_canonical(s).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TierName;
    use crate::engine::{compute_stats, resolve_tier};

    #[test]
    fn test_parse_order_valid() {
        let json = serde_json::json!({"id": 42, "seller": " Alice ", "price": 1999});
        let order = parse_order(&json).unwrap();
        assert_eq!(order.seller.as_str(), "alice");
        assert_eq!(order.id.as_deref(), Some("42"));
        assert_eq!(order.price, Some(Decimal::from(1999i64)));
    }

    #[test]
    fn test_parse_price_variants() {
        assert_eq!(
            parse_price(&serde_json::json!("12.50")),
            Some(Decimal::from_str_canonical("12.5").unwrap())
        );
        assert_eq!(
            parse_price(&serde_json::json!(40.25)),
            Some(Decimal::from_str_canonical("40.25").unwrap())
        );
        assert_eq!(parse_price(&serde_json::json!("free")), None);
        assert_eq!(parse_price(&serde_json::Value::Null), None);
        assert_eq!(parse_price(&serde_json::json!({"amount": 1})), None);
    }

    #[test]
    fn test_float_prices_sum_exactly_to_threshold() {
        let body = serde_json::json!([
            {"seller": "alice", "price": 4999.7},
            {"seller": "alice", "price": 0.3}
        ]);
        let orders = parse_orders(&body).unwrap();
        assert_eq!(
            orders[0].price,
            Some(Decimal::from_str_canonical("4999.7").unwrap())
        );
        assert_eq!(orders[1].price, Some(Decimal::from_str_canonical("0.3").unwrap()));

        let alice = SellerId::parse("alice").unwrap();
        let stats = compute_stats(&alice, &orders);
        assert_eq!(stats.total_revenue, Decimal::from(5_000i64));
        assert_eq!(resolve_tier(Some(&alice), &orders), TierName::Flirt);
    }

    #[test]
    fn test_parse_order_missing_seller() {
        let json = serde_json::json!({"price": 100});
        assert!(matches!(
            parse_order(&json),
            Err(DataSourceError::ParseError(_))
        ));
        let blank = serde_json::json!({"seller": "  ", "price": 100});
        assert!(parse_order(&blank).is_err());
    }

    #[test]
    fn test_parse_orders_skips_bad_entries() {
        let body = serde_json::json!({
            "orders": [
                {"seller": "alice", "price": "100"},
                {"price": 5},
                {"seller": "alice"}
            ]
        });
        let orders = parse_orders(&body).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1].price, None);
    }

    #[test]
    fn test_parse_orders_rejects_non_array() {
        let body = serde_json::json!({"status": "ok"});
        assert!(parse_orders(&body).is_err());
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let source = HttpOrderSource::new(
            "http://orders.internal/".to_string(),
            Duration::from_secs(1),
        );
        assert_eq!(source.base_url, "http://orders.internal");
    }
}
