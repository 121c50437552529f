//! Memoized tier resolution with a fixed time-to-live.
//!
//! Entries are keyed by `seller:order_count`. The count is a cheap change
//! detector: a price correction that leaves the number of orders unchanged is
//! not seen until the entry expires. Expired entries are overwritten on the
//! next lookup for the same key and never removed otherwise.

use super::resolver::resolve_tier;
use crate::domain::{Order, SellerId, TierName, TimeMs};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

/// Default lifetime of a cached tier: one hour.
pub const DEFAULT_TIER_TTL: Duration = Duration::from_millis(3_600_000);

/// Source of "now" for TTL checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> TimeMs;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimeMs {
        TimeMs::new(chrono::Utc::now().timestamp_millis())
    }
}

/// Manually advanced clock for deterministic expiry.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(start: TimeMs) -> Self {
        Self {
            now_ms: AtomicI64::new(start.as_i64()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let by_ms = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        self.now_ms.fetch_add(by_ms, Ordering::SeqCst);
    }

    pub fn set(&self, at: TimeMs) {
        self.now_ms.store(at.as_i64(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> TimeMs {
        TimeMs::new(self.now_ms.load(Ordering::SeqCst))
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> TimeMs {
        (**self).now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierCacheEntry {
    pub tier: TierName,
    pub computed_at: TimeMs,
}

/// Tier memo table with an injected clock and TTL.
pub struct TierCache<C: Clock = SystemClock> {
    entries: HashMap<String, TierCacheEntry>,
    ttl_ms: i64,
    clock: C,
}

impl TierCache<SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl Default for TierCache<SystemClock> {
    fn default() -> Self {
        Self::new(DEFAULT_TIER_TTL)
    }
}

impl<C: Clock> TierCache<C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            ttl_ms: i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX),
            clock,
        }
    }

    pub fn cache_key(seller: &SellerId, order_count: usize) -> String {
        format!("{}:{}", seller.as_str(), order_count)
    }

    /// Memoized [`resolve_tier`].
    pub fn resolve(&mut self, seller: Option<&SellerId>, orders: &[Order]) -> TierName {
        self.resolve_with(seller, orders, resolve_tier)
    }

    /// Memoized lookup using `resolver` on a miss.
    ///
    /// A missing seller returns `TierName::None` without touching the cache.
    pub fn resolve_with<F>(
        &mut self,
        seller: Option<&SellerId>,
        orders: &[Order],
        resolver: F,
    ) -> TierName
    where
        F: FnOnce(Option<&SellerId>, &[Order]) -> TierName,
    {
        let Some(seller_id) = seller else {
            return TierName::None;
        };

        let key = Self::cache_key(seller_id, orders.len());
        let now = self.clock.now();

        if let Some(entry) = self.entries.get(&key) {
            if now.millis_since(entry.computed_at) < self.ttl_ms {
                tracing::debug!(key = %key, tier = %entry.tier, "tier cache hit");
                return entry.tier;
            }
        }

        let tier = resolver(seller, orders);
        tracing::debug!(key = %key, tier = %tier, "tier cache miss");
        self.entries.insert(
            key,
            TierCacheEntry {
                tier,
                computed_at: now,
            },
        );
        tier
    }

    pub fn get(&self, seller: &SellerId, order_count: usize) -> Option<&TierCacheEntry> {
        self.entries.get(&Self::cache_key(seller, order_count))
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
