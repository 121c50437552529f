//! Pure, synchronous tier computation.
//!
//! Order snapshot → resolver → cache → progress. Nothing here performs I/O.

pub mod cache;
pub mod credit;
pub mod progress;
pub mod resolver;

pub use cache::{Clock, ManualClock, SystemClock, TierCache, TierCacheEntry, DEFAULT_TIER_TTL};
pub use credit::bonus_credits;
pub use progress::{compute_progress, next_tier, TierProgress};
pub use resolver::{compute_stats, resolve_tier, tier_for_stats, SellerStats};
