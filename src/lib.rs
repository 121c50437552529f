pub mod api;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;

pub use config::Config;
pub use datasource::{DataSourceError, HttpOrderSource, MockOrderSource, OrderSource};
pub use domain::{Decimal, Order, SellerId, TierDefinition, TierName, TimeMs, TIERS};
pub use engine::{
    bonus_credits, compute_progress, compute_stats, next_tier, resolve_tier, SellerStats,
    TierCache, TierProgress,
};
pub use error::AppError;
pub use orchestration::{SessionCaches, TierService};
