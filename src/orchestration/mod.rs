pub mod sessions;
pub mod tiers;

pub use sessions::{SessionCaches, DEFAULT_MAX_SESSIONS};
pub use tiers::{SellerStanding, TierService};
