//! Domain types for the seller tier service.
//!
//! This module provides:
//! - Lossless amount handling via the Decimal wrapper
//! - Primitives: TimeMs, SellerId
//! - The order snapshot entry and the static tier table

pub mod decimal;
pub mod order;
pub mod primitives;
pub mod tier;

pub use decimal::Decimal;
pub use order::Order;
pub use primitives::{SellerId, TimeMs};
pub use tier::{TierDefinition, TierName, TierParseError, TIERS};
