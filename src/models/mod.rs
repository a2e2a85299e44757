//! Data models for the price alert bot
//!
//! Price samples produced by the market-data client and the recipient
//! identifiers kept by the subscriber registry.

pub mod price;
pub mod subscriber;

pub use price::{PricePoint, PriceSeries, SERIES_LEN};
pub use subscriber::SubscriberId;
