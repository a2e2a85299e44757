use thiserror::Error;

use crate::models::SubscriberId;

/// Errors surfaced by the bot's services
#[derive(Debug, Error)]
pub enum BotError {
    /// Transport failure or a provider response without the expected series
    #[error("price data unavailable: {0}")]
    FetchUnavailable(String),

    /// A single recipient could not be reached during fan-out
    #[error("failed to deliver to {recipient}: {reason}")]
    DeliveryFailure {
        recipient: SubscriberId,
        reason: String,
    },

    /// Missing or invalid startup configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<crate::api::alphavantage::ApiError> for BotError {
    fn from(err: crate::api::alphavantage::ApiError) -> Self {
        BotError::FetchUnavailable(err.to_string())
    }
}
