//! Subscriber models

use serenity::model::id::ChannelId;

/// Recipient of the daily alert: the chat channel a command was issued from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(pub u64);

impl From<ChannelId> for SubscriberId {
    fn from(channel_id: ChannelId) -> Self {
        SubscriberId(channel_id.get())
    }
}

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
