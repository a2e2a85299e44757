use std::sync::Arc;

use serenity::async_trait;
use serenity::http::Http;
use serenity::model::id::ChannelId;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::models::SubscriberId;
use crate::services::price_service;
use crate::utils::BotError;

/// Outbound channel used to deliver alerts to a single recipient
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn deliver(&self, recipient: SubscriberId, text: &str) -> Result<(), BotError>;
}

/// Delivers alerts as Discord channel messages
pub struct DiscordSink {
    http: Arc<Http>,
}

impl DiscordSink {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl MessageSink for DiscordSink {
    async fn deliver(&self, recipient: SubscriberId, text: &str) -> Result<(), BotError> {
        ChannelId::new(recipient.0)
            .say(self.http.as_ref(), text)
            .await
            .map(|_| ())
            .map_err(|e| BotError::DeliveryFailure {
                recipient,
                reason: e.to_string(),
            })
    }
}

/// Outcome of one fan-out
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FanOutReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Send `text` to every recipient; a failed delivery is logged and skipped
pub async fn fan_out(
    sink: &dyn MessageSink,
    recipients: &[SubscriberId],
    text: &str,
) -> FanOutReport {
    let mut report = FanOutReport::default();

    for &recipient in recipients {
        match sink.deliver(recipient, text).await {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                warn!("{}", e);
                report.failed += 1;
            }
        }
    }

    report
}

/// Scheduled job: fetch once, then fan out to the current subscribers
///
/// When the fetch fails nothing is sent.
pub async fn run_daily_alert(app: &AppContext, sink: &dyn MessageSink) -> FanOutReport {
    let symbol = app.config.symbol.as_str();

    let Some(series) = price_service::fetch_series(app.fetcher.as_ref(), symbol).await else {
        warn!(
            "Skipping daily alert for {}: no price data ({} subscriber(s) not notified)",
            symbol,
            app.registry.len().await
        );
        return FanOutReport::default();
    };

    let message = price_service::format_price_series(&price_service::daily_header(symbol), &series);
    let recipients = app.registry.list_all().await;
    let report = fan_out(sink, &recipients, &message).await;

    info!(
        "Daily alert for {} sent to {} subscriber(s), {} failed",
        symbol, report.delivered, report.failed
    );
    report
}

#[cfg(test)]
pub mod testing {
    use std::collections::HashSet;

    use tokio::sync::Mutex;

    use super::*;

    /// Sink that records deliveries and fails for chosen recipients
    #[derive(Default)]
    pub struct RecordingSink {
        pub failing: HashSet<SubscriberId>,
        pub sent: Mutex<Vec<(SubscriberId, String)>>,
    }

    impl RecordingSink {
        pub fn failing_for(ids: &[SubscriberId]) -> Self {
            Self {
                failing: ids.iter().copied().collect(),
                sent: Mutex::new(Vec::new()),
            }
        }

        pub async fn recipients(&self) -> Vec<SubscriberId> {
            let mut ids: Vec<SubscriberId> =
                self.sent.lock().await.iter().map(|(id, _)| *id).collect();
            ids.sort();
            ids
        }
    }

    #[async_trait]
    impl MessageSink for RecordingSink {
        async fn deliver(&self, recipient: SubscriberId, text: &str) -> Result<(), BotError> {
            if self.failing.contains(&recipient) {
                return Err(BotError::DeliveryFailure {
                    recipient,
                    reason: "Missing Access".to_string(),
                });
            }
            self.sent.lock().await.push((recipient, text.to_string()));
            Ok(())
        }
    }
}
