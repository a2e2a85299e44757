use serenity::builder::CreateCommand;

use crate::context::AppContext;
use crate::models::SubscriberId;

pub const SUBSCRIBED: &str = "You have been subscribed to daily alerts.";
pub const ALREADY_SUBSCRIBED: &str = "You are already subscribed.";

pub fn register(app: &AppContext) -> CreateCommand {
    CreateCommand::new("subscribe").description(format!(
        "Subscribe to the daily {} alert (at {} {})",
        app.config.symbol,
        app.config.alert_time.format("%H:%M"),
        app.config.timezone
    ))
}

pub async fn execute(app: &AppContext, recipient: SubscriberId) -> String {
    if app.registry.subscribe(recipient).await {
        SUBSCRIBED.to_string()
    } else {
        ALREADY_SUBSCRIBED.to_string()
    }
}
