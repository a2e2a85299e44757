use serenity::builder::CreateCommand;

use crate::context::AppContext;
use crate::models::SubscriberId;

pub const UNSUBSCRIBED: &str = "You have been unsubscribed from daily alerts.";

pub fn register() -> CreateCommand {
    CreateCommand::new("unsubscribe").description("Unsubscribe from the daily alert")
}

pub async fn execute(app: &AppContext, recipient: SubscriberId) -> String {
    app.registry.unsubscribe(recipient).await;
    UNSUBSCRIBED.to_string()
}
