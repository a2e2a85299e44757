pub mod price;
pub mod start;
pub mod subscribe;
pub mod unsubscribe;

use std::sync::Arc;

use serenity::builder::{CreateCommand, EditInteractionResponse};
use serenity::model::application::CommandInteraction;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::{debug, error, warn};

use crate::context::{AppContext, AppState};
use crate::models::SubscriberId;

/// Commands understood by the bot, as slash commands or `/name` text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Price,
    Subscribe,
    Unsubscribe,
}

impl BotCommand {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "start" => Some(Self::Start),
            "price" => Some(Self::Price),
            "subscribe" => Some(Self::Subscribe),
            "unsubscribe" => Some(Self::Unsubscribe),
            _ => None,
        }
    }

    /// Parse a text message such as `/price` or `/subscribe@PriceBot`
    pub fn parse(content: &str) -> Option<Self> {
        let word = content.split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split_once('@').map_or(name, |(head, _)| head);
        Self::from_name(name)
    }
}

/// Slash command definitions advertised to Discord's command menu
pub fn definitions(app: &AppContext) -> Vec<CreateCommand> {
    vec![
        start::register(),
        price::register(app),
        subscribe::register(app),
        unsubscribe::register(),
    ]
}

/// Run a command for `recipient` and return the reply text
pub async fn dispatch(app: &AppContext, command: BotCommand, recipient: SubscriberId) -> String {
    match command {
        BotCommand::Start => start::execute(app),
        BotCommand::Price => price::execute(app).await,
        BotCommand::Subscribe => subscribe::execute(app, recipient).await,
        BotCommand::Unsubscribe => unsubscribe::execute(app, recipient).await,
    }
}

async fn app_context(ctx: &Context) -> Option<Arc<AppContext>> {
    let data = ctx.data.read().await;
    data.get::<AppState>().cloned()
}

pub async fn handle_message(ctx: &Context, msg: &Message) {
    if msg.author.bot {
        return;
    }

    let Some(command) = BotCommand::parse(&msg.content) else {
        return;
    };

    let Some(app) = app_context(ctx).await else {
        error!("App context not initialized");
        return;
    };

    debug!("{:?} from user {} in channel {}", command, msg.author.id, msg.channel_id);
    let reply = dispatch(&app, command, msg.channel_id.into()).await;

    if let Err(e) = msg.channel_id.say(ctx, reply).await {
        error!("❌ Error replying to {:?} in channel {}: {}", command, msg.channel_id, e);
    }
}

pub async fn handle_interaction(ctx: &Context, interaction: &CommandInteraction) {
    let Some(command) = BotCommand::from_name(&interaction.data.name) else {
        warn!("Unknown slash command: {}", interaction.data.name);
        return;
    };

    let Some(app) = app_context(ctx).await else {
        error!("App context not initialized");
        return;
    };

    // The price fetch can outlive Discord's 3 second acknowledgement window
    if let Err(e) = interaction.defer(ctx).await {
        error!("❌ Failed to acknowledge {:?}: {}", command, e);
        return;
    }

    debug!("/{} from user {} in channel {}", interaction.data.name, interaction.user.id, interaction.channel_id);
    let reply = dispatch(&app, command, interaction.channel_id.into()).await;

    if let Err(e) = interaction
        .edit_response(ctx, EditInteractionResponse::new().content(reply))
        .await
    {
        error!("❌ Error replying to {:?} in channel {}: {}", command, interaction.channel_id, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::app_with;
    use crate::services::price_service::testing::{sample_series, StaticFetcher};
    use crate::services::price_service::FETCH_FAILED_MESSAGE;

    #[test]
    fn test_parse_text_commands() {
        assert_eq!(BotCommand::parse("/start"), Some(BotCommand::Start));
        assert_eq!(BotCommand::parse("/price now please"), Some(BotCommand::Price));
        assert_eq!(BotCommand::parse("/subscribe@PriceBot"), Some(BotCommand::Subscribe));
        assert_eq!(BotCommand::parse("  /UNSUBSCRIBE"), Some(BotCommand::Unsubscribe));
    }

    #[test]
    fn test_parse_ignores_other_messages() {
        assert_eq!(BotCommand::parse("price"), None);
        assert_eq!(BotCommand::parse("/balance"), None);
        assert_eq!(BotCommand::parse("/subscriber"), None);
        assert_eq!(BotCommand::parse(""), None);
    }

    #[tokio::test]
    async fn test_subscribe_twice_then_unsubscribe() {
        let app = app_with(StaticFetcher::unavailable());
        let me = SubscriberId(42);

        assert_eq!(dispatch(&app, BotCommand::Subscribe, me).await, subscribe::SUBSCRIBED);
        assert_eq!(
            dispatch(&app, BotCommand::Subscribe, me).await,
            subscribe::ALREADY_SUBSCRIBED
        );
        assert_eq!(app.registry.len().await, 1);

        assert_eq!(dispatch(&app, BotCommand::Unsubscribe, me).await, unsubscribe::UNSUBSCRIBED);
        assert_eq!(dispatch(&app, BotCommand::Unsubscribe, me).await, unsubscribe::UNSUBSCRIBED);
        assert!(app.registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_price_command_replies() {
        let app = app_with(StaticFetcher::ok(sample_series(&[123.4])));
        let reply = dispatch(&app, BotCommand::Price, SubscriberId(1)).await;
        assert_eq!(
            reply,
            "VOO Prices (Latest 6 hourly data points):\n2024-05-02 15:00:00 - $123.40"
        );

        let app = app_with(StaticFetcher::unavailable());
        let reply = dispatch(&app, BotCommand::Price, SubscriberId(1)).await;
        assert_eq!(reply, FETCH_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_start_names_the_symbol() {
        let app = app_with(StaticFetcher::unavailable());
        let reply = dispatch(&app, BotCommand::Start, SubscriberId(1)).await;
        assert_eq!(reply, "Hello, this is a VOO price tracker for testing.");
    }

    #[test]
    fn test_every_command_is_advertised() {
        let app = app_with(StaticFetcher::unavailable());
        assert_eq!(definitions(&app).len(), 4);
    }
}
