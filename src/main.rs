use std::sync::Arc;

use serenity::async_trait;
use serenity::model::application::{Command, Interaction};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod context;
mod models;
mod services;
mod utils;

use api::alphavantage::AlphaVantageClient;
use config::Config;
use context::{AppContext, AppState};
use services::alert_service::DiscordSink;
use services::schedule_service;

struct Handler;

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        commands::handle_message(&ctx, &msg).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command) = interaction {
            commands::handle_interaction(&ctx, &command).await;
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        let app = {
            let data = ctx.data.read().await;
            data.get::<AppState>().cloned()
        };
        let Some(app) = app else {
            error!("App context not initialized");
            return;
        };

        match Command::set_global_commands(&ctx.http, commands::definitions(&app)).await {
            Ok(registered) => info!("Registered {} slash commands", registered.len()),
            Err(e) => warn!("Failed to register slash commands: {}", e),
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("price_alert_bot=debug,serenity=warn")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    info!("🤖 Starting price alert bot...");
    info!(
        "   Tracking {} - daily alert at {} {}",
        config.symbol,
        config.alert_time.format("%H:%M"),
        config.timezone
    );

    let fetcher = match AlphaVantageClient::with_base_url(
        config.alpha_vantage_api_key.clone(),
        config.alpha_vantage_base_url.clone(),
        config.fetch_timeout,
    ) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create Alpha Vantage client: {}", e);
            std::process::exit(1);
        }
    };

    let token = config.discord_token.clone();
    let app = Arc::new(AppContext::new(config, Arc::new(fetcher)));

    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGES;

    let mut client = match Client::builder(&token, intents)
        .event_handler(Handler)
        .await
    {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create client: {}", e);
            std::process::exit(1);
        }
    };

    {
        let mut data = client.data.write().await;
        data.insert::<AppState>(app.clone());
    }

    let sink = Arc::new(DiscordSink::new(client.http.clone()));
    tokio::spawn(schedule_service::run_daily(app, sink));

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }
}
