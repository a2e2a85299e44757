use serenity::builder::CreateCommand;

use crate::context::AppContext;
use crate::models::SERIES_LEN;
use crate::services::price_service;

pub fn register(app: &AppContext) -> CreateCommand {
    CreateCommand::new("price").description(format!(
        "Display the latest {} hourly {} prices",
        SERIES_LEN, app.config.symbol
    ))
}

pub async fn execute(app: &AppContext) -> String {
    tracing::info!("💹 Price command called for {}", app.config.symbol);
    price_service::price_report(app.fetcher.as_ref(), &app.config.symbol).await
}
