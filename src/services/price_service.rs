use serenity::async_trait;
use tracing::{debug, error};

use crate::api::alphavantage::AlphaVantageClient;
use crate::models::price::TIMESTAMP_FORMAT;
use crate::models::{PriceSeries, SERIES_LEN};
use crate::utils::BotError;

/// Reply used whenever price data could not be fetched
pub const FETCH_FAILED_MESSAGE: &str = "Failed to retrieve stock data.";

/// Source of recent closing prices for a symbol
#[async_trait]
pub trait PriceFetcher: Send + Sync {
    async fn fetch(&self, symbol: &str) -> Result<PriceSeries, BotError>;
}

#[async_trait]
impl PriceFetcher for AlphaVantageClient {
    async fn fetch(&self, symbol: &str) -> Result<PriceSeries, BotError> {
        self.latest_closes(symbol).await.map_err(BotError::from)
    }
}

/// Fetch the latest series for `symbol`, logging any failure
pub async fn fetch_series(fetcher: &dyn PriceFetcher, symbol: &str) -> Option<PriceSeries> {
    match fetcher.fetch(symbol).await {
        Ok(series) => {
            debug!("Fetched {} price points for {}", series.len(), symbol);
            Some(series)
        }
        Err(e) => {
            error!("Error fetching stock data for {}: {}", symbol, e);
            None
        }
    }
}

/// Header for an on-demand `/price` reply
pub fn price_header(symbol: &str) -> String {
    format!("{} Prices (Latest {} hourly data points):", symbol, SERIES_LEN)
}

/// Header for the scheduled daily alert
pub fn daily_header(symbol: &str) -> String {
    format!("Daily Stock Alert for {}:", symbol)
}

/// Round to cents, ties away from zero (`{:.2}` alone rounds ties to even)
fn round_to_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// Render a series as a header line followed by one line per point
pub fn format_price_series(header: &str, series: &PriceSeries) -> String {
    let mut message = String::from(header);
    for point in series.points() {
        message.push('\n');
        message.push_str(&format!(
            "{} - ${:.2}",
            point.timestamp.format(TIMESTAMP_FORMAT),
            round_to_cents(point.close)
        ));
    }
    message
}

/// Build the `/price` reply: formatted series, or the fixed failure message
pub async fn price_report(fetcher: &dyn PriceFetcher, symbol: &str) -> String {
    match fetch_series(fetcher, symbol).await {
        Some(series) => format_price_series(&price_header(symbol), &series),
        None => FETCH_FAILED_MESSAGE.to_string(),
    }
}
