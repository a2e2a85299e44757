use std::time::Duration;

use chrono::NaiveDateTime;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::models::{ApiError, IntradayResponse};
use crate::models::price::TIMESTAMP_FORMAT;
use crate::models::{PricePoint, PriceSeries};

/// Alpha Vantage API client for intraday stock prices
pub struct AlphaVantageClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

impl AlphaVantageClient {
    const INTERVAL: &'static str = "60min";

    /// Create a new Alpha Vantage client against `base_url`
    pub fn with_base_url(
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Map a non-success HTTP status to an error
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            429 => ApiError::RateLimited(body_text),
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }

    /// GET /query?function=TIME_SERIES_INTRADAY
    ///
    /// Returns the raw hourly series for regular trading hours.
    pub async fn get_intraday(&self, symbol: &str) -> Result<IntradayResponse, ApiError> {
        let url = format!("{}/query", self.base_url);
        debug!("Requesting intraday series for {}", symbol);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("function", "TIME_SERIES_INTRADAY"),
                ("symbol", symbol),
                ("interval", Self::INTERVAL),
                ("extended_hours", "false"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<IntradayResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// Fetch the latest hourly closing prices for `symbol`, newest first
    pub async fn latest_closes(&self, symbol: &str) -> Result<PriceSeries, ApiError> {
        let response = self.get_intraday(symbol).await?;
        series_from_response(response)
    }
}

/// Turn a provider response into a bounded series
///
/// Bars with an unreadable timestamp or close are skipped.
pub fn series_from_response(response: IntradayResponse) -> Result<PriceSeries, ApiError> {
    let Some(time_series) = response.time_series else {
        if let Some(message) = response.note {
            return Err(ApiError::RateLimited(message));
        }
        if let Some(message) = response.error_message.or(response.information) {
            return Err(ApiError::ProviderError(message));
        }
        return Err(ApiError::MissingSeries);
    };

    let points = time_series
        .into_iter()
        .filter_map(|(time, bar)| {
            let timestamp = match NaiveDateTime::parse_from_str(&time, TIMESTAMP_FORMAT) {
                Ok(ts) => ts,
                Err(e) => {
                    warn!("Skipping bar with bad timestamp '{}': {}", time, e);
                    return None;
                }
            };
            match bar.close.trim().parse::<f64>() {
                Ok(close) => Some(PricePoint { timestamp, close }),
                Err(e) => {
                    warn!("Skipping bar {} with bad close '{}': {}", time, bar.close, e);
                    None
                }
            }
        })
        .collect();

    Ok(PriceSeries::latest(points))
}
