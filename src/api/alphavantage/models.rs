use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

/// Response from the TIME_SERIES_INTRADAY endpoint (60 minute interval)
///
/// When the provider throttles or rejects a request it still answers 200 and
/// replaces the series with one of the message fields below.
#[derive(Debug, Clone, Deserialize)]
pub struct IntradayResponse {
    #[serde(rename = "Time Series (60min)")]
    pub time_series: Option<BTreeMap<String, IntradayBar>>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
}

/// One bar of the intraday series. Values arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct IntradayBar {
    #[serde(rename = "4. close")]
    pub close: String,
}

/// Error type for Alpha Vantage requests
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Call frequency exceeded ("Note" field, or HTTP 429)
    #[error("Rate Limited: {0}")]
    RateLimited(String),
    /// Provider rejected the request ("Error Message" / "Information" field)
    #[error("Provider Error: {0}")]
    ProviderError(String),
    /// 200 response without a time series and without an explanation
    #[error("Response has no 'Time Series (60min)' field")]
    MissingSeries,
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error, including timeouts
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}
