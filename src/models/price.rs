//! Price series models

use chrono::NaiveDateTime;

/// Number of hourly points kept in a series
pub const SERIES_LEN: usize = 6;

/// Timestamp layout used by the provider and echoed back in messages
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single closing price sample
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub timestamp: NaiveDateTime,
    pub close: f64,
}

/// Most recent price points, newest first
///
/// Timestamps are strictly decreasing and the series never holds more than
/// [`SERIES_LEN`] points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from unordered samples, keeping the latest `SERIES_LEN`
    pub fn latest(mut points: Vec<PricePoint>) -> Self {
        points.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        points.dedup_by(|a, b| a.timestamp == b.timestamp);
        points.truncate(SERIES_LEN);
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
