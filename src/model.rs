// Core structs: price samples, series, trend metrics, recommendations
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

/// One `[timestamp_ms, price]` pair as delivered by the market-data API.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RawSample(pub i64, pub f64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Daily price history for one coin. Dates are unique and ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Metrics derived from one coin's series over the observed window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendMetrics {
    /// Percent change from the first to the last price in the series.
    pub change_percentage: f64,
    /// Sample standard deviation of daily fractional price changes.
    pub volatility: f64,
    pub average_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthOutlook {
    High,
    Moderate,
}

impl std::fmt::Display for GrowthOutlook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrowthOutlook::High => write!(f, "High potential for growth!"),
            GrowthOutlook::Moderate => write!(f, "Moderate growth expected."),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub coin: String,
    pub change_percentage: f64,
    pub volatility: f64,
    pub average_price: f64,
    pub outlook: GrowthOutlook,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response status: {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Error, PartialEq)]
pub enum TrendError {
    #[error("price series is empty")]
    EmptySeries,
    #[error("price of zero on {0}, relative change is undefined")]
    ZeroPrice(NaiveDate),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}
