use crate::model::{FetchError, RawSample};

#[async_trait::async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetches `days` days of daily price history for `coin`.
    /// `Ok(None)` means the source carries no price data for the coin.
    async fn daily_prices(&self, coin: &str, days: u32)
    -> Result<Option<Vec<RawSample>>, FetchError>;
}
