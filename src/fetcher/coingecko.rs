use reqwest::Client;
use serde::Deserialize;

use crate::fetcher::traits::MarketDataSource;
use crate::model::{FetchError, RawSample};

const API_BASE: &str = "https://api.coingecko.com/api/v3";

/// The slice of the market_chart response we care about. The `prices` key is
/// absent when the API has no data for the coin.
#[derive(Debug, Deserialize)]
struct MarketChart {
    #[serde(default)]
    prices: Option<Vec<RawSample>>,
}

pub struct CoinGeckoClient {
    client: Client,
    vs_currency: String,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    pub fn new(vs_currency: String, api_key: Option<String>) -> Self {
        let client = Client::builder()
            .user_agent("cointrend/0.1")
            .build()
            .unwrap();

        Self {
            client,
            vs_currency,
            api_key,
        }
    }

    fn build_url(&self, coin: &str) -> String {
        format!("{}/coins/{}/market_chart", API_BASE, coin)
    }
}

#[async_trait::async_trait]
impl MarketDataSource for CoinGeckoClient {
    async fn daily_prices(
        &self,
        coin: &str,
        days: u32,
    ) -> Result<Option<Vec<RawSample>>, FetchError> {
        let url = self.build_url(coin);
        let days = days.to_string();

        let mut request = self.client.get(&url).query(&[
            ("vs_currency", self.vs_currency.as_str()),
            ("days", days.as_str()),
            ("interval", "daily"),
        ]);
        if let Some(key) = &self.api_key {
            request = request.header("x-cg-demo-api-key", key.as_str());
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let chart: MarketChart = response.json().await?;
        Ok(chart.prices)
    }
}
