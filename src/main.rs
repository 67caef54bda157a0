mod analyzer;
mod config;
mod fetcher;
mod model;
mod normalizer;
mod presenter;
mod storage;
mod utils;

use std::collections::BTreeMap;

use futures::future::join_all;
use tracing::{error, info, warn};

use analyzer::recommendation::recommend;
use analyzer::{Analyzer, TrendAnalyzer};
use config::load_config;
use fetcher::{CoinGeckoClient, MarketDataSource};
use model::{PriceSeries, RawSample};
use normalizer::normalize;
use storage::SqliteStorage;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration from file
    let config = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    // Initialize storage (SQLite); the handle lives for the duration of the run
    let mut storage = match SqliteStorage::new(&config.db_path) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to initialize storage: {:?}", e);
            return;
        }
    };

    let source = CoinGeckoClient::new(config.vs_currency.clone(), config.api_key.clone());

    info!("Fetching {} days of prices for {} coins...", config.days, config.coins.len());
    let raw = fetch_all(&source, &config.coins, config.days).await;

    // Normalize each coin's samples into a daily series
    let mut prices: BTreeMap<String, PriceSeries> = BTreeMap::new();
    for (coin, samples) in raw {
        let series = normalize(&coin, &samples);
        prices.insert(coin, series);
    }

    if config.suggest_investments {
        let analyzer = TrendAnalyzer::new();
        let trends = analyzer.analyze_all(&prices);
        info!("Computed trend metrics for {} of {} coins", trends.len(), prices.len());

        let recommendations = recommend(&trends);
        info!("Found {} recommendation candidates", recommendations.len());

        if let Err(e) = storage.replace_trends(&trends) {
            warn!("Trend save error: {:?}", e);
        }
        if let Err(e) = storage.replace_prices(&prices) {
            warn!("Price save error: {:?}", e);
        }

        presenter::show_recommendations(&recommendations);
    } else if let Err(e) = storage.replace_prices(&prices) {
        warn!("Price save error: {:?}", e);
    }

    if let Err(e) = presenter::show_database(&storage) {
        warn!("Database display error: {:?}", e);
    }
}

/// Fetches all coins concurrently. Fetch failures and missing data degrade to
/// an empty sample list for that coin only.
async fn fetch_all(
    source: &dyn MarketDataSource,
    coins: &[String],
    days: u32,
) -> Vec<(String, Vec<RawSample>)> {
    let tasks: Vec<_> = coins
        .iter()
        .map(|coin| fetch_coin(source, coin, days))
        .collect();
    join_all(tasks).await
}

async fn fetch_coin(
    source: &dyn MarketDataSource,
    coin: &str,
    days: u32,
) -> (String, Vec<RawSample>) {
    match source.daily_prices(coin, days).await {
        Ok(Some(samples)) => {
            info!("Retrieved {} daily price samples for {}", samples.len(), coin);
            (coin.to_string(), samples)
        }
        Ok(None) => {
            info!("No price data found for {}", coin);
            (coin.to_string(), Vec::new())
        }
        Err(e) => {
            warn!("Failed to retrieve data for {}: {}", coin, e);
            (coin.to_string(), Vec::new())
        }
    }
}
