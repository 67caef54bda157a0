pub mod coingecko;
pub mod traits;

pub use coingecko::CoinGeckoClient;
pub use traits::MarketDataSource;
