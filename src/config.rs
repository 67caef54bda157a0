use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// CoinGecko coin ids, e.g. "bitcoin", "ethereum".
    pub coins: Vec<String>,
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_suggest_investments")]
    pub suggest_investments: bool,
}

fn default_days() -> u32 {
    1
}

fn default_vs_currency() -> String {
    "usd".to_string()
}

fn default_db_path() -> String {
    "crypto_data.db".to_string()
}

fn default_suggest_investments() -> bool {
    true
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
