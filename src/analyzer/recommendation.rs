use std::collections::BTreeMap;

use crate::model::{GrowthOutlook, Recommendation, TrendMetrics};

/// Change percentage above which a coin is tiered as high growth.
const HIGH_GROWTH_THRESHOLD: f64 = 5.0;

/// Selects coins with a strictly positive trend as investment candidates.
///
/// Keeps the iteration order of the trends mapping; does not rank by
/// magnitude. A change of exactly zero is excluded.
pub fn recommend(trends: &BTreeMap<String, TrendMetrics>) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    for (coin, trend) in trends {
        if trend.change_percentage <= 0.0 {
            continue;
        }

        let outlook = if trend.change_percentage > HIGH_GROWTH_THRESHOLD {
            GrowthOutlook::High
        } else {
            GrowthOutlook::Moderate
        };

        recommendations.push(Recommendation {
            coin: coin.clone(),
            change_percentage: trend.change_percentage,
            volatility: trend.volatility,
            average_price: trend.average_price,
            outlook,
        });
    }

    recommendations
}
