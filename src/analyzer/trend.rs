use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::model::{PriceSeries, TrendError, TrendMetrics};

/// Trait defining the interface for a trend analyzer.
pub trait Analyzer {
    fn analyze(&self, series: &PriceSeries) -> Result<TrendMetrics, TrendError>;
    fn analyze_all(
        &self,
        series_by_coin: &BTreeMap<String, PriceSeries>,
    ) -> BTreeMap<String, TrendMetrics>;
}

pub struct TrendAnalyzer;

impl TrendAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for TrendAnalyzer {
    /// Computes change percentage, volatility and average price for a series.
    ///
    /// A price of zero anywhere a relative change is taken from fails the
    /// whole series, not just that step.
    fn analyze(&self, series: &PriceSeries) -> Result<TrendMetrics, TrendError> {
        let (first, last) = match (series.points.first(), series.points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(TrendError::EmptySeries),
        };

        if first.price == 0.0 {
            return Err(TrendError::ZeroPrice(first.date));
        }
        let change_percentage = (last.price - first.price) / first.price * 100.0;

        let mut daily_changes = Vec::with_capacity(series.len().saturating_sub(1));
        for pair in series.points.windows(2) {
            let (prev, curr) = (pair[0], pair[1]);
            if prev.price == 0.0 {
                return Err(TrendError::ZeroPrice(prev.date));
            }
            daily_changes.push((curr.price - prev.price) / prev.price);
        }

        // A single daily change has no spread; volatility is exactly 0.0
        // until there are at least two of them.
        let volatility = if daily_changes.len() > 1 {
            sample_std_dev(&daily_changes)
        } else {
            0.0
        };

        let average_price =
            series.points.iter().map(|p| p.price).sum::<f64>() / series.len() as f64;

        Ok(TrendMetrics {
            change_percentage,
            volatility,
            average_price,
        })
    }

    /// Analyzes every coin's series, isolating per-coin failures.
    fn analyze_all(
        &self,
        series_by_coin: &BTreeMap<String, PriceSeries>,
    ) -> BTreeMap<String, TrendMetrics> {
        let mut trends = BTreeMap::new();

        for (coin, series) in series_by_coin {
            match self.analyze(series) {
                Ok(metrics) => {
                    trends.insert(coin.clone(), metrics);
                }
                Err(TrendError::EmptySeries) => {
                    info!("No price data for {}, skipping", coin);
                }
                Err(e) => {
                    warn!("Trend analysis failed for {}: {}", coin, e);
                }
            }
        }

        trends
    }
}

/// Sample standard deviation (divisor n - 1). Callers guarantee `values.len() > 1`.
fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PricePoint;
    use chrono::{Days, NaiveDate};

    fn series(prices: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 12, 10).unwrap();
        PriceSeries {
            points: prices
                .iter()
                .enumerate()
                .map(|(i, &price)| PricePoint {
                    date: start + Days::new(i as u64),
                    price,
                })
                .collect(),
        }
    }

    #[test]
    fn four_point_bitcoin_fixture() {
        let metrics = TrendAnalyzer::new()
            .analyze(&series(&[97077.22, 99807.41, 97779.31, 97343.92]))
            .unwrap();

        assert!((metrics.change_percentage - 0.27).abs() < 0.005);
        assert!((metrics.average_price - 98001.965).abs() < 1e-3);
        assert!((metrics.volatility - 0.025).abs() < 1e-3);
    }

    #[test]
    fn single_point_has_zero_change_and_volatility() {
        let metrics = TrendAnalyzer::new().analyze(&series(&[97077.22])).unwrap();
        assert_eq!(metrics.change_percentage, 0.0);
        assert_eq!(metrics.volatility, 0.0);
        assert_eq!(metrics.average_price, 97077.22);
    }

    #[test]
    fn two_points_have_exactly_zero_volatility() {
        let metrics = TrendAnalyzer::new()
            .analyze(&series(&[97077.22, 99807.41]))
            .unwrap();
        assert_eq!(metrics.volatility, 0.0);
        assert!(metrics.change_percentage > 0.0);
    }

    #[test]
    fn three_points_have_real_stddev_of_two_changes() {
        let metrics = TrendAnalyzer::new()
            .analyze(&series(&[100.0, 110.0, 99.0]))
            .unwrap();
        // daily changes are 0.1 and -0.1, sample stddev = sqrt(0.02)
        assert!((metrics.volatility - 0.02_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn empty_series_is_skipped() {
        let result = TrendAnalyzer::new().analyze(&PriceSeries::default());
        assert_eq!(result, Err(TrendError::EmptySeries));
    }

    #[test]
    fn zero_first_price_fails_the_series() {
        let result = TrendAnalyzer::new().analyze(&series(&[0.0, 5.0]));
        assert!(matches!(result, Err(TrendError::ZeroPrice(_))));
    }

    #[test]
    fn zero_interior_price_fails_the_series() {
        let result = TrendAnalyzer::new().analyze(&series(&[5.0, 0.0, 3.0]));
        let expected_date = NaiveDate::from_ymd_opt(2024, 12, 11).unwrap();
        assert_eq!(result, Err(TrendError::ZeroPrice(expected_date)));
    }

    #[test]
    fn failures_do_not_affect_other_coins() {
        let mut batch = BTreeMap::new();
        batch.insert("bad".to_string(), series(&[0.0, 5.0]));
        batch.insert("bitcoin".to_string(), series(&[97077.22, 99807.41]));
        batch.insert("empty".to_string(), PriceSeries::default());

        let trends = TrendAnalyzer::new().analyze_all(&batch);

        assert_eq!(trends.len(), 1);
        assert!(trends.contains_key("bitcoin"));
    }
}
