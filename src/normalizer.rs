use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::model::{PricePoint, PriceSeries, RawSample};
use crate::utils::ms_to_utc_date;

/// Turns raw `[timestamp_ms, price]` samples into a daily series for one coin.
///
/// Timestamps are truncated to their UTC calendar date. When several samples
/// land on the same date, the one appearing last in the input wins. The
/// resulting series holds one entry per date, ascending. Empty or unusable
/// input yields an empty series, which downstream stages treat as "no data".
pub fn normalize(coin: &str, samples: &[RawSample]) -> PriceSeries {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for sample in samples {
        match ms_to_utc_date(sample.0) {
            Some(date) => {
                by_date.insert(date, sample.1);
            }
            None => warn!(
                "Dropping sample with out-of-range timestamp {} for {}",
                sample.0, coin
            ),
        }
    }

    if by_date.is_empty() {
        info!("No usable price samples for {}", coin);
    }

    PriceSeries {
        points: by_date
            .into_iter()
            .map(|(date, price)| PricePoint { date, price })
            .collect(),
    }
}
