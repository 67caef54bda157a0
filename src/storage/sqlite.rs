use std::collections::BTreeMap;

use rusqlite::{Connection, params};

use crate::model::{PriceSeries, StorageError, TrendMetrics};

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens the database at the given path and creates the schema if missing.
    /// The caller owns the handle for the duration of the run.
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS prices (
                id INTEGER PRIMARY KEY,
                coin TEXT NOT NULL,
                date TEXT NOT NULL,
                price_usd REAL NOT NULL
            );

            CREATE TABLE IF NOT EXISTS trends (
                id INTEGER PRIMARY KEY,
                coin TEXT NOT NULL,
                change_percentage REAL NOT NULL,
                volatility REAL NOT NULL,
                average_price REAL NOT NULL
            );
            ",
        )?;

        Ok(Self { conn })
    }

    /// Replaces the full contents of the prices table with the given series.
    pub fn replace_prices(
        &mut self,
        prices: &BTreeMap<String, PriceSeries>,
    ) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM prices", [])?;

        for (coin, series) in prices {
            for point in &series.points {
                tx.execute(
                    "INSERT INTO prices (coin, date, price_usd) VALUES (?1, ?2, ?3)",
                    params![
                        coin,
                        point.date.format("%Y-%m-%d").to_string(),
                        point.price
                    ],
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Replaces the full contents of the trends table with the given metrics.
    pub fn replace_trends(
        &mut self,
        trends: &BTreeMap<String, TrendMetrics>,
    ) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM trends", [])?;

        for (coin, trend) in trends {
            tx.execute(
                "INSERT INTO trends (coin, change_percentage, volatility, average_price)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    coin,
                    trend.change_percentage,
                    trend.volatility,
                    trend.average_price
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Returns (coin, date, price_usd) rows, most recent dates first.
    pub fn get_price_rows(&self) -> Result<Vec<(String, String, f64)>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT coin, date, price_usd FROM prices ORDER BY date DESC")?;

        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }

        Ok(results)
    }

    /// Returns (coin, change_percentage, volatility, average_price) rows.
    pub fn get_trend_rows(&self) -> Result<Vec<(String, f64, f64, f64)>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT coin, change_percentage, volatility, average_price FROM trends",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PricePoint;
    use chrono::NaiveDate;

    fn series(prices: &[(u32, f64)]) -> PriceSeries {
        PriceSeries {
            points: prices
                .iter()
                .map(|&(day, price)| PricePoint {
                    date: NaiveDate::from_ymd_opt(2024, 12, day).unwrap(),
                    price,
                })
                .collect(),
        }
    }

    #[test]
    fn price_replace_is_full_not_append() {
        let mut storage = SqliteStorage::new(":memory:").unwrap();

        let mut first = BTreeMap::new();
        first.insert("bitcoin".to_string(), series(&[(10, 97779.31), (11, 97343.92)]));
        storage.replace_prices(&first).unwrap();

        let mut second = BTreeMap::new();
        second.insert("ethereum".to_string(), series(&[(12, 3890.25)]));
        storage.replace_prices(&second).unwrap();

        let rows = storage.get_price_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], ("ethereum".to_string(), "2024-12-12".to_string(), 3890.25));
    }

    #[test]
    fn price_rows_come_back_most_recent_first() {
        let mut storage = SqliteStorage::new(":memory:").unwrap();

        let mut prices = BTreeMap::new();
        prices.insert("bitcoin".to_string(), series(&[(10, 97779.31), (11, 97343.92)]));
        storage.replace_prices(&prices).unwrap();

        let rows = storage.get_price_rows().unwrap();
        assert_eq!(rows[0].1, "2024-12-11");
        assert_eq!(rows[1].1, "2024-12-10");
    }

    #[test]
    fn trend_rows_round_trip() {
        let mut storage = SqliteStorage::new(":memory:").unwrap();

        let mut trends = BTreeMap::new();
        trends.insert(
            "bitcoin".to_string(),
            TrendMetrics {
                change_percentage: 0.27,
                volatility: 0.025,
                average_price: 98001.965,
            },
        );
        storage.replace_trends(&trends).unwrap();
        // a second replace must not accumulate rows
        storage.replace_trends(&trends).unwrap();

        let rows = storage.get_trend_rows().unwrap();
        assert_eq!(rows.len(), 1);
        let (coin, change, volatility, average) = &rows[0];
        assert_eq!(coin, "bitcoin");
        assert_eq!(*change, 0.27);
        assert_eq!(*volatility, 0.025);
        assert_eq!(*average, 98001.965);
    }
}
