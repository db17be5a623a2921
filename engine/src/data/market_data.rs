// Holds one candle series per supported timeframe for the configured pair
use crate::data::candle_series::CandleSeries;
use shared::models::{Candle, TimeFrame};
use std::collections::BTreeMap;

pub struct MarketDataStore {
    series: BTreeMap<TimeFrame, CandleSeries>,
}

impl MarketDataStore {
    pub fn new() -> Self {
        MarketDataStore {
            series: TimeFrame::ALL.iter().map(|tf| (*tf, CandleSeries::new())).collect(),
        }
    }

    pub fn upsert(&mut self, timeframe: TimeFrame, candle: Candle) {
        self.series.entry(timeframe).or_default().upsert(candle);
    }

    pub fn load_bulk(&mut self, timeframe: TimeFrame, candles: Vec<Candle>) {
        self.series.entry(timeframe).or_default().load_bulk(candles);
    }

    pub fn series(&self, timeframe: TimeFrame) -> Option<&CandleSeries> {
        self.series.get(&timeframe)
    }

    pub fn len(&self, timeframe: TimeFrame) -> usize {
        self.series(timeframe).map_or(0, CandleSeries::len)
    }

    pub fn latest(&self, timeframe: TimeFrame) -> Option<&Candle> {
        self.series(timeframe).and_then(CandleSeries::latest)
    }

    /// Candle counts keyed by timeframe label, e.g. `{"15m": 300, "4h": 250}`.
    pub fn data_points(&self) -> BTreeMap<String, usize> {
        self.series
            .iter()
            .map(|(tf, series)| (tf.as_str().to_string(), series.len()))
            .collect()
    }
}

impl Default for MarketDataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn create_candle(secs: i64, close: f64) -> Candle {
        Candle {
            timestamp: DateTime::from_timestamp(secs, 0).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
        }
    }

    #[test]
    fn test_timeframes_are_independent() {
        let mut store = MarketDataStore::new();
        store.upsert(TimeFrame::Minute15, create_candle(0, 1.0));
        store.upsert(TimeFrame::Minute15, create_candle(900, 2.0));
        store.load_bulk(TimeFrame::Hour4, vec![create_candle(0, 10.0)]);

        assert_eq!(store.len(TimeFrame::Minute15), 2);
        assert_eq!(store.len(TimeFrame::Hour4), 1);
        assert_eq!(store.latest(TimeFrame::Minute15).unwrap().close, 2.0);
        assert_eq!(store.latest(TimeFrame::Hour4).unwrap().close, 10.0);
    }

    #[test]
    fn test_data_points_reports_every_timeframe() {
        let store = MarketDataStore::default();
        let points = store.data_points();
        assert_eq!(points.get("15m"), Some(&0));
        assert_eq!(points.get("4h"), Some(&0));
    }
}
