// Handler for GET / and GET /status
use super::StatusContext;
use crate::indicators::{ema, sma};
use serde::{Deserialize, Serialize};
use shared::models::{Candle, Signal, TimeFrame};
use std::collections::BTreeMap;
use std::convert::Infallible;

const RECENT_SIGNALS: usize = 5;

/// Latest indicator values behind the crossover rule. Each stays `null`
/// until its series holds enough candles.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorReadings {
    pub ema20: Option<f64>,
    pub ema50: Option<f64>,
    pub sma50: Option<f64>,
    pub trend_ema200: Option<f64>,
}

impl IndicatorReadings {
    fn compute(entry: &[Candle], trend: &[Candle]) -> Self {
        IndicatorReadings {
            ema20: ema(entry, 20).ok(),
            ema50: ema(entry, 50).ok(),
            sma50: sma(entry, 50).ok(),
            trend_ema200: ema(trend, 200).ok(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: String,
    pub exchange: String,
    pub pair: String,
    /// Close of the newest 15m candle; `null` until the first one arrives.
    pub current_price: Option<f64>,
    pub data_points: BTreeMap<String, usize>,
    pub recent_signals: Vec<Signal>,
    pub indicators: IndicatorReadings,
}

pub async fn handle_get_status(ctx: StatusContext) -> Result<impl warp::Reply, Infallible> {
    let state = ctx.state.read().await;
    let current_price = state.market_data.latest(TimeFrame::Minute15).map(|c| c.close);
    let data_points = state.market_data.data_points();
    let recent_signals = state.signals.recent(RECENT_SIGNALS);
    let candles = |tf| state.market_data.series(tf).map(|s| s.chronological()).unwrap_or_default();
    let entry = candles(TimeFrame::Minute15);
    let trend = candles(TimeFrame::Hour4);
    drop(state);

    let response = StatusResponse {
        status: "running".to_string(),
        exchange: ctx.exchange.clone(),
        pair: ctx.pair.clone(),
        current_price,
        data_points,
        recent_signals,
        indicators: IndicatorReadings::compute(&entry, &trend),
    };

    tracing::debug!(current_price = ?response.current_price, "Served status request");
    Ok(warp::reply::json(&response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::routes;
    use crate::state::EngineState;
    use chrono::{DateTime, Utc};
    use shared::models::SignalKind;

    fn candle(secs: i64, close: f64) -> Candle {
        Candle {
            timestamp: DateTime::from_timestamp(secs, 0).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 3.0,
        }
    }

    async fn fetch(ctx: StatusContext, path: &str) -> StatusResponse {
        let res = warp::test::request().method("GET").path(path).reply(&routes(ctx)).await;
        assert_eq!(res.status(), 200);
        serde_json::from_slice(res.body()).unwrap()
    }

    #[tokio::test]
    async fn test_empty_state_reports_nulls_and_zeros() {
        let ctx = StatusContext::new(EngineState::default().into_shared(), "binance", "ETH/USDT");
        let status = fetch(ctx, "/status").await;
        assert_eq!(status.status, "running");
        assert_eq!(status.exchange, "binance");
        assert_eq!(status.pair, "ETH/USDT");
        assert_eq!(status.current_price, None);
        assert_eq!(status.data_points.get("15m"), Some(&0));
        assert_eq!(status.data_points.get("4h"), Some(&0));
        assert!(status.recent_signals.is_empty());
        assert_eq!(status.indicators, IndicatorReadings::default());
    }

    #[tokio::test]
    async fn test_indicator_readings_fill_in_once_warm() {
        let state = EngineState::default().into_shared();
        {
            let mut guard = state.write().await;
            for i in 0..50 {
                guard.market_data.upsert(TimeFrame::Minute15, candle(i * 900, 100.0));
            }
        }

        let status = fetch(StatusContext::new(state, "binance", "ETH/USDT"), "/status").await;
        assert!((status.indicators.ema20.unwrap() - 100.0).abs() < 1e-9);
        assert_eq!(status.indicators.ema50, Some(100.0));
        assert_eq!(status.indicators.sma50, Some(100.0));
        assert_eq!(status.indicators.trend_ema200, None);
    }

    #[tokio::test]
    async fn test_root_reports_price_counts_and_last_five_signals() {
        let state = EngineState::default().into_shared();
        {
            let mut guard = state.write().await;
            guard.market_data.upsert(TimeFrame::Minute15, candle(0, 2001.5));
            guard.market_data.upsert(TimeFrame::Minute15, candle(900, 2003.25));
            guard.market_data.upsert(TimeFrame::Hour4, candle(0, 1990.0));
            for i in 0..7 {
                guard.signals.append(Signal {
                    kind: SignalKind::Sell,
                    price: 2000.0 + i as f64,
                    timestamp: Utc::now(),
                    rationale: "test".to_string(),
                });
            }
        }

        let status = fetch(StatusContext::new(state, "binance", "ETH/USDT"), "/").await;
        assert_eq!(status.current_price, Some(2003.25));
        assert_eq!(status.data_points.get("15m"), Some(&2));
        assert_eq!(status.data_points.get("4h"), Some(&1));
        let prices: Vec<f64> = status.recent_signals.iter().map(|s| s.price).collect();
        assert_eq!(prices, vec![2006.0, 2005.0, 2004.0, 2003.0, 2002.0]);
    }

    #[tokio::test]
    async fn test_wire_field_names_are_camel_case() {
        let ctx = StatusContext::new(EngineState::default().into_shared(), "binance", "ETH/USDT");
        let res = warp::test::request().method("GET").path("/status").reply(&routes(ctx)).await;
        let json: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert!(json.get("currentPrice").is_some());
        assert!(json["dataPoints"].is_object());
        assert!(json["recentSignals"].is_array());
    }
}
