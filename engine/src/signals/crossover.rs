//! EMA 20/50 crossover on the 15-minute series, filtered by the 4-hour
//! close relative to its EMA 200.
//!
//! The detector keeps no state between calls: every evaluation recomputes
//! all averages from the candle series, so "already fired" is encoded only
//! in the previous-versus-current EMA comparison.

use crate::data::MarketDataStore;
use crate::error::EngineError;
use crate::indicators::{Ema, IndicatorCalculator};
use chrono::{DateTime, Utc};
use shared::models::{Signal, SignalKind, TimeFrame};
use tracing::debug;

pub const BUY_RATIONALE: &str =
    "EMA20 crossed above EMA50 on 15m with 4h trend bullish (close above EMA200)";
pub const SELL_RATIONALE: &str =
    "EMA20 crossed below EMA50 on 15m with 4h trend bearish (close below EMA200)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendBias {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone)]
pub struct CrossoverParams {
    pub fast_period: usize,
    pub slow_period: usize,
    pub trend_period: usize,
    pub min_entry_candles: usize,
    pub min_trend_candles: usize,
}

impl Default for CrossoverParams {
    fn default() -> Self {
        CrossoverParams {
            fast_period: 20,
            slow_period: 50,
            trend_period: 200,
            min_entry_candles: 50,
            min_trend_candles: 200,
        }
    }
}

/// Indicator readings for one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossoverSnapshot {
    pub trend: TrendBias,
    pub trend_close: f64,
    pub trend_ema: f64,
    pub fast: f64,
    pub slow: f64,
    pub prev_fast: f64,
    pub prev_slow: f64,
    pub entry_close: f64,
}

impl CrossoverSnapshot {
    /// BUY is checked first; SELL only when BUY does not hold.
    pub fn decide(&self) -> Option<SignalKind> {
        let crossed_up = self.prev_fast <= self.prev_slow && self.fast > self.slow;
        let crossed_down = self.prev_fast >= self.prev_slow && self.fast < self.slow;

        if self.trend == TrendBias::Bullish && crossed_up {
            Some(SignalKind::Buy)
        } else if self.trend == TrendBias::Bearish && crossed_down {
            Some(SignalKind::Sell)
        } else {
            None
        }
    }
}

pub struct CrossoverDetector {
    params: CrossoverParams,
    fast: Ema,
    slow: Ema,
    trend: Ema,
}

impl CrossoverDetector {
    pub fn new(params: CrossoverParams) -> Self {
        CrossoverDetector {
            fast: Ema::new(params.fast_period),
            slow: Ema::new(params.slow_period),
            trend: Ema::new(params.trend_period),
            params,
        }
    }

    pub fn params(&self) -> &CrossoverParams {
        &self.params
    }

    /// Computes every reading the rule needs. Fails with `InsufficientData`
    /// during warm-up or when any average cannot be computed.
    pub fn snapshot(&self, store: &MarketDataStore) -> Result<CrossoverSnapshot, EngineError> {
        let entry_len = store.len(TimeFrame::Minute15);
        let trend_len = store.len(TimeFrame::Hour4);
        if entry_len < self.params.min_entry_candles {
            return Err(EngineError::InsufficientData {
                required: self.params.min_entry_candles,
                available: entry_len,
            });
        }
        if trend_len < self.params.min_trend_candles {
            return Err(EngineError::InsufficientData {
                required: self.params.min_trend_candles,
                available: trend_len,
            });
        }

        let entry = store
            .series(TimeFrame::Minute15)
            .map(|s| s.chronological())
            .unwrap_or_default();
        let trend = store
            .series(TimeFrame::Hour4)
            .map(|s| s.chronological())
            .unwrap_or_default();
        let (Some(entry_last), Some(trend_last)) = (entry.last(), trend.last()) else {
            return Err(EngineError::InsufficientData { required: 1, available: 0 });
        };

        // "One candle ago": the same window without the newest 15m candle.
        let previous = &entry[..entry.len() - 1];

        let trend_ema = self.trend.latest(&trend)?;
        let fast = self.fast.latest(&entry)?;
        let slow = self.slow.latest(&entry)?;
        let prev_fast = self.fast.latest(previous)?;
        let prev_slow = self.slow.latest(previous)?;

        let trend_close = trend_last.close;
        let bias = if trend_close > trend_ema { TrendBias::Bullish } else { TrendBias::Bearish };

        Ok(CrossoverSnapshot {
            trend: bias,
            trend_close,
            trend_ema,
            fast,
            slow,
            prev_fast,
            prev_slow,
            entry_close: entry_last.close,
        })
    }

    /// Runs the rule once against the current store. `now` stamps the signal.
    pub fn evaluate(&self, store: &MarketDataStore, now: DateTime<Utc>) -> Option<Signal> {
        let snapshot = match self.snapshot(store) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                debug!(error = %e, "Skipping signal evaluation");
                return None;
            }
        };

        debug!(
            trend = ?snapshot.trend,
            trend_close = snapshot.trend_close,
            trend_ema = snapshot.trend_ema,
            fast = snapshot.fast,
            slow = snapshot.slow,
            prev_fast = snapshot.prev_fast,
            prev_slow = snapshot.prev_slow,
            fast_name = self.fast.name(),
            slow_name = self.slow.name(),
            "Evaluated crossover"
        );

        let kind = snapshot.decide()?;
        let rationale = match kind {
            SignalKind::Buy => BUY_RATIONALE,
            SignalKind::Sell => SELL_RATIONALE,
        };
        Some(Signal {
            kind,
            price: snapshot.entry_close,
            timestamp: now,
            rationale: rationale.to_string(),
        })
    }
}

impl Default for CrossoverDetector {
    fn default() -> Self {
        Self::new(CrossoverParams::default())
    }
}
