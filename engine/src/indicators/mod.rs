// Technical indicators module
pub mod ema;
pub mod sma;

pub use ema::Ema;
pub use sma::Sma;

use crate::error::EngineError;
use shared::models::Candle;

// Common trait for all indicators. Input candles are oldest first.
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn period(&self) -> usize;
    /// One entry per candle; `None` while the indicator is still warming up.
    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>>;

    /// The indicator value as of the newest candle.
    fn latest(&self, data: &[Candle]) -> Result<f64, EngineError> {
        let insufficient = EngineError::InsufficientData {
            required: self.period(),
            available: data.len(),
        };
        if self.period() == 0 || data.len() < self.period() {
            return Err(insufficient);
        }
        self.calculate(data).last().copied().flatten().ok_or(insufficient)
    }
}

/// Exponential moving average of the closes, recomputed over the whole slice.
pub fn ema(candles: &[Candle], period: usize) -> Result<f64, EngineError> {
    Ema::new(period).latest(candles)
}

/// Simple moving average of the last `period` closes.
pub fn sma(candles: &[Candle], period: usize) -> Result<f64, EngineError> {
    Sma::new(period).latest(candles)
}
